//! Dynamically typed closures with a declared signature
//!
//! A [`Closure`] is a body over [`Value`]s plus a [`Signature`] describing its
//! parameters. The signature is what contracts introspect to learn the arity,
//! and it is enforced at the call boundary on every call:
//!
//! 1. The argument count must match the declared parameters
//! 2. Each argument with a type hint must satisfy it
//! 3. The body runs
//! 4. The result must satisfy the declared return type, if any
//!
//! Boundary failures are raw [`CallError::Type`] errors. Their messages name
//! the call site and the synthetic wrapper class ([`WRAPPER_MARKER`]); the
//! contract layer strips that detail before callers see it.
//!
//! Hints are more lenient than declared-type validation: a class hint accepts
//! subclasses, a float hint accepts integers and `mixed` accepts anything.

use contracts_core::{classify_value, CallError, ClassRegistry, SemanticType, Value};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use thiserror::Error;

/// Synthetic class name under which wrappers appear in raw diagnostics
pub const WRAPPER_MARKER: &str = "class@anonymous";

/// Name given to closures built without one
pub const DEFAULT_CLOSURE_NAME: &str = "{closure}";

/// Hint that accepts every value
const MIXED: &str = "mixed";

/// Closure body
pub type ClosureFn = dyn Fn(Vec<Value>) -> Result<Value, CallError> + Send + Sync;

/// One declared parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    type_hint: Option<String>,
    optional: bool,
}

impl Param {
    /// Parameter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type hint
    pub fn type_hint(&self) -> Option<&str> {
        self.type_hint.as_deref()
    }

    /// Check if the parameter has a default value
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// Why a signature has no fixed arity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArityError {
    /// Signature accepts any number of trailing arguments
    #[error("closure is variadic")]
    Variadic,
    /// Signature has a parameter with a default value
    #[error("parameter #{position} ({name}) is optional")]
    OptionalParam {
        /// 1-based position
        position: usize,
        /// Parameter name
        name: String,
    },
}

/// Declared shape of a closure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    params: Vec<Param>,
    variadic: bool,
    return_type: Option<String>,
}

impl Signature {
    /// Declared parameters
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Declared return type
    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    /// Check if the closure accepts trailing extra arguments
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Fixed parameter count
    ///
    /// # Errors
    ///
    /// Fails when the count is not fixed: variadic signatures and signatures
    /// with optional parameters.
    pub fn arity(&self) -> Result<usize, ArityError> {
        if self.variadic {
            return Err(ArityError::Variadic);
        }
        if let Some((i, param)) = self.params.iter().enumerate().find(|(_, p)| p.optional) {
            return Err(ArityError::OptionalParam {
                position: i + 1,
                name: param.name.clone(),
            });
        }
        Ok(self.params.len())
    }

    fn required(&self) -> usize {
        self.params.iter().filter(|p| !p.optional).count()
    }
}

/// Where a closure is being called from
///
/// Only used to build raw diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct CallFrame {
    method: &'static str,
    location: &'static Location<'static>,
}

impl CallFrame {
    /// Frame for the current call site
    #[track_caller]
    pub fn here(method: &'static str) -> Self {
        Self {
            method,
            location: Location::caller(),
        }
    }

    /// Wrapper method name
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Source location of the call
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for CallFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{} at {}:{}",
            WRAPPER_MARKER,
            self.method,
            self.location.file(),
            self.location.line()
        )
    }
}

/// A dynamically typed closure with a declared signature
///
/// Cheap to clone; clones share the body.
#[derive(Clone)]
pub struct Closure {
    name: Arc<str>,
    signature: Arc<Signature>,
    body: Arc<ClosureFn>,
}

impl Closure {
    /// Start building a closure with an explicit signature
    pub fn builder() -> ClosureBuilder {
        ClosureBuilder::default()
    }

    /// Closure with no parameters
    pub fn nullary<F, R>(f: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self::builder().build(move |_| Ok(f().into()))
    }

    /// Closure with one untyped parameter
    pub fn unary<F, R>(f: F) -> Self
    where
        F: Fn(Value) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self::builder().param("value").build(move |args| {
            let mut args = args.into_iter();
            let value = args.next().unwrap_or(Value::Null);
            Ok(f(value).into())
        })
    }

    /// Closure with two untyped parameters
    pub fn binary<F, R>(f: F) -> Self
    where
        F: Fn(Value, Value) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self::builder()
            .param("left")
            .param("right")
            .build(move |args| {
                let mut args = args.into_iter();
                let left = args.next().unwrap_or(Value::Null);
                let right = args.next().unwrap_or(Value::Null);
                Ok(f(left, right).into())
            })
    }

    /// Closure name used in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared signature
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Fixed parameter count, see [`Signature::arity`]
    pub fn arity(&self) -> Result<usize, ArityError> {
        self.signature.arity()
    }

    /// Call the closure directly
    #[track_caller]
    pub fn call(&self, args: Vec<Value>) -> Result<Value, CallError> {
        self.call_from(CallFrame::here("call"), args)
    }

    /// Call the closure on behalf of a wrapper method
    pub fn call_from(&self, frame: CallFrame, args: Vec<Value>) -> Result<Value, CallError> {
        self.check_count(&frame, args.len())?;
        for (i, (param, arg)) in self.signature.params.iter().zip(&args).enumerate() {
            if let Some(hint) = param.type_hint.as_deref() {
                if !hint_accepts(hint, arg) {
                    return Err(CallError::type_mismatch(format!(
                        "{}(): Argument #{} ({}) must be of type {}, {} given, called by {} ({})",
                        self.name,
                        i + 1,
                        param.name,
                        hint,
                        arg.describe(),
                        WRAPPER_MARKER,
                        frame
                    )));
                }
            }
        }

        let result = (self.body)(args)?;

        if let Some(hint) = self.signature.return_type.as_deref() {
            if !hint_accepts(hint, &result) {
                return Err(CallError::type_mismatch(format!(
                    "{}(): Return value must be of type {}, {} returned ({})",
                    self.name,
                    hint,
                    result.describe(),
                    frame
                )));
            }
        }
        Ok(result)
    }

    fn check_count(&self, frame: &CallFrame, given: usize) -> Result<(), CallError> {
        let required = self.signature.required();
        let declared = self.signature.params.len();
        let too_few = given < required;
        let too_many = !self.signature.variadic && given > declared;
        if !too_few && !too_many {
            return Ok(());
        }

        let bound = if too_few { required } else { declared };
        let qualifier = match (self.signature.variadic, required == declared) {
            (true, _) => "at least",
            (false, true) => "exactly",
            (false, false) if too_few => "at least",
            (false, false) => "at most",
        };
        Err(CallError::type_mismatch(format!(
            "Too {} arguments to function {}(), {} passed in {} ({}) and {} {} expected",
            if too_few { "few" } else { "many" },
            self.name,
            given,
            WRAPPER_MARKER,
            frame,
            qualifier,
            bound
        )))
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish()
    }
}

/// Check a value against a closure parameter/return hint
fn hint_accepts(hint: &str, value: &Value) -> bool {
    let hint = hint.trim();
    if let Some(inner) = hint.strip_prefix('?') {
        return value.is_null() || hint_accepts(inner, value);
    }
    if hint.eq_ignore_ascii_case(MIXED) {
        return true;
    }
    if let Some(category) = SemanticType::from_name(hint) {
        let actual = classify_value(value);
        return actual == category
            || (category == SemanticType::Float && actual == SemanticType::Integer);
    }
    match (value, ClassRegistry::lookup(hint)) {
        (Value::Object(object), Some(class)) => object.class().is_subclass_of(&class),
        _ => false,
    }
}

/// Builder for closures with explicit signatures
///
/// # Example
///
/// ```ignore
/// let add = Closure::builder()
///     .named("add")
///     .typed_param("a", "int")
///     .typed_param("b", "int")
///     .returns("int")
///     .build(|args| match (&args[0], &args[1]) {
///         (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
///         _ => Err(CallError::type_mismatch("unreachable")),
///     });
/// ```
#[derive(Debug, Default)]
pub struct ClosureBuilder {
    name: Option<String>,
    signature: Signature,
}

impl ClosureBuilder {
    /// Set the closure name used in diagnostics
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an untyped parameter
    pub fn param(self, name: impl Into<String>) -> Self {
        self.push(name.into(), None, false)
    }

    /// Add a parameter with a type hint
    pub fn typed_param(self, name: impl Into<String>, hint: impl Into<String>) -> Self {
        self.push(name.into(), Some(hint.into()), false)
    }

    /// Add a parameter with a default value
    pub fn optional_param(self, name: impl Into<String>) -> Self {
        self.push(name.into(), None, true)
    }

    /// Accept any number of trailing arguments
    pub fn variadic(mut self) -> Self {
        self.signature.variadic = true;
        self
    }

    /// Declare the return type
    pub fn returns(mut self, hint: impl Into<String>) -> Self {
        self.signature.return_type = Some(hint.into());
        self
    }

    /// Finish with the closure body
    pub fn build<F>(self, body: F) -> Closure
    where
        F: Fn(Vec<Value>) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Closure {
            name: Arc::from(self.name.as_deref().unwrap_or(DEFAULT_CLOSURE_NAME)),
            signature: Arc::new(self.signature),
            body: Arc::new(body),
        }
    }

    fn push(mut self, name: String, type_hint: Option<String>, optional: bool) -> Self {
        self.signature.params.push(Param {
            name,
            type_hint,
            optional,
        });
        self
    }
}
