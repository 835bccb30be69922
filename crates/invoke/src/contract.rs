//! Closure contracts
//!
//! A [`ClosureContract`] owns one closure whose arity was checked when the
//! contract was created. It is the only path through which wrappers call
//! their closure, so every call boundary failure is translated the same way.
//!
//! ## Invariants
//!
//! - A contract never exists for a closure with the wrong arity
//! - The expected arity and declared type never change after creation
//! - Raw `CallError::Type` failures never escape `invoke`

use crate::closure::{CallFrame, Closure, WRAPPER_MARKER};
use crate::config::ContractConfig;
use crate::declared::{self, DeclaredType};
use crate::translate::ErrorTranslator;
use contracts_core::{CallError, Error, Result, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// A closure together with its arity and optional declared type
#[derive(Debug, Clone)]
pub struct ClosureContract {
    closure: Closure,
    arity: usize,
    declared_type: Option<String>,
    config: Arc<ContractConfig>,
    translator: ErrorTranslator,
}

impl ClosureContract {
    /// Create a contract with no declared type
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` if the closure's parameter count differs from
    /// `expected_arity` or cannot be determined.
    pub fn create(closure: Closure, expected_arity: usize) -> Result<Self> {
        Self::new(closure, expected_arity, None)
    }

    /// Create a contract with an optional declared type name
    ///
    /// The name is resolved when a value is validated, not here, so classes
    /// may be registered after the contract is created.
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` if the closure's parameter count differs from
    /// `expected_arity` or cannot be determined.
    pub fn new(closure: Closure, expected_arity: usize, declared_type: Option<&str>) -> Result<Self> {
        let actual = closure.arity().map_err(|e| {
            warn!(
                target: "closures::contract",
                closure = closure.name(),
                expected = expected_arity,
                error = %e,
                "Cannot determine closure arity"
            );
            Error::ArityMismatch {
                expected: expected_arity,
                actual: None,
                reason: format!("cannot determine closure arity: {}", e),
            }
        })?;

        if actual != expected_arity {
            warn!(
                target: "closures::contract",
                closure = closure.name(),
                expected = expected_arity,
                actual,
                "Closure arity mismatch"
            );
            return Err(Error::ArityMismatch {
                expected: expected_arity,
                actual: Some(actual),
                reason: format!("closure {} declares {}", closure.name(), actual),
            });
        }

        let config = ContractConfig::global();
        debug!(
            target: "closures::contract",
            closure = closure.name(),
            arity = actual,
            declared_type = declared_type,
            "Contract created"
        );
        Ok(Self {
            closure,
            arity: actual,
            declared_type: declared_type.map(str::to_string),
            translator: ErrorTranslator::new(config.wrapper_placeholder.clone()),
            config,
        })
    }

    /// Replace the captured configuration
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration fails
    /// [`ContractConfig::validate`]; the contract is consumed.
    pub fn with_config(mut self, config: Arc<ContractConfig>) -> Result<Self> {
        config.validate()?;
        self.translator = ErrorTranslator::new(config.wrapper_placeholder.clone());
        self.config = config;
        Ok(self)
    }

    /// The wrapped closure
    pub fn closure(&self) -> &Closure {
        &self.closure
    }

    /// Parameter count fixed at creation
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Declared type name supplied at creation
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    /// Configuration captured at creation
    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Translator used for call boundary failures
    pub fn translator(&self) -> &ErrorTranslator {
        &self.translator
    }

    /// Call the closure on behalf of wrapper method `method`
    ///
    /// # Errors
    ///
    /// - `FunctionalType` for any type mismatch raised at the call boundary
    ///   or by the body, after translation
    /// - `ClosureFailed` for any other failure raised by the body
    #[track_caller]
    pub fn invoke(&self, method: &'static str, args: Vec<Value>) -> Result<Value> {
        let frame = CallFrame::here(method);
        self.closure
            .call_from(frame, args)
            .map_err(|raw| self.reject(method, raw))
    }

    /// Reject a result that does not fit the wrapper method's return type
    ///
    /// Shapes whose method returns a primitive (`test`, `apply_as_int`, ...)
    /// use this to fail the way a call boundary would.
    #[track_caller]
    pub fn return_mismatch(&self, method: &'static str, expected: &str, result: &Value) -> Error {
        let raw = CallError::type_mismatch(format!(
            "Return value of {} must be of type {}, {} returned ({})",
            WRAPPER_MARKER,
            expected,
            result.describe(),
            CallFrame::here(method)
        ));
        self.reject(method, raw)
    }

    fn reject(&self, method: &'static str, raw: CallError) -> Error {
        match raw {
            CallError::Type(_) => {
                let err = self.translator.translate(raw);
                warn!(
                    target: "closures::contract",
                    closure = self.closure.name(),
                    method,
                    error = %err,
                    "Invocation rejected"
                );
                Error::FunctionalType(err)
            }
            CallError::Failed(reason) => Error::ClosureFailed {
                closure: self.closure.name().to_string(),
                reason,
            },
        }
    }

    /// Validate a value against a declared type name
    ///
    /// Skipped when the captured config disables type validation.
    ///
    /// # Errors
    ///
    /// - `UnrecognizedTypeName` if `declared` does not resolve
    /// - `FunctionalType` if the value does not satisfy it
    pub fn validate_type(&self, value: &Value, declared: &str) -> Result<()> {
        if !self.config.validate_types {
            return Ok(());
        }
        declared::validate_type(value, declared)
    }

    /// Validate a value against an already resolved type
    ///
    /// Skipped when the captured config disables type validation.
    pub fn validate_resolved(&self, value: &Value, expected: &DeclaredType) -> Result<()> {
        if !self.config.validate_types {
            return Ok(());
        }
        declared::check(value, expected)
    }

    /// Resolve the declared type for validation
    ///
    /// Returns `None` when no type is declared or the captured config
    /// disables type validation; the name is not looked up in either case.
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedTypeName` if the declared name does not resolve.
    pub fn resolve_declared(&self) -> Result<Option<DeclaredType>> {
        match self.declared_type.as_deref() {
            Some(declared) if self.config.validate_types => {
                DeclaredType::resolve(declared).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Validate a value against the declared type, if there is one
    pub fn validate_declared(&self, value: &Value) -> Result<()> {
        match self.declared_type.as_deref() {
            Some(declared) => self.validate_type(value, declared),
            None => Ok(()),
        }
    }
}
