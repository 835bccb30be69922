//! Value types for closure contracts
//!
//! This module defines:
//! - Value: Unified enum for everything a closure can receive or return
//! - ObjectRef: Shared reference to a class instance
//! - HandleRef: Shared reference to an external handle
//!
//! ## Reference semantics
//!
//! Scalars, strings and arrays are plain values: cloning copies them.
//! Objects and handles are references: cloning a `Value::Object` aliases the
//! same instance, so a closure that mutates an object argument is observed by
//! the caller that passed it.
//!
//! ## Type Rules
//!
//! - No implicit type coercions between variants
//! - `Int(1) != Float(1.0)` - different types are NEVER equal
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//!
//! ## Cycles
//!
//! Object fields may point back at the object (directly or through other
//! objects). Equality, `Debug` and JSON conversion walk object graphs with a
//! per-thread visit set, so cyclic graphs terminate: a pair of instances
//! already under comparison counts as equal, and an instance already being
//! formatted or converted is cut short.

use crate::class::{ClassHandle, ClassRegistry};
use crate::error::Result;
use crate::semantic_type::{classify_value, SemanticType};
use parking_lot::RwLock;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Runtime value passed to and returned from closures
#[derive(Debug, Clone)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Instance of a registered class
    Object(ObjectRef),
    /// External handle (open or closed)
    Handle(HandleRef),
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Handle(a), Value::Handle(b)) => a == b,
            // Different types are NEVER equal
            _ => false,
        }
    }
}

impl Value {
    /// Semantic category of this value
    pub fn semantic_type(&self) -> SemanticType {
        classify_value(self)
    }

    /// Canonical category name (`"integer"`, `"resource (closed)"`, ...)
    pub fn type_name(&self) -> &'static str {
        self.semantic_type().canonical_name()
    }

    /// Name used in diagnostics: the class name for objects, the category
    /// name for everything else
    pub fn describe(&self) -> String {
        match self {
            Value::Object(object) => object.class().name().to_string(),
            other => other.type_name().to_string(),
        }
    }

    /// Class of this value, if it is an object
    pub fn class(&self) -> Option<&ClassHandle> {
        self.as_object().map(ObjectRef::class)
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is a boolean value
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Check if this is an integer value
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Check if this is a float value
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Check if this is a string value
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if this is an array value
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if this is an object value
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Check if this is a handle value
    pub fn is_handle(&self) -> bool {
        matches!(self, Value::Handle(_))
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[Value] if this is an Array value
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get as &ObjectRef if this is an Object value
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get as &HandleRef if this is a Handle value
    pub fn as_handle(&self) -> Option<&HandleRef> {
        match self {
            Value::Handle(h) => Some(h),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(object) => write!(f, "{}", object.class()),
            Value::Handle(handle) => write!(f, "{}({})", handle.kind(), handle.state_name()),
        }
    }
}

// ============================================================================
// Objects
// ============================================================================

/// Shared reference to a class instance
///
/// Field access goes through an `RwLock`, so an instance can be read and
/// mutated through any alias from any thread.
#[derive(Clone)]
pub struct ObjectRef {
    class: ClassHandle,
    fields: Arc<RwLock<BTreeMap<String, Value>>>,
}

impl ObjectRef {
    /// Create an instance with no fields
    pub fn new(class: ClassHandle) -> Self {
        Self::with_fields(class, std::iter::empty::<(String, Value)>())
    }

    /// Create an instance with initial fields
    pub fn with_fields<K, V>(class: ClassHandle, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let fields = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            class,
            fields: Arc::new(RwLock::new(fields)),
        }
    }

    /// Create an empty instance of a registered class
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedTypeName` if the class is not registered.
    pub fn instantiate(class_name: &str) -> Result<Self> {
        Ok(Self::new(ClassRegistry::resolve(class_name)?))
    }

    /// Class of this instance
    pub fn class(&self) -> &ClassHandle {
        &self.class
    }

    /// Read a field
    pub fn get(&self, field: &str) -> Option<Value> {
        self.fields.read().get(field).cloned()
    }

    /// Write a field, visible through every alias of this instance
    pub fn set(&self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.write().insert(field.into(), value.into());
    }

    /// Snapshot of all fields
    pub fn fields(&self) -> BTreeMap<String, Value> {
        self.fields.read().clone()
    }

    /// Check if both references point at the same instance
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.fields) as usize
    }

    /// Copy this instance into a new, independent one (shallow field copy)
    pub fn duplicate(&self) -> ObjectRef {
        Self {
            class: self.class.clone(),
            fields: Arc::new(RwLock::new(self.fields())),
        }
    }
}

thread_local! {
    static VISITING: RefCell<HashSet<(usize, usize)>> = RefCell::new(HashSet::new());
}

/// Marks a pair of instances as being walked further up the stack
struct VisitGuard((usize, usize));

impl VisitGuard {
    /// `None` if the pair is already being walked
    fn enter(a: &ObjectRef, b: &ObjectRef) -> Option<Self> {
        let key = (a.addr(), b.addr());
        VISITING
            .with(|visiting| visiting.borrow_mut().insert(key))
            .then_some(VisitGuard(key))
    }
}

impl Drop for VisitGuard {
    fn drop(&mut self) {
        VISITING.with(|visiting| {
            visiting.borrow_mut().remove(&self.0);
        });
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if self.class != other.class {
            return false;
        }
        let Some(_guard) = VisitGuard::enter(self, other) else {
            return true;
        };
        // Snapshots: no field lock is held while nested objects are compared
        self.fields() == other.fields()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("ObjectRef");
        out.field("class", &self.class.name());
        match VisitGuard::enter(self, self) {
            Some(_guard) => out.field("fields", &self.fields()).finish(),
            None => out.finish_non_exhaustive(),
        }
    }
}

// ============================================================================
// Handles
// ============================================================================

#[derive(Debug)]
struct HandleInner {
    kind: String,
    closed: AtomicBool,
}

/// Shared reference to an external handle (stream, socket, process, ...)
///
/// A handle starts open and can be closed once; closing is observed by every
/// alias.
#[derive(Debug, Clone)]
pub struct HandleRef(Arc<HandleInner>);

impl HandleRef {
    /// Create an open handle of the given kind
    pub fn open(kind: impl Into<String>) -> Self {
        Self(Arc::new(HandleInner {
            kind: kind.into(),
            closed: AtomicBool::new(false),
        }))
    }

    /// Handle kind (e.g. `"stream"`)
    pub fn kind(&self) -> &str {
        &self.0.kind
    }

    /// Close the handle; returns `false` if it was already closed
    pub fn close(&self) -> bool {
        !self.0.closed.swap(true, Ordering::AcqRel)
    }

    /// Check if the handle has been closed
    pub fn is_closed(&self) -> bool {
        self.0.closed.load(Ordering::Acquire)
    }

    fn state_name(&self) -> &'static str {
        if self.is_closed() {
            "closed"
        } else {
            "open"
        }
    }
}

impl PartialEq for HandleRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Value::Object(o)
    }
}

impl From<HandleRef> for Value {
    fn from(h: HandleRef) -> Self {
        Value::Handle(h)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// ============================================================================
// serde_json interop for ergonomic value construction
// ============================================================================

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    // u64 beyond i64::MAX and fractional numbers
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Object(ObjectRef::with_fields(
                ClassRegistry::std_class(),
                obj.into_iter().map(|(k, v)| (k, Value::from(v))),
            )),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(obj) => object_to_json(&obj),
            // Handles have no JSON representation
            Value::Handle(_) => serde_json::Value::Null,
        }
    }
}

/// An instance reached again through its own fields converts to null
fn object_to_json(obj: &ObjectRef) -> serde_json::Value {
    let Some(_guard) = VisitGuard::enter(obj, obj) else {
        return serde_json::Value::Null;
    };
    serde_json::Value::Object(
        obj.fields()
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::from(v)))
            .collect(),
    )
}
