//! Semantic type classification
//!
//! Every value and every declared type name is funneled into one fixed
//! vocabulary, so the layers above compare types with plain equality.
//!
//! ## Categories and name synonyms
//!
//! | Category | Canonical name | Accepted synonyms |
//! |----------|----------------|-------------------|
//! | Boolean | `boolean` | `bool` |
//! | Integer | `integer` | `int` |
//! | Float | `float` | `double` |
//! | String | `string` | |
//! | Array | `array` | |
//! | Object | `object` | |
//! | ExternalHandle | `resource` | |
//! | ClosedHandle | `resource (closed)` | |
//! | Null | `null` | `void` |
//! | Unknown | `unknown type` | |
//!
//! Names are matched case-insensitively. Class names are NOT categories:
//! [`classify_name`] rejects them, and class identity is checked one level up.

use crate::error::{Error, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic type categories
///
/// ## Invariant
///
/// This enum is closed. Adding a runtime value kind requires adding a
/// variant here, and every `match` on it is checked by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    /// `true` / `false`
    Boolean,
    /// 64-bit signed integer
    Integer,
    /// 64-bit float
    Float,
    /// UTF-8 string
    String,
    /// Ordered list of values
    Array,
    /// Instance of a registered class
    Object,
    /// Open external handle
    ExternalHandle,
    /// External handle that has been closed
    ClosedHandle,
    /// Absence of a value
    Null,
    /// Anything outside the categories above
    Unknown,
}

impl SemanticType {
    /// All categories (for iteration)
    pub const ALL: [SemanticType; 10] = [
        SemanticType::Boolean,
        SemanticType::Integer,
        SemanticType::Float,
        SemanticType::String,
        SemanticType::Array,
        SemanticType::Object,
        SemanticType::ExternalHandle,
        SemanticType::ClosedHandle,
        SemanticType::Null,
        SemanticType::Unknown,
    ];

    /// Get all categories as a slice
    pub fn all() -> &'static [SemanticType] {
        &Self::ALL
    }

    /// Canonical name, as reported for values
    pub const fn canonical_name(&self) -> &'static str {
        match self {
            SemanticType::Boolean => "boolean",
            SemanticType::Integer => "integer",
            SemanticType::Float => "float",
            SemanticType::String => "string",
            SemanticType::Array => "array",
            SemanticType::Object => "object",
            SemanticType::ExternalHandle => "resource",
            SemanticType::ClosedHandle => "resource (closed)",
            SemanticType::Null => "null",
            SemanticType::Unknown => "unknown type",
        }
    }

    /// Every name (canonical first) that resolves to this category
    pub const fn synonyms(&self) -> &'static [&'static str] {
        match self {
            SemanticType::Boolean => &["boolean", "bool"],
            SemanticType::Integer => &["integer", "int"],
            SemanticType::Float => &["float", "double"],
            SemanticType::String => &["string"],
            SemanticType::Array => &["array"],
            SemanticType::Object => &["object"],
            SemanticType::ExternalHandle => &["resource"],
            SemanticType::ClosedHandle => &["resource (closed)"],
            SemanticType::Null => &["null", "void"],
            SemanticType::Unknown => &["unknown type"],
        }
    }

    /// Parse a name, returning `None` when it is not a category name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "boolean" | "bool" => Some(SemanticType::Boolean),
            "integer" | "int" => Some(SemanticType::Integer),
            "float" | "double" => Some(SemanticType::Float),
            "string" => Some(SemanticType::String),
            "array" => Some(SemanticType::Array),
            "object" => Some(SemanticType::Object),
            "resource" => Some(SemanticType::ExternalHandle),
            "resource (closed)" => Some(SemanticType::ClosedHandle),
            "null" | "void" => Some(SemanticType::Null),
            "unknown type" => Some(SemanticType::Unknown),
            _ => None,
        }
    }

    /// Check if values of this category have class identity
    pub const fn is_composite(&self) -> bool {
        matches!(self, SemanticType::Object)
    }

    /// Check if this is one of the handle states
    pub const fn is_handle(&self) -> bool {
        matches!(
            self,
            SemanticType::ExternalHandle | SemanticType::ClosedHandle
        )
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Classify a runtime value by its intrinsic tag
///
/// Never fails.
pub fn classify_value(value: &Value) -> SemanticType {
    match value {
        Value::Null => SemanticType::Null,
        Value::Bool(_) => SemanticType::Boolean,
        Value::Int(_) => SemanticType::Integer,
        Value::Float(_) => SemanticType::Float,
        Value::String(_) => SemanticType::String,
        Value::Array(_) => SemanticType::Array,
        Value::Object(_) => SemanticType::Object,
        Value::Handle(handle) if handle.is_closed() => SemanticType::ClosedHandle,
        Value::Handle(_) => SemanticType::ExternalHandle,
    }
}

/// Classify a declared type name
///
/// # Errors
///
/// Returns `UnrecognizedTypeName` for any name outside the synonym table,
/// including the empty string and class names.
pub fn classify_name(name: &str) -> Result<SemanticType> {
    SemanticType::from_name(name).ok_or_else(|| Error::unrecognized(name))
}

/// Map a category name to its canonical synonym
///
/// # Errors
///
/// Returns `UnrecognizedTypeName` if `name` is not a category name.
pub fn canonical_synonym(name: &str) -> Result<&'static str> {
    classify_name(name).map(|t| t.canonical_name())
}
