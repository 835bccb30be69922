//! Declared type resolution and validation
//!
//! A declared type name resolves to either a semantic category or a
//! registered class. Category names are tried first; they are reserved and
//! can never be class names, so the order is unambiguous.
//!
//! | Value | Declared | Passes when |
//! |-------|----------|-------------|
//! | object | class `C` | the value's class IS `C` (no subclasses) |
//! | object | category | never |
//! | other | category `T` | `classify_value(value) == T` |
//! | other | class | never |

use contracts_core::{
    classify_value, ClassHandle, ClassRegistry, Error, Result, SemanticType, Value,
};
use std::fmt;

/// A resolved declared type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// One of the semantic categories
    Category(SemanticType),
    /// A registered class, compared by identity
    Class(ClassHandle),
}

impl DeclaredType {
    /// Resolve a declared type name
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedTypeName` if `name` is neither a category name
    /// nor a registered class.
    pub fn resolve(name: &str) -> Result<Self> {
        if let Some(category) = SemanticType::from_name(name) {
            return Ok(DeclaredType::Category(category));
        }
        ClassRegistry::lookup(name)
            .map(DeclaredType::Class)
            .ok_or_else(|| Error::unrecognized(name))
    }

    /// The exact type of a value: its class for objects, its category otherwise
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Object(object) => DeclaredType::Class(object.class().clone()),
            other => DeclaredType::Category(classify_value(other)),
        }
    }

    /// Check a value against this type
    pub fn admits(&self, value: &Value) -> bool {
        match (value, self) {
            (Value::Object(object), DeclaredType::Class(class)) => object.class() == class,
            (Value::Object(_), DeclaredType::Category(_)) => false,
            (_, DeclaredType::Class(_)) => false,
            (other, DeclaredType::Category(category)) => classify_value(other) == *category,
        }
    }

    /// Name that resolves back to this type
    pub fn name(&self) -> &str {
        match self {
            DeclaredType::Category(category) => category.canonical_name(),
            DeclaredType::Class(class) => class.name(),
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validate a value against a declared type name
///
/// # Errors
///
/// - `UnrecognizedTypeName` if `declared` does not resolve
/// - `FunctionalType` if the value does not satisfy the resolved type
pub fn validate_type(value: &Value, declared: &str) -> Result<()> {
    let expected = DeclaredType::resolve(declared)?;
    check(value, &expected)
}

pub(crate) fn check(value: &Value, expected: &DeclaredType) -> Result<()> {
    if expected.admits(value) {
        Ok(())
    } else {
        Err(Error::functional_type(format!(
            "value must be of type {}, {} given",
            expected,
            value.describe()
        )))
    }
}
