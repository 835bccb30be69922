//! Core types for closure contracts
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: Dynamic value model closures operate on (objects and handles by reference)
//! - SemanticType: Closed set of type categories, with the value/name classifier
//! - ClassHandle / ClassRegistry: Class identity for composite values
//! - Error: Contract violation hierarchy and the raw `CallError`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod class;
pub mod error;
pub mod semantic_type;
pub mod value;

pub use class::{ClassDef, ClassHandle, ClassRegistry, STD_CLASS};
pub use error::{CallError, Error, FunctionalTypeError, Result};
pub use semantic_type::{canonical_synonym, classify_name, classify_value, SemanticType};
pub use value::{HandleRef, ObjectRef, Value};
