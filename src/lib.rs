//! closure-contracts - arity- and type-checked functional wrappers
//!
//! Wraps dynamically typed closures in single-method shapes (supplier,
//! consumer, function, predicate, operators, ...) that check the closure's
//! arity once, at construction, and check arguments and results on every
//! call.
//!
//! # Quick Start
//!
//! ```ignore
//! use closure_contracts::{ClassDef, ClassRegistry, Closure, ObjectRef, UnaryOperator, Value};
//!
//! ClassRegistry::register(ClassDef::new("Point"))?;
//!
//! // No declared type: the first result's type is adopted
//! let identity = UnaryOperator::of(Closure::unary(|v| v), None)?;
//! identity.apply(Value::Object(ObjectRef::instantiate("Point")?))?;
//!
//! // Any later operand of another type is rejected
//! assert!(identity.apply(Value::Int(1)).is_err());
//! ```
//!
//! # Architecture
//!
//! - `contracts-core`: value model, type classifier, class registry, errors
//! - `contracts-invoke`: closure signatures, contracts, error translation, config
//! - `contracts-functional`: the typed wrappers
//!
//! Everything callers need is re-exported from the wrapper crate.

// Re-export the public API from contracts-functional
pub use contracts_functional::*;
