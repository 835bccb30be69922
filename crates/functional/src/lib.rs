//! Typed functional wrappers over dynamically typed closures
//!
//! Each wrapper fixes a call shape (arity, argument and result policy) and
//! exposes one invocation method plus an `of(closure, declared_type)`
//! constructor. Shapes whose checks column says "none" or names a primitive
//! kind accept a declared type but never validate against it:
//!
//! | Wrapper | Arity | Method | Checks |
//! |---------|-------|--------|--------|
//! | [`Supplier`] | 0 | `get` | result vs. declared type |
//! | [`Runnable`] | 0 | `run` | none |
//! | [`Consumer`] | 1 | `accept` | none |
//! | [`Function`] | 1 | `apply` | result vs. declared type |
//! | [`IntFunction`] | 1 | `apply` | result vs. declared type |
//! | [`Predicate`] | 1 | `test` | result must be boolean |
//! | [`ToIntFunction`] | 1 | `apply_as_int` | result must be integer |
//! | [`ToFloatFunction`] | 1 | `apply_as_float` | result must be float |
//! | [`UnaryOperator`] | 1 | `apply` | operand and result vs. declared/learned type, after call |
//! | [`BiConsumer`] | 2 | `accept` | none |
//! | [`BiFunction`] | 2 | `apply` | result vs. declared type |
//! | [`BinaryOperator`] | 2 | `apply` | both operands before the call, result after |
//!
//! # Example
//!
//! ```ignore
//! use contracts_functional::{BinaryOperator, Closure, Value};
//!
//! let add = BinaryOperator::of(
//!     Closure::binary(|a, b| a.as_int().unwrap_or(0) + b.as_int().unwrap_or(0)),
//!     Some("int"),
//! )?;
//! assert_eq!(add.apply(Value::Int(2), Value::Int(3))?, Value::Int(5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod consumer;
pub mod function;
pub mod operator;
pub mod predicate;
pub mod reducer;
pub mod supplier;

pub use consumer::{BiConsumer, Consumer};
pub use function::{BiFunction, Function, IntFunction};
pub use operator::{BinaryOperator, TypeState, UnaryOperator};
pub use predicate::Predicate;
pub use reducer::{ToFloatFunction, ToIntFunction};
pub use supplier::{Runnable, Supplier};

// Re-export the building blocks wrappers are made from
pub use contracts_core::{
    canonical_synonym, classify_name, classify_value, CallError, ClassDef, ClassHandle,
    ClassRegistry, Error, FunctionalTypeError, HandleRef, ObjectRef, Result, SemanticType, Value,
};
pub use contracts_invoke::{
    validate_type, Closure, ClosureBuilder, ClosureContract, ContractConfig, DeclaredType,
    ErrorTranslator, CONFIG_FILE_NAME,
};
