//! Closure invocation under contract
//!
//! This crate sits between the value model and the typed wrappers:
//! - Closure: Body plus declared signature, checked at the call boundary
//! - ClosureContract: Arity fixed at creation, translated invocation, type validation
//! - DeclaredType: Declared type names resolved to categories or classes
//! - ErrorTranslator: Strips host-internal detail from raw type errors
//! - ContractConfig: `contracts.toml` settings and the process-wide default

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod closure;
pub mod config;
pub mod contract;
pub mod declared;
pub mod translate;

pub use closure::{
    ArityError, CallFrame, Closure, ClosureBuilder, ClosureFn, Param, Signature,
    DEFAULT_CLOSURE_NAME, WRAPPER_MARKER,
};
pub use config::{ContractConfig, CONFIG_FILE_NAME, DEFAULT_WRAPPER_PLACEHOLDER};
pub use contract::ClosureContract;
pub use declared::{validate_type, DeclaredType};
pub use translate::ErrorTranslator;
