//! Error types for closure contracts
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! There are two layers:
//! - [`CallError`]: the raw failure a closure raises at its call boundary
//!   (a type mismatch or any other failure of the body)
//! - [`Error`]: the caller-facing contract violations

use thiserror::Error;

/// Result type alias for contract operations
pub type Result<T> = std::result::Result<T, Error>;

/// Raw failure raised while calling a closure
///
/// `Type` errors carry host-internal diagnostics (call sites, synthetic
/// wrapper names). They never reach callers directly: the contract layer
/// rewrites them into a [`FunctionalTypeError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// A value was rejected by a declared parameter or return type
    #[error("{0}")]
    Type(String),

    /// The closure body failed for a reason other than typing
    #[error("{0}")]
    Failed(String),
}

impl CallError {
    /// Create a type mismatch error
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        CallError::Type(message.into())
    }

    /// Create a generic body failure
    pub fn failed(message: impl Into<String>) -> Self {
        CallError::Failed(message.into())
    }

    /// Check if this is a type mismatch
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, CallError::Type(_))
    }
}

/// An argument or result failed type validation
///
/// The message is always free of host-internal detail. When the error was
/// produced by translating a raw call boundary failure, that failure is kept
/// as the [`std::error::Error::source`] of this one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FunctionalTypeError {
    message: String,
    #[source]
    cause: Option<CallError>,
}

impl FunctionalTypeError {
    /// Create an error with no underlying cause
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Create an error that wraps the raw failure it was derived from
    pub fn with_cause(message: impl Into<String>, cause: CallError) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause),
        }
    }

    /// The normalized message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The raw failure this error was translated from, if any
    pub fn cause(&self) -> Option<&CallError> {
        self.cause.as_ref()
    }
}

/// Contract violations and registry failures
///
/// | Variant | Raised at | Meaning |
/// |---------|-----------|---------|
/// | `ArityMismatch` | construction | closure shape does not fit the wrapper |
/// | `UnrecognizedTypeName` | name resolution | name is neither a category nor a class |
/// | `FunctionalType` | invocation | argument or result rejected |
/// | `ClosureFailed` | invocation | closure body raised a non-type failure |
/// | `ClassConflict` | registration | class redefined with a different parent |
/// | `Config` | configuration | unreadable or invalid configuration |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Closure parameter count differs from the required one, or could not
    /// be determined
    #[error("arity mismatch: expected {expected} parameter(s), {reason}")]
    ArityMismatch {
        /// Parameter count required by the wrapper
        expected: usize,
        /// Parameter count found, if it could be determined
        actual: Option<usize>,
        /// Human-readable cause
        reason: String,
    },

    /// Declared type name does not resolve to a category or class
    #[error("unrecognized type name: '{name}'")]
    UnrecognizedTypeName {
        /// The name as supplied
        name: String,
    },

    /// Argument or result failed validation
    #[error(transparent)]
    FunctionalType(#[from] FunctionalTypeError),

    /// Closure body failed for a reason other than typing
    #[error("closure {closure} failed: {reason}")]
    ClosureFailed {
        /// Closure name
        closure: String,
        /// Failure message raised by the body
        reason: String,
    },

    /// Class registered twice with incompatible definitions
    #[error("class conflict for '{name}': {reason}")]
    ClassConflict {
        /// Class name
        name: String,
        /// Why the definitions conflict
        reason: String,
    },

    /// Configuration could not be read or parsed
    #[error("configuration error: {reason}")]
    Config {
        /// Failure details
        reason: String,
    },
}

impl Error {
    /// Create an `UnrecognizedTypeName` error
    pub fn unrecognized(name: impl Into<String>) -> Self {
        Error::UnrecognizedTypeName { name: name.into() }
    }

    /// Create a `FunctionalType` error with no underlying cause
    pub fn functional_type(message: impl Into<String>) -> Self {
        Error::FunctionalType(FunctionalTypeError::new(message))
    }

    /// Create a `Config` error
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Check if this is an arity mismatch
    pub fn is_arity_mismatch(&self) -> bool {
        matches!(self, Error::ArityMismatch { .. })
    }

    /// Check if this is an unrecognized type name
    pub fn is_unrecognized_type_name(&self) -> bool {
        matches!(self, Error::UnrecognizedTypeName { .. })
    }

    /// Check if this is a functional type error
    pub fn is_functional_type(&self) -> bool {
        matches!(self, Error::FunctionalType(_))
    }
}
