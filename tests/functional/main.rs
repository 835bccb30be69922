//! Functional wrapper integration tests
//!
//! End-to-end behavior through the public facade:
//! - Arity checks at construction for every shape
//! - Type learning and same-type enforcement for operators
//! - Argument aliasing through object references
//! - Error translation as seen by callers
//! - Classifier synonym properties

mod common;

mod aliasing;
mod classifier;
mod errors;
mod operators;
