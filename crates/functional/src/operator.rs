//! Same-type operators
//!
//! Both operators constrain their operands and their result to one type.
//! They differ in WHEN operands are checked:
//!
//! - [`BinaryOperator`] checks both operands before the closure runs, so a
//!   mismatched operand is rejected before any side effect happens.
//! - [`UnaryOperator`] checks after the closure has run, because without a
//!   declared type the type is only known from the first result.
//!
//! ## Type learning
//!
//! A `UnaryOperator` built without a declared type moves through
//! `Unset -> Learned(type)` exactly once, after the first invocation that
//! returns. The transition happens under a write lock and the first writer
//! wins: callers racing on a fresh operator all validate against the same
//! learned type.

use crate::function::{BiFunction, Function};
use contracts_core::{Result, Value};
use contracts_invoke::{Closure, DeclaredType};
use parking_lot::RwLock;
use tracing::debug;

/// Combines two values of one type into a value of that type
#[derive(Debug, Clone)]
pub struct BinaryOperator {
    function: BiFunction,
}

impl BinaryOperator {
    /// Parameter count the closure must declare
    pub const ARITY: usize = BiFunction::ARITY;

    /// Wrap a closure
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` unless the closure takes exactly two parameters.
    pub fn of(closure: Closure, declared_type: Option<&str>) -> Result<Self> {
        Ok(Self {
            function: BiFunction::of(closure, declared_type)?,
        })
    }

    /// Validate both operands, apply the closure, validate the result
    pub fn apply(&self, left: Value, right: Value) -> Result<Value> {
        let contract = self.function.contract();
        if let Some(expected) = contract.resolve_declared()? {
            contract.validate_resolved(&left, &expected)?;
            contract.validate_resolved(&right, &expected)?;
        }
        self.function.apply(left, right)
    }

    #[cfg(test)]
    fn with_config(self, config: contracts_invoke::ContractConfig) -> Self {
        Self {
            function: self.function.with_config(config),
        }
    }
}

/// Learned-type state of a [`UnaryOperator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeState {
    /// No call has completed yet; nothing is enforced
    Unset,
    /// Type adopted from the first result
    Learned(DeclaredType),
}

/// Maps a value to a value of the same type
///
/// A clone starts from the original's current [`TypeState`] and learns
/// independently afterwards.
#[derive(Debug)]
pub struct UnaryOperator {
    function: Function,
    state: RwLock<TypeState>,
}

impl Clone for UnaryOperator {
    fn clone(&self) -> Self {
        Self {
            function: self.function.clone(),
            state: RwLock::new(self.state()),
        }
    }
}

impl UnaryOperator {
    /// Parameter count the closure must declare
    pub const ARITY: usize = Function::ARITY;

    /// Wrap a closure
    ///
    /// Without a declared type, the type of the first result is adopted.
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` unless the closure takes exactly one parameter.
    pub fn of(closure: Closure, declared_type: Option<&str>) -> Result<Self> {
        Ok(Self {
            function: Function::of(closure, declared_type)?,
            state: RwLock::new(TypeState::Unset),
        })
    }

    /// Apply the closure, then validate operand and result against the
    /// declared or learned type
    pub fn apply(&self, value: Value) -> Result<Value> {
        let contract = self.function.contract();
        let result = contract.invoke("apply", vec![value.clone()])?;

        let expected = match contract.declared_type() {
            Some(_) => contract.resolve_declared()?,
            None => Some(self.learn(&result)),
        };
        if let Some(expected) = expected {
            contract.validate_resolved(&value, &expected)?;
            contract.validate_resolved(&result, &expected)?;
        }
        Ok(result)
    }

    #[cfg(test)]
    fn with_config(self, config: contracts_invoke::ContractConfig) -> Self {
        Self {
            function: self.function.with_config(config),
            state: self.state,
        }
    }

    /// Current learned-type state
    ///
    /// Always `Unset` for operators built with a declared type.
    pub fn state(&self) -> TypeState {
        self.state.read().clone()
    }

    /// Adopt the type of `result` unless a type was already learned
    fn learn(&self, result: &Value) -> DeclaredType {
        if let TypeState::Learned(learned) = &*self.state.read() {
            return learned.clone();
        }

        let mut state = self.state.write();
        match &*state {
            // Another caller completed the transition first
            TypeState::Learned(learned) => learned.clone(),
            TypeState::Unset => {
                let learned = DeclaredType::of_value(result);
                debug!(
                    target: "closures::functional",
                    closure = self.function.contract().closure().name(),
                    learned = %learned,
                    "Unary operator learned its type"
                );
                *state = TypeState::Learned(learned.clone());
                learned
            }
        }
    }
}
