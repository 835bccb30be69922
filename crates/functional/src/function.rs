//! Transformers: closures that map their arguments to a value
//!
//! All three shapes validate only the result, and only after the closure has
//! returned. Arguments are never checked against the declared type here.

use contracts_core::{Result, Value};
use contracts_invoke::{Closure, ClosureContract};

/// Maps one value to another
#[derive(Debug, Clone)]
pub struct Function {
    contract: ClosureContract,
}

impl Function {
    /// Parameter count the closure must declare
    pub const ARITY: usize = 1;

    /// Wrap a closure
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` unless the closure takes exactly one parameter.
    pub fn of(closure: Closure, declared_type: Option<&str>) -> Result<Self> {
        Ok(Self {
            contract: ClosureContract::new(closure, Self::ARITY, declared_type)?,
        })
    }

    /// Apply the closure, validating the result against the declared type
    pub fn apply(&self, value: Value) -> Result<Value> {
        let result = self.contract.invoke("apply", vec![value])?;
        self.contract.validate_declared(&result)?;
        Ok(result)
    }

    pub(crate) fn contract(&self) -> &ClosureContract {
        &self.contract
    }

    #[cfg(test)]
    pub(crate) fn with_config(self, config: contracts_invoke::ContractConfig) -> Self {
        Self {
            contract: self
                .contract
                .with_config(std::sync::Arc::new(config))
                .unwrap(),
        }
    }
}

/// Maps a raw integer to a value
#[derive(Debug, Clone)]
pub struct IntFunction {
    contract: ClosureContract,
}

impl IntFunction {
    /// Parameter count the closure must declare
    pub const ARITY: usize = 1;

    /// Wrap a closure
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` unless the closure takes exactly one parameter.
    pub fn of(closure: Closure, declared_type: Option<&str>) -> Result<Self> {
        Ok(Self {
            contract: ClosureContract::new(closure, Self::ARITY, declared_type)?,
        })
    }

    /// Apply the closure to an integer
    pub fn apply(&self, value: i64) -> Result<Value> {
        let result = self.contract.invoke("apply", vec![Value::Int(value)])?;
        self.contract.validate_declared(&result)?;
        Ok(result)
    }
}

/// Maps two values to a value
///
/// The operands need not share a type; see `BinaryOperator` for the
/// same-type variant.
#[derive(Debug, Clone)]
pub struct BiFunction {
    contract: ClosureContract,
}

impl BiFunction {
    /// Parameter count the closure must declare
    pub const ARITY: usize = 2;

    /// Wrap a closure
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` unless the closure takes exactly two parameters.
    pub fn of(closure: Closure, declared_type: Option<&str>) -> Result<Self> {
        Ok(Self {
            contract: ClosureContract::new(closure, Self::ARITY, declared_type)?,
        })
    }

    /// Apply the closure, validating the result against the declared type
    pub fn apply(&self, left: Value, right: Value) -> Result<Value> {
        let result = self.contract.invoke("apply", vec![left, right])?;
        self.contract.validate_declared(&result)?;
        Ok(result)
    }

    pub(crate) fn contract(&self) -> &ClosureContract {
        &self.contract
    }

    #[cfg(test)]
    pub(crate) fn with_config(self, config: contracts_invoke::ContractConfig) -> Self {
        Self {
            contract: self
                .contract
                .with_config(std::sync::Arc::new(config))
                .unwrap(),
        }
    }
}
