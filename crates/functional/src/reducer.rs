//! Reducers: one-argument closures that produce a number

use contracts_core::{Result, Value};
use contracts_invoke::{Closure, ClosureContract};

/// Reduces a value to an integer
#[derive(Debug, Clone)]
pub struct ToIntFunction {
    contract: ClosureContract,
}

impl ToIntFunction {
    /// Parameter count the closure must declare
    pub const ARITY: usize = 1;

    /// Wrap a closure
    ///
    /// The declared type is kept on the contract but never validated.
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` unless the closure takes exactly one parameter.
    pub fn of(closure: Closure, declared_type: Option<&str>) -> Result<Self> {
        Ok(Self {
            contract: ClosureContract::new(closure, Self::ARITY, declared_type)?,
        })
    }

    /// Apply the closure; the result must be an integer
    pub fn apply_as_int(&self, value: Value) -> Result<i64> {
        match self.contract.invoke("apply_as_int", vec![value])? {
            Value::Int(n) => Ok(n),
            other => Err(self.contract.return_mismatch("apply_as_int", "int", &other)),
        }
    }
}

/// Reduces a value to a float
///
/// Integer results are widened unless `widen_int_to_float` is disabled.
#[derive(Debug, Clone)]
pub struct ToFloatFunction {
    contract: ClosureContract,
}

impl ToFloatFunction {
    /// Parameter count the closure must declare
    pub const ARITY: usize = 1;

    /// Wrap a closure
    ///
    /// The declared type is kept on the contract but never validated.
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` unless the closure takes exactly one parameter.
    pub fn of(closure: Closure, declared_type: Option<&str>) -> Result<Self> {
        Ok(Self {
            contract: ClosureContract::new(closure, Self::ARITY, declared_type)?,
        })
    }

    /// Apply the closure; the result must be a float
    pub fn apply_as_float(&self, value: Value) -> Result<f64> {
        match self.contract.invoke("apply_as_float", vec![value])? {
            Value::Float(x) => Ok(x),
            Value::Int(n) if self.contract.config().widen_int_to_float => Ok(n as f64),
            other => Err(self
                .contract
                .return_mismatch("apply_as_float", "float", &other)),
        }
    }

    #[cfg(test)]
    fn with_config(mut self, config: contracts_invoke::ContractConfig) -> Self {
        self.contract = self
            .contract
            .with_config(std::sync::Arc::new(config))
            .unwrap();
        self
    }
}
