//! Consumers: one- and two-argument closures run for their side effects

use contracts_core::{Result, Value};
use contracts_invoke::{Closure, ClosureContract};

/// Accepts one value
#[derive(Debug, Clone)]
pub struct Consumer {
    contract: ClosureContract,
}

impl Consumer {
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

    /// Pass a value to the closure
    pub fn accept(&self, value: Value) -> Result<()> {
        self.contract.invoke("accept", vec![value]).map(drop)
    }
}

/// Accepts two values
#[derive(Debug, Clone)]
pub struct BiConsumer {
    contract: ClosureContract,
}

impl BiConsumer {
    /// Parameter count the closure must declare
    pub const ARITY: usize = 2;

    /// Wrap a closure
    ///
    /// The declared type is kept on the contract but never validated.
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` unless the closure takes exactly two parameters.
    pub fn of(closure: Closure, declared_type: Option<&str>) -> Result<Self> {
        Ok(Self {
            contract: ClosureContract::new(closure, Self::ARITY, declared_type)?,
        })
    }

    /// Pass two values to the closure
    pub fn accept(&self, left: Value, right: Value) -> Result<()> {
        self.contract.invoke("accept", vec![left, right]).map(drop)
    }
}
