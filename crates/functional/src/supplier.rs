//! Zero-argument shapes: `Supplier` (produces a value) and `Runnable` (runs
//! for its side effects)

use contracts_core::{Result, Value};
use contracts_invoke::{Closure, ClosureContract};

/// Produces a value on each call
///
/// When a declared type is set, the produced value is validated after the
/// closure returns.
#[derive(Debug, Clone)]
pub struct Supplier {
    contract: ClosureContract,
}

impl Supplier {
    /// Parameter count the closure must declare
    pub const ARITY: usize = 0;

    /// Wrap a closure
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` unless the closure takes no parameters.
    pub fn of(closure: Closure, declared_type: Option<&str>) -> Result<Self> {
        Ok(Self {
            contract: ClosureContract::new(closure, Self::ARITY, declared_type)?,
        })
    }

    /// Produce a value
    pub fn get(&self) -> Result<Value> {
        let result = self.contract.invoke("get", Vec::new())?;
        self.contract.validate_declared(&result)?;
        Ok(result)
    }
}

/// Runs a closure for its side effects
#[derive(Debug, Clone)]
pub struct Runnable {
    contract: ClosureContract,
}

impl Runnable {
    /// Parameter count the closure must declare
    pub const ARITY: usize = 0;

    /// Wrap a closure
    ///
    /// The declared type is kept on the contract but never validated.
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` unless the closure takes no parameters.
    pub fn of(closure: Closure, declared_type: Option<&str>) -> Result<Self> {
        Ok(Self {
            contract: ClosureContract::new(closure, Self::ARITY, declared_type)?,
        })
    }

    /// Run the closure, discarding whatever it returns
    pub fn run(&self) -> Result<()> {
        self.contract.invoke("run", Vec::new()).map(drop)
    }
}
