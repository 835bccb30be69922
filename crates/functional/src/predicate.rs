//! Predicates: one-argument closures that answer yes or no

use contracts_core::{Result, Value};
use contracts_invoke::{Closure, ClosureContract};

/// Tests one value
///
/// A declared type is accepted but ignored. The only check on the result is
/// the one any `bool`-returning method imposes: a non-boolean result is a
/// type error.
#[derive(Debug, Clone)]
pub struct Predicate {
    contract: ClosureContract,
}

impl Predicate {
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

    /// Evaluate the predicate, returning the closure's boolean unmodified
    pub fn test(&self, value: Value) -> Result<bool> {
        match self.contract.invoke("test", vec![value])? {
            Value::Bool(answer) => Ok(answer),
            other => Err(self.contract.return_mismatch("test", "bool", &other)),
        }
    }
}
