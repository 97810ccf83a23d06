use crate::Chemistry::equation::Equation;
use thiserror::Error;

pub type ChemResult<T> = Result<T, ChemError>;

/// error types for species, quantities, equations and the sieve
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChemError {
    #[error("A molecule must contain at least one element")]
    InvalidComposition,
    #[error("Cannot combine a quantity of {left} with a quantity of {right}")]
    MoleculeMismatch { left: String, right: String },
    #[error("Volume must be positive, got {0}")]
    InvalidVolume(f64),
    #[error("Amount must be finite and non-negative, got {0}")]
    InvalidAmount(f64),
    #[error("Stoichiometric ratio must be at least 1")]
    InvalidRatio,
    #[error("Unknown element with atomic number {0}")]
    UnknownElement(u32),
    #[error("Cannot parse formula '{formula}': {reason}")]
    InvalidFormula { formula: String, reason: String },
    #[error("Equation '{0}' cannot be balanced")]
    Unbalanceable(Box<Equation>),
    #[error("Equation '{0}' is not balanced")]
    UnbalancedEquation(Box<Equation>),
    #[error("Balancing stopped after {0} search steps")]
    SearchLimitExceeded(u64),
}
