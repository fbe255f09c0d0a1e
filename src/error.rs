use thiserror::Error;

use crate::variable::Variable;

pub type Result<T> = std::result::Result<T, SimplexError>;

/// Failures surfaced by the tableau engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimplexError {
    /// Dimensions of c, A and b disagree, or a coefficient is not finite.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Some right-hand side is negative, so x = 0 is not a feasible start.
    #[error("infeasible initial basis: b[{row}] = {value} is negative")]
    InfeasibleInitialBasis { row: usize, value: f64 },

    /// The entering column has no positive entry in any constraint row.
    #[error("problem is unbounded: {entering} can increase without limit")]
    Unbounded { entering: Variable },

    #[error("iteration limit of {limit} reached before optimality")]
    IterationLimit { limit: usize },
}
