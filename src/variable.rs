use std::fmt;

use serde::{Deserialize, Serialize};

/// A column of the tableau other than the right-hand side.
///
/// Indices are zero-based; `Display` renders them one-based (`X1`, `S1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variable {
    Decision(usize),
    Slack(usize),
}

/// Label of the objective row in the basis vector.
pub const OBJECTIVE_LABEL: &str = "Z";

impl Variable {
    /// Variable stored in `column` of a tableau with `num_decision` decision variables.
    pub fn from_column(column: usize, num_decision: usize) -> Self {
        if column < num_decision {
            Variable::Decision(column)
        } else {
            Variable::Slack(column - num_decision)
        }
    }

    pub fn column(&self, num_decision: usize) -> usize {
        match *self {
            Variable::Decision(j) => j,
            Variable::Slack(i) => num_decision + i,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Decision(j) => write!(f, "X{}", j + 1),
            Variable::Slack(i) => write!(f, "S{}", i + 1),
        }
    }
}
