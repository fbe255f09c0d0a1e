//! Tableau simplex method for linear programs in standard maximization form.
//!
//! ```text
//! maximize   c^T x
//! subject to A x <= b, x >= 0
//! ```
//!
//! with `b >= 0`, so the all-slack basis is a feasible start.

mod error;
mod problem;
mod solution;
mod solver;
mod tableau;
mod variable;

pub use crate::error::{Result, SimplexError};
pub use crate::problem::StandardForm;
pub use crate::solution::Solution;
pub use crate::solver::{simplex, Observer, Simplex, SimplexOptions, Step, Trace, TraceEntry, EPS};
pub use crate::tableau::{Pivot, Tableau};
pub use crate::variable::{Variable, OBJECTIVE_LABEL};
