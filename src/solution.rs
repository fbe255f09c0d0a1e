use std::fmt;

use crate::tableau::Tableau;
use crate::variable::Variable;

/// Optimum read off a terminal tableau.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub objective: f64,
    /// Decision variable values, `x[j]` for `X(j+1)`.
    pub x: Vec<f64>,
    pub slack: Vec<f64>,
    pub iterations: usize,
    pub tableau: Tableau,
}

impl Solution {
    pub fn from_tableau(tableau: Tableau, iterations: usize, eps: f64) -> Self {
        let (x, slack) = tableau.variable_values(eps);
        Solution {
            objective: tableau.objective_value(),
            x,
            slack,
            iterations,
            tableau,
        }
    }

    pub fn values(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.x
            .iter()
            .enumerate()
            .map(|(j, &xj)| (Variable::Decision(j), xj))
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "optimum: {}", self.objective)?;
        for (variable, value) in self.values() {
            writeln!(f, "{} = {}", variable, value)?;
        }
        Ok(())
    }
}
