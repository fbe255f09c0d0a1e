use serde::{Deserialize, Serialize};

use crate::error::{Result, SimplexError};

/// Standard form for LP
///
/// maximize   sum_{j} c[j] * x[j]
/// subject to sum_{j} a[i][j] * x[j] <= b[i] (for all i)
///            x[j] >= 0 (for all j)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStandardForm")]
pub struct StandardForm {
    c: Vec<f64>,
    a: Vec<Vec<f64>>,
    b: Vec<f64>,
}

#[derive(Deserialize)]
struct RawStandardForm {
    c: Vec<f64>,
    a: Vec<Vec<f64>>,
    b: Vec<f64>,
}

impl TryFrom<RawStandardForm> for StandardForm {
    type Error = SimplexError;

    fn try_from(raw: RawStandardForm) -> Result<Self> {
        StandardForm::new(raw.c, raw.a, raw.b)
    }
}

impl StandardForm {
    /// Checks that `a` is `b.len()` rows by `c.len()` columns and that every
    /// coefficient is finite. The sign of `b` is left to the tableau builder.
    pub fn new(c: Vec<f64>, a: Vec<Vec<f64>>, b: Vec<f64>) -> Result<Self> {
        let dimensions = c.len();
        let num_constraints = b.len();

        if a.len() != num_constraints {
            return Err(SimplexError::MalformedInput(format!(
                "A has {} rows but b has {} entries",
                a.len(),
                num_constraints
            )));
        }
        for (i, ai) in a.iter().enumerate() {
            if ai.len() != dimensions {
                return Err(SimplexError::MalformedInput(format!(
                    "row {} of A has {} columns but c has {} entries",
                    i,
                    ai.len(),
                    dimensions
                )));
            }
        }

        let all_finite = c
            .iter()
            .chain(b.iter())
            .chain(a.iter().flatten())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(SimplexError::MalformedInput(
                "coefficients must be finite".to_string(),
            ));
        }

        Ok(StandardForm { c, a, b })
    }

    /// n
    pub fn num_variables(&self) -> usize {
        self.c.len()
    }

    /// m
    pub fn num_constraints(&self) -> usize {
        self.b.len()
    }

    pub fn c(&self) -> &[f64] {
        &self.c
    }

    pub fn a(&self) -> &[Vec<f64>] {
        &self.a
    }

    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Value of c^T x.
    pub fn objective(&self, x: &[f64]) -> f64 {
        self.c.iter().zip(x).map(|(cj, xj)| cj * xj).sum()
    }
}
