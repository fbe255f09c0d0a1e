use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimplexError};
use crate::problem::StandardForm;
use crate::solution::Solution;
use crate::tableau::{Pivot, Tableau};
use crate::variable::Variable;

pub const EPS: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSimplexOptions")]
pub struct SimplexOptions {
    /// Tolerance for sign tests and unit-column detection.
    pub tolerance: f64,
    /// Upper bound on pivots. `None` runs until optimality, which may not
    /// terminate on degenerate problems.
    pub max_iterations: Option<usize>,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        SimplexOptions {
            tolerance: EPS,
            max_iterations: None,
        }
    }
}

impl SimplexOptions {
    /// The tolerance must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SimplexError::MalformedInput(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

fn default_tolerance() -> f64 {
    EPS
}

#[derive(Deserialize)]
struct RawSimplexOptions {
    #[serde(default = "default_tolerance")]
    tolerance: f64,
    #[serde(default)]
    max_iterations: Option<usize>,
}

impl TryFrom<RawSimplexOptions> for SimplexOptions {
    type Error = SimplexError;

    fn try_from(raw: RawSimplexOptions) -> Result<Self> {
        let options = SimplexOptions {
            tolerance: raw.tolerance,
            max_iterations: raw.max_iterations,
        };
        options.validate()?;
        Ok(options)
    }
}

/// State after one pivot, handed to an [`Observer`].
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    /// 1 for the first pivot.
    pub iteration: usize,
    pub pivot: &'a Pivot,
    pub tableau: &'a Tableau,
}

/// Receives the tableau as the solver progresses.
pub trait Observer {
    fn initial(&mut self, _tableau: &Tableau) {}

    fn pivoted(&mut self, step: &Step<'_>);
}

impl Observer for () {
    fn pivoted(&mut self, _step: &Step<'_>) {}
}

impl<F: FnMut(&Step<'_>)> Observer for F {
    fn pivoted(&mut self, step: &Step<'_>) {
        (*self)(step)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    pub iteration: usize,
    pub entering: Variable,
    pub leaving: Variable,
    pub pivot_value: f64,
    pub tableau: Tableau,
    pub basis: Vec<String>,
}

/// Observer keeping a snapshot of every tableau.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    pub initial: Option<Tableau>,
    pub entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objective value of the initial tableau followed by the value after each pivot.
    pub fn objective_values(&self) -> Vec<f64> {
        self.initial
            .iter()
            .map(|t| t.objective_value())
            .chain(self.entries.iter().map(|e| e.tableau.objective_value()))
            .collect()
    }
}

impl Observer for Trace {
    fn initial(&mut self, tableau: &Tableau) {
        self.initial = Some(tableau.clone());
    }

    fn pivoted(&mut self, step: &Step<'_>) {
        self.entries.push(TraceEntry {
            iteration: step.iteration,
            entering: step.pivot.entering,
            leaving: step.pivot.leaving,
            pivot_value: step.pivot.value,
            tableau: step.tableau.clone(),
            basis: step.tableau.basis_labels(),
        });
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Simplex {
    options: SimplexOptions,
}

impl Simplex {
    pub fn new(options: SimplexOptions) -> Self {
        Simplex { options }
    }

    pub fn solve(&self, standard: &StandardForm) -> Result<Solution> {
        self.solve_observed(standard, &mut ())
    }

    /// Pivots until no reduced cost is negative, reporting every tableau to `observer`.
    pub fn solve_observed<O: Observer + ?Sized>(
        &self,
        standard: &StandardForm,
        observer: &mut O,
    ) -> Result<Solution> {
        self.options.validate()?;
        let eps = self.options.tolerance;

        let mut tableau = Tableau::new(standard)?;
        observer.initial(&tableau);
        trace!("initial tableau\n{}", tableau);

        let mut iteration = 0;
        loop {
            let pivot = match tableau.select_pivot(eps) {
                Ok(Some(pivot)) => pivot,
                Ok(None) => break,
                Err(err) => {
                    warn!("stopping after {} iterations: {}", iteration, err);
                    return Err(err);
                }
            };
            if let Some(limit) = self.options.max_iterations {
                if iteration >= limit {
                    warn!("iteration limit {} reached", limit);
                    return Err(SimplexError::IterationLimit { limit });
                }
            }

            tableau.pivot(&pivot)?;
            iteration += 1;

            debug!(
                "iteration {}: {} enters, {} leaves, pivot {}, objective {}",
                iteration,
                pivot.entering,
                pivot.leaving,
                pivot.value,
                tableau.objective_value()
            );
            trace!("\n{}", tableau);
            observer.pivoted(&Step {
                iteration,
                pivot: &pivot,
                tableau: &tableau,
            });
        }

        info!(
            "optimal after {} iterations, objective {}",
            iteration,
            tableau.objective_value()
        );
        Ok(Solution::from_tableau(tableau, iteration, eps))
    }
}

/// Solves `standard` with default options.
pub fn simplex(standard: &StandardForm) -> Result<Solution> {
    Simplex::default().solve(standard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario() -> StandardForm {
        StandardForm::new(
            vec![3.0, 5.0],
            vec![vec![1.0, 0.0], vec![0.0, 2.0], vec![3.0, 2.0]],
            vec![4.0, 12.0, 18.0],
        )
        .unwrap()
    }

    #[test]
    fn test_trace() {
        let mut trace = Trace::new();
        let solution = simplex_with_trace(&scenario(), &mut trace);
        assert_relative_eq!(solution.objective, 36.0);

        assert_eq!(trace.entries.len(), 2);
        let first = &trace.entries[0];
        assert_eq!(first.iteration, 1);
        assert_eq!(first.entering, Variable::Decision(1));
        assert_eq!(first.leaving, Variable::Slack(1));
        assert_relative_eq!(first.pivot_value, 2.0);
        assert_eq!(first.basis, vec!["Z", "S1", "X2", "S3"]);

        let second = &trace.entries[1];
        assert_eq!(second.entering, Variable::Decision(0));
        assert_eq!(second.leaving, Variable::Slack(2));
        assert_relative_eq!(second.pivot_value, 3.0);
        assert_eq!(second.basis, vec!["Z", "S1", "X2", "X1"]);

        assert_relative_eq!(trace.objective_values()[..], [0.0, 30.0, 36.0][..]);
    }

    fn simplex_with_trace(standard: &StandardForm, trace: &mut Trace) -> Solution {
        Simplex::default().solve_observed(standard, trace).unwrap()
    }

    fn observe<F: FnMut(&Step<'_>)>(f: F) -> F {
        f
    }

    #[test]
    fn test_closure_observer() {
        let mut iterations = Vec::new();
        let mut observer = observe(|step| iterations.push(step.iteration));
        Simplex::default()
            .solve_observed(&scenario(), &mut observer)
            .unwrap();
        assert_eq!(iterations, vec![1, 2]);
    }

    #[test]
    fn test_iteration_limit() {
        let options = SimplexOptions {
            max_iterations: Some(1),
            ..SimplexOptions::default()
        };
        let err = Simplex::new(options).solve(&scenario()).unwrap_err();
        assert_eq!(err, SimplexError::IterationLimit { limit: 1 });

        let options = SimplexOptions {
            max_iterations: Some(2),
            ..SimplexOptions::default()
        };
        let solution = Simplex::new(options).solve(&scenario()).unwrap();
        assert_eq!(solution.iterations, 2);
    }

    #[test]
    fn test_invalid_tolerance() {
        for tolerance in [f64::NAN, f64::INFINITY, -1.0] {
            let options = SimplexOptions {
                tolerance,
                ..SimplexOptions::default()
            };
            let mut trace = Trace::new();
            let err = Simplex::new(options)
                .solve_observed(&scenario(), &mut trace)
                .unwrap_err();
            assert!(matches!(err, SimplexError::MalformedInput(_)));
            assert!(trace.initial.is_none());
        }

        assert!(serde_json::from_str::<SimplexOptions>(r#"{"tolerance": -1.0}"#).is_err());

        let options = SimplexOptions {
            tolerance: 0.0,
            ..SimplexOptions::default()
        };
        let solution = Simplex::new(options).solve(&scenario()).unwrap();
        assert_relative_eq!(solution.objective, 36.0);
    }

    #[test]
    fn test_options_from_json() {
        let options: SimplexOptions = serde_json::from_str(r#"{"max_iterations": 10}"#).unwrap();
        assert_eq!(options.max_iterations, Some(10));
        assert_relative_eq!(options.tolerance, EPS);
    }

    #[test]
    fn test_no_constraints() {
        let standard = StandardForm::new(vec![1.0], vec![], vec![]).unwrap();
        assert_eq!(
            simplex(&standard).unwrap_err(),
            SimplexError::Unbounded { entering: Variable::Decision(0) }
        );

        let standard = StandardForm::new(vec![-1.0], vec![], vec![]).unwrap();
        let solution = simplex(&standard).unwrap();
        assert_relative_eq!(solution.objective, 0.0);
        assert_relative_eq!(solution.x[..], [0.0][..]);
    }
}
