use std::fmt;

use approx::abs_diff_eq;
use serde::Serialize;

use crate::error::{Result, SimplexError};
use crate::problem::StandardForm;
use crate::variable::{Variable, OBJECTIVE_LABEL};

/// Augmented matrix of a problem in standard form plus its current basis.
///
/// Rows `0..m` are constraints, row `m` is the objective row.
/// Columns `0..n` are decision variables, `n..n+m` slacks, and the last one is the RHS.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tableau {
    rows: Vec<Vec<f64>>,
    basis: Vec<Variable>, // basis[i] is basic in constraint row i
    num_decision: usize,
    num_slack: usize,
}

/// One entering/leaving choice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pivot {
    pub row: usize,
    pub column: usize,
    pub entering: Variable,
    pub leaving: Variable,
    /// Entry at (row, column) before the pivot is executed.
    pub value: f64,
}

impl Tableau {
    /// Builds `[A | I | b]` over `[-c | 0 | 0]` with every slack basic.
    pub fn new(standard: &StandardForm) -> Result<Self> {
        if let Some((row, &value)) = standard.b().iter().enumerate().find(|(_, &bi)| bi < 0.0) {
            return Err(SimplexError::InfeasibleInitialBasis { row, value });
        }

        let n = standard.num_variables();
        let m = standard.num_constraints();

        let mut rows = vec![vec![0.0; n + m + 1]; m + 1];
        for (i, (ai, &bi)) in standard.a().iter().zip(standard.b()).enumerate() {
            rows[i][..n].copy_from_slice(ai);
            rows[i][n + i] = 1.0;
            rows[i][n + m] = bi;
        }
        for (j, &cj) in standard.c().iter().enumerate() {
            rows[m][j] = -cj;
        }

        Ok(Tableau {
            rows,
            basis: (0..m).map(Variable::Slack).collect(),
            num_decision: n,
            num_slack: m,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.num_decision + self.num_slack + 1
    }

    pub fn num_decision(&self) -> usize {
        self.num_decision
    }

    pub fn num_constraints(&self) -> usize {
        self.num_slack
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    fn rhs_column(&self) -> usize {
        self.num_decision + self.num_slack
    }

    pub fn rhs(&self, i: usize) -> f64 {
        self.rows[i][self.rhs_column()]
    }

    pub fn objective_row(&self) -> &[f64] {
        &self.rows[self.num_slack]
    }

    /// RHS of the objective row, i.e. the current value of c^T x.
    pub fn objective_value(&self) -> f64 {
        self.rhs(self.num_slack)
    }

    pub fn basis(&self) -> &[Variable] {
        &self.basis
    }

    /// Basis vector as displayed: the objective label followed by one label per constraint row.
    pub fn basis_labels(&self) -> Vec<String> {
        std::iter::once(OBJECTIVE_LABEL.to_string())
            .chain(self.basis.iter().map(|v| v.to_string()))
            .collect()
    }

    pub fn is_optimal(&self, eps: f64) -> bool {
        self.entering_column(eps).is_none()
    }

    /// Most negative reduced cost, lowest column on ties. `None` at optimality.
    pub fn entering_column(&self, eps: f64) -> Option<usize> {
        let mut entering = None;
        let mut min = -eps;
        for (j, &cj) in self.objective_row()[..self.rhs_column()].iter().enumerate() {
            if cj < min {
                min = cj;
                entering = Some(j);
            }
        }
        entering
    }

    /// Minimum ratio test over rows with a positive entry in `column`, lowest row on ties.
    pub fn leaving_row(&self, column: usize, eps: f64) -> Result<usize> {
        let rhs = self.rhs_column();
        let mut leaving = None;
        let mut delta = f64::INFINITY;
        for (i, row) in self.rows[..self.num_slack]
            .iter()
            .enumerate()
            .filter(|(_, row)| row[column] > eps)
        {
            let ratio = row[rhs] / row[column];
            if ratio + eps < delta {
                delta = ratio;
                leaving = Some(i);
            }
        }
        leaving.ok_or(SimplexError::Unbounded {
            entering: Variable::from_column(column, self.num_decision),
        })
    }

    pub fn select_pivot(&self, eps: f64) -> Result<Option<Pivot>> {
        let column = match self.entering_column(eps) {
            Some(column) => column,
            None => return Ok(None),
        };
        let row = self.leaving_row(column, eps)?;

        Ok(Some(Pivot {
            row,
            column,
            entering: Variable::from_column(column, self.num_decision),
            leaving: self.basis[row],
            value: self.rows[row][column],
        }))
    }

    /// Gauss-Jordan step on `pivot.row` and `pivot.column`.
    ///
    /// Fails without touching the tableau if the coordinates are out of range
    /// or the entry there is zero or not finite.
    pub fn pivot(&mut self, pivot: &Pivot) -> Result<()> {
        let (row, column) = (pivot.row, pivot.column);
        if row >= self.num_slack || column >= self.rhs_column() {
            return Err(SimplexError::MalformedInput(format!(
                "pivot ({}, {}) outside a {}x{} constraint block",
                row,
                column,
                self.num_slack,
                self.rhs_column()
            )));
        }
        let value = self.rows[row][column];
        if value == 0.0 || !value.is_finite() {
            return Err(SimplexError::MalformedInput(format!(
                "cannot pivot on entry {} at ({}, {})",
                value, row, column
            )));
        }

        for v in self.rows[row].iter_mut() {
            *v /= value;
        }
        self.rows[row][column] = 1.0;

        let pivot_row = self.rows[row].clone();
        for (i, other) in self.rows.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = other[column];
            if factor == 0.0 {
                continue;
            }
            for (v, &pv) in other.iter_mut().zip(pivot_row.iter()) {
                *v -= factor * pv;
            }
            other[column] = 0.0;
        }

        self.basis[row] = Variable::from_column(column, self.num_decision);
        Ok(())
    }

    /// Constraint row holding the single 1 of `column` when it is a unit column.
    ///
    /// Every other entry, objective row included, must be 0 within `eps`.
    pub fn unit_row(&self, column: usize, eps: f64) -> Option<usize> {
        let mut one = None;
        for (i, row) in self.rows.iter().enumerate() {
            let v = row[column];
            if abs_diff_eq!(v, 0.0, epsilon = eps) {
                continue;
            }
            if i < self.num_slack && one.is_none() && abs_diff_eq!(v, 1.0, epsilon = eps) {
                one = Some(i);
            } else {
                return None;
            }
        }
        one
    }

    /// Values of the decision and slack variables in the current basic solution.
    pub fn variable_values(&self, eps: f64) -> (Vec<f64>, Vec<f64>) {
        let value = |column: usize| {
            let variable = Variable::from_column(column, self.num_decision);
            match self.unit_row(column, eps) {
                Some(i) if self.basis[i] == variable => self.rhs(i),
                _ => 0.0,
            }
        };
        let x = (0..self.num_decision).map(value).collect();
        let slack = (self.num_decision..self.rhs_column()).map(value).collect();
        (x, slack)
    }
}

fn format_entry(v: f64) -> String {
    // avoid printing "-0.000"
    let v = if v.abs() < 5e-4 { 0.0 } else { v };
    format!("{:.3}", v)
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = vec!["Basis".to_string()];
        header.extend((0..self.rhs_column()).map(|j| Variable::from_column(j, self.num_decision).to_string()));
        header.push("RHS".to_string());

        // objective row first, then the constraints in basis order
        let labels = self.basis_labels();
        let order = std::iter::once(self.num_slack).chain(0..self.num_slack);
        let mut lines = vec![header];
        for (label, i) in labels.into_iter().zip(order) {
            let mut line = vec![label];
            line.extend(self.rows[i].iter().map(|&v| format_entry(v)));
            lines.push(line);
        }

        let widths: Vec<usize> = (0..lines[0].len())
            .map(|j| lines.iter().map(|line| line[j].len()).max().unwrap_or(0))
            .collect();

        for (k, line) in lines.iter().enumerate() {
            let cells: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{:>w$}", cell, w = w))
                .collect();
            writeln!(f, "{}", cells.join(" | "))?;
            if k == 0 {
                let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
                writeln!(f, "{}", rule.join("-+-"))?;
            }
        }
        Ok(())
    }
}
