use simplex_tableau::{Simplex, SimplexError, StandardForm, Step, Tableau};

struct Printer;

impl simplex_tableau::Observer for Printer {
    fn initial(&mut self, tableau: &Tableau) {
        println!("=== initial tableau ===");
        println!("{}", tableau);
    }

    fn pivoted(&mut self, step: &Step<'_>) {
        println!("entering: {}", step.pivot.entering);
        println!("leaving:  {}", step.pivot.leaving);
        println!("pivot:    {}", step.pivot.value);
        println!("=== iteration {} ===", step.iteration);
        println!("{}", step.tableau);
    }
}

fn main() -> Result<(), SimplexError> {
    // maximize   3 x0 + 5 x1
    // subject to   x0        <= 4
    //                   2 x1 <= 12
    //            3 x0 + 2 x1 <= 18
    let c = vec![3.0, 5.0];
    let b = vec![4.0, 12.0, 18.0];
    let a = vec![
        vec![1.0, 0.0],
        vec![0.0, 2.0],
        vec![3.0, 2.0],
    ];

    let standard = StandardForm::new(c, a, b)?;
    match Simplex::default().solve_observed(&standard, &mut Printer) {
        Ok(solution) => {
            println!("optimal after {} iterations", solution.iterations);
            print!("{}", solution);
        }
        Err(SimplexError::Unbounded { entering }) => {
            println!("Unbounded: {} can grow without limit", entering);
        }
        Err(err) => return Err(err),
    };

    Ok(())
}
