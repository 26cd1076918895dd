use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::Pressure;

/// Errors that can occur while solving natural airflow through a gap.
#[derive(Debug, Error)]
pub enum VentilationError {
    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("airflow solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Best pressure imbalance achieved (driving - losses).
        residual: Pressure,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
