use thiserror::Error;

use crate::{
    models::thermal::glazing::core::ventilation::VentilationError, support::thermo::GasError,
};

/// Errors that can occur while solving the heat balance of an IGU.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Gas properties could not be evaluated for a gap or environment.
    #[error("gas property evaluation failed")]
    Gas(#[from] GasError),

    /// The airflow through a naturally ventilated gap could not be solved.
    #[error("ventilation solve failed")]
    Ventilation(#[from] VentilationError),

    /// The surface temperatures did not settle within the iteration limit.
    #[error(
        "heat balance did not converge after {iterations} iterations: max_change={max_change}"
    )]
    NonConvergence {
        /// Iterations performed.
        iterations: usize,

        /// Largest relative temperature change on the last iteration.
        max_change: f64,
    },

    /// The linearised heat-balance system could not be solved.
    #[error("heat balance system is singular at iteration {iteration}")]
    SingularSystem {
        /// Iteration at which the linear solve failed.
        iteration: usize,
    },

    /// The solve produced a state that is not physically meaningful.
    #[error("non-physical state: {context}")]
    NonPhysical {
        /// Description of the offending quantity.
        context: String,
    },
}

impl SolveError {
    pub(super) fn non_physical(context: impl Into<String>) -> Self {
        Self::NonPhysical {
            context: context.into(),
        }
    }
}
