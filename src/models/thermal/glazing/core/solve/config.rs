use crate::models::thermal::glazing::core::ventilation::VentilationConfig;

/// Configuration of the outer heat-balance iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Maximum number of linearise-and-solve passes.
    pub max_iters: usize,

    /// Convergence threshold on the largest relative change in any surface
    /// temperature between passes.
    pub tolerance: f64,

    /// Initial under-relaxation factor applied to temperature updates.
    pub relaxation: f64,

    /// Smallest relaxation factor the solver will back off to.
    pub min_relaxation: f64,

    /// Settings for the natural-ventilation airflow solve.
    pub ventilation: VentilationConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            tolerance: 1e-4,
            relaxation: 0.9,
            min_relaxation: 0.1,
            ventilation: VentilationConfig::default(),
        }
    }
}
