use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Pressure, Velocity},
    pressure::pascal,
    velocity::meter_per_second,
};

/// Solver configuration for buoyancy-driven gap airflow.
#[derive(Debug, Clone, Copy)]
pub struct VentilationConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the air speed.
    pub speed_tol: Velocity,

    /// Absolute tolerance on the pressure balance (driving - losses).
    pub pressure_tol: Pressure,
}

impl Default for VentilationConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            speed_tol: Velocity::new::<meter_per_second>(1e-9),
            pressure_tol: Pressure::new::<pascal>(1e-9),
        }
    }
}

impl VentilationConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.speed_tol.get::<meter_per_second>(),
            x_rel_tol: 0.0,
            residual_tol: self.pressure_tol.get::<pascal>(),
        }
    }
}
