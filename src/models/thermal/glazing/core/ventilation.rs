//! Air movement through ventilated gaps.
//!
//! A ventilated gap is a vertical channel between two surfaces. Air enters
//! at the inlet temperature and approaches the mean surface temperature
//! exponentially with height. Forced flow fixes the speed; natural flow
//! balances the stack pressure against friction and opening losses, solved
//! here with bisection on the air speed.

mod config;
mod error;
mod problem;

pub use config::VentilationConfig;
pub use error::VentilationError;

use tracing::debug;
use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature, Velocity},
    pressure::pascal,
    velocity::meter_per_second,
};

use crate::support::{
    constraint::{Constrained, NonNegative},
    thermo::{RawGasProperties, UNIVERSAL_GAS_CONSTANT},
};

use super::{convection::GRAVITY, layer::Openness};

use problem::{AirflowModel, AirflowProblem, AirflowState, Circuit};

/// Where ventilation air comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VentilationInlet {
    Indoor,
    Outdoor,
    Temperature(ThermodynamicTemperature),
}

/// How ventilation air is moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VentilationFlow {
    /// Fan-driven at a fixed mean speed.
    Forced(Velocity),
    /// Buoyancy-driven; the speed is solved for.
    Natural,
}

/// Ventilation of a gap with air.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ventilation {
    pub inlet: VentilationInlet,
    pub flow: VentilationFlow,
}

impl Ventilation {
    /// Fan-driven ventilation at a fixed mean air speed.
    #[must_use]
    pub fn forced(inlet: VentilationInlet, speed: Constrained<Velocity, NonNegative>) -> Self {
        Self {
            inlet,
            flow: VentilationFlow::Forced(speed.into_inner()),
        }
    }

    #[must_use]
    pub fn natural(inlet: VentilationInlet) -> Self {
        Self {
            inlet,
            flow: VentilationFlow::Natural,
        }
    }
}

/// One ventilated gap at the current surface temperatures, in SI units.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Channel {
    pub(crate) spacing: f64,
    pub(crate) height: f64,
    pub(crate) width: f64,
    /// Tilt from horizontal, radians.
    pub(crate) tilt: f64,
    /// Surface-to-air convective coefficient with no flow.
    pub(crate) surface_coefficient: f64,
    /// Mean of the two bounding surface temperatures.
    pub(crate) mean_surface_temperature: f64,
    pub(crate) pressure: f64,
    pub(crate) props: RawGasProperties,
    pub(crate) openness: Openness,
}

/// Air temperatures along a channel at one speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ChannelFlow {
    pub(crate) speed: f64,
    pub(crate) inlet_temperature: f64,
    pub(crate) outlet_temperature: f64,
    pub(crate) mean_air_temperature: f64,
    /// Surface-to-air coefficient `2h_c + 4v` used on both faces.
    pub(crate) coefficient: f64,
}

/// Opening loss coefficients at the inlet and outlet of a channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LossFactors {
    inlet: f64,
    outlet: f64,
}

impl Channel {
    fn coefficient(&self, speed: f64) -> f64 {
        2.0 * self.surface_coefficient + 4.0 * speed
    }

    /// `e^(−H/H₀)`, the fraction of the inlet excess left at the outlet.
    fn decay(&self, speed: f64) -> f64 {
        if speed <= 0.0 {
            return 0.0;
        }
        let h0 = self.characteristic_height(speed);
        (-self.height / h0).exp()
    }

    /// `H₀ = ρ·cp·s·v/(2h_cv)`.
    fn characteristic_height(&self, speed: f64) -> f64 {
        self.props.density * self.props.specific_heat * self.spacing * speed
            / (2.0 * self.coefficient(speed))
    }

    /// Air temperatures for a given speed and inlet temperature.
    pub(crate) fn flow(&self, speed: f64, inlet_temperature: f64) -> ChannelFlow {
        let t_av = self.mean_surface_temperature;
        let coefficient = self.coefficient(speed);

        if speed <= 0.0 {
            return ChannelFlow {
                speed: 0.0,
                inlet_temperature,
                outlet_temperature: t_av,
                mean_air_temperature: t_av,
                coefficient,
            };
        }

        let h0 = self.characteristic_height(speed);
        let outlet = t_av - (t_av - inlet_temperature) * self.decay(speed);
        let mean = t_av - h0 / self.height * (outlet - inlet_temperature);

        ChannelFlow {
            speed,
            inlet_temperature,
            outlet_temperature: outlet,
            mean_air_temperature: mean,
            coefficient,
        }
    }

    /// Stack pressure between two air columns at `t1` and `t2`, Pa.
    fn stack_pressure(&self, t1: f64, t2: f64) -> f64 {
        let rho_t = self.pressure * self.props.molecular_weight / UNIVERSAL_GAS_CONSTANT;
        rho_t * GRAVITY * self.height * self.tilt.sin().abs() * (t1 - t2).abs() / (t1 * t2)
    }

    /// Equivalent inlet and outlet opening areas, m².
    fn equivalent_openings(&self) -> (f64, f64) {
        let o = &self.openness;
        let top = o.top * self.spacing * self.width;
        let bottom = o.bottom * self.spacing * self.width;
        let sides =
            (o.left + o.right) * self.spacing * self.height + o.front * self.width * self.height;

        let ends = top + bottom;
        let (inlet_share, outlet_share) = if ends > 0.0 {
            (top / ends, bottom / ends)
        } else {
            (0.5, 0.5)
        };

        (
            bottom + inlet_share * sides / 2.0,
            top + outlet_share * sides / 2.0,
        )
    }

    /// Opening loss coefficients, or `None` when the channel is sealed.
    fn loss_factors(&self) -> Option<LossFactors> {
        let (inlet, outlet) = self.equivalent_openings();
        if inlet <= 0.0 || outlet <= 0.0 {
            return None;
        }
        let section = self.spacing * self.width;
        let z = |area: f64| (section / (0.6 * area) - 1.0).powi(2);
        Some(LossFactors {
            inlet: z(inlet),
            outlet: z(outlet),
        })
    }

    /// Opening plus viscous pressure loss at `speed`, Pa.
    fn pressure_loss(&self, speed: f64, losses: LossFactors) -> f64 {
        let rho = self.props.density;
        let mu = self.props.viscosity;
        rho * speed * speed / 2.0 * (1.0 + losses.inlet + losses.outlet)
            + 12.0 * mu * self.height * speed / (self.spacing * self.spacing)
    }
}

/// Openness used for a gap ventilated without an adjacent shade.
pub(crate) fn open_ends() -> Openness {
    Openness {
        front: 0.0,
        top: 1.0,
        bottom: 1.0,
        left: 0.0,
        right: 0.0,
    }
}

/// Air temperatures in a channel driven at a fixed speed.
pub(crate) fn forced(channel: &Channel, speed: Velocity, inlet_temperature: f64) -> ChannelFlow {
    channel.flow(speed.get::<meter_per_second>().max(0.0), inlet_temperature)
}

/// Buoyancy-driven flow through a channel open to a reservoir.
///
/// # Errors
///
/// Returns [`VentilationError`] if the airflow bisection fails to converge.
pub(crate) fn natural_open(
    channel: &Channel,
    inlet_temperature: f64,
    config: &VentilationConfig,
) -> Result<ChannelFlow, VentilationError> {
    let Some(losses) = channel.loss_factors() else {
        return Ok(channel.flow(0.0, inlet_temperature));
    };

    let circuit = Circuit::Open {
        channel,
        losses,
        inlet_temperature,
    };
    Ok(solve_circuit(circuit, config)?.first)
}

/// Buoyancy-driven circulation through two gaps around an open shade.
///
/// # Errors
///
/// Returns [`VentilationError`] if the airflow bisection fails to converge.
pub(crate) fn natural_loop(
    first: &Channel,
    second: &Channel,
    config: &VentilationConfig,
) -> Result<[ChannelFlow; 2], VentilationError> {
    let (Some(first_losses), Some(second_losses)) = (first.loss_factors(), second.loss_factors())
    else {
        return Ok(problem::loop_flows(first, second, 0.0, 0.0));
    };

    let circuit = Circuit::Loop {
        first,
        first_losses,
        second,
        second_losses,
    };
    let state = solve_circuit(circuit, config)?;
    let second_flow = state
        .second
        .unwrap_or_else(|| problem::loop_flows(first, second, 0.0, 0.0)[1]);
    Ok([state.first, second_flow])
}

fn solve_circuit(
    circuit: Circuit<'_>,
    config: &VentilationConfig,
) -> Result<AirflowState, VentilationError> {
    let still = circuit.evaluate(0.0);
    if still.driving_pressure <= config.pressure_tol.get::<pascal>() {
        return Ok(still);
    }

    let model = AirflowModel::new(circuit);
    let upper = circuit.speed_bound(still.driving_pressure);

    let solution = bisection::solve(
        &model,
        &AirflowProblem,
        [0.0, upper],
        &config.bisection(),
        |_event: &bisection::Event<'_, _, _>| None,
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(VentilationError::MaxIters {
            residual: Pressure::new::<pascal>(solution.residual),
            iters: solution.iters,
        });
    }

    let state = solution.snapshot.output;
    debug!(
        speed = state.first.speed,
        driving_pressure = state.driving_pressure,
        iters = solution.iters,
        "natural ventilation converged"
    );
    Ok(state)
}
