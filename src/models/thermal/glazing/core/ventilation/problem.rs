//! Problem formulation for buoyancy-driven airflow.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{f64::Velocity, velocity::meter_per_second};

use super::{Channel, ChannelFlow, LossFactors};

/// Air path whose speed is unknown.
#[derive(Debug, Clone, Copy)]
pub(super) enum Circuit<'a> {
    /// Air drawn from a reservoir at a fixed temperature.
    Open {
        channel: &'a Channel,
        losses: LossFactors,
        inlet_temperature: f64,
    },
    /// Air circulating through two gaps around a shade.
    Loop {
        first: &'a Channel,
        first_losses: LossFactors,
        second: &'a Channel,
        second_losses: LossFactors,
    },
}

/// Temperatures and pressure balance at one trial speed.
#[derive(Debug, Clone, Copy)]
pub(super) struct AirflowState {
    pub(super) first: ChannelFlow,
    pub(super) second: Option<ChannelFlow>,
    /// Stack pressure, Pa.
    pub(super) driving_pressure: f64,
    /// Friction and opening losses, Pa.
    pub(super) pressure_loss: f64,
}

impl Circuit<'_> {
    /// Speed in the first channel at which losses alone consume the
    /// zero-flow driving pressure.
    pub(super) fn speed_bound(&self, driving_pressure: f64) -> f64 {
        let density = match self {
            Self::Open { channel, .. } => channel.props.density,
            Self::Loop { first, .. } => first.props.density,
        };
        (2.0 * driving_pressure / density).sqrt()
    }

    pub(super) fn evaluate(&self, speed: f64) -> AirflowState {
        match *self {
            Self::Open {
                channel,
                losses,
                inlet_temperature,
            } => {
                let flow = channel.flow(speed, inlet_temperature);
                AirflowState {
                    first: flow,
                    second: None,
                    driving_pressure: channel
                        .stack_pressure(flow.mean_air_temperature, inlet_temperature),
                    pressure_loss: channel.pressure_loss(speed, losses),
                }
            }
            Self::Loop {
                first,
                first_losses,
                second,
                second_losses,
            } => {
                let second_speed = speed * first.spacing / second.spacing;
                let [a, b] = loop_flows(first, second, speed, second_speed);
                AirflowState {
                    first: a,
                    second: Some(b),
                    driving_pressure: first
                        .stack_pressure(a.mean_air_temperature, b.mean_air_temperature),
                    pressure_loss: first.pressure_loss(speed, first_losses)
                        + second.pressure_loss(second_speed, second_losses),
                }
            }
        }
    }
}

/// Closed-form temperatures of two gaps feeding each other.
pub(super) fn loop_flows(
    first: &Channel,
    second: &Channel,
    first_speed: f64,
    second_speed: f64,
) -> [ChannelFlow; 2] {
    let e_a = first.decay(first_speed);
    let e_b = second.decay(second_speed);
    let t_a = first.mean_surface_temperature;
    let t_b = second.mean_surface_temperature;

    let outlet_a = (t_a * (1.0 - e_a) + e_a * (1.0 - e_b) * t_b) / (1.0 - e_a * e_b);
    let outlet_b = t_b * (1.0 - e_b) + e_b * outlet_a;

    [
        first.flow(first_speed, outlet_b),
        second.flow(second_speed, outlet_a),
    ]
}

/// Model adapter exposing the first-channel air speed as the only input.
pub(super) struct AirflowModel<'a> {
    circuit: Circuit<'a>,
}

impl<'a> AirflowModel<'a> {
    pub(super) fn new(circuit: Circuit<'a>) -> Self {
        Self { circuit }
    }
}

impl Model for AirflowModel<'_> {
    type Input = Velocity;
    type Output = AirflowState;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.circuit.evaluate(input.get::<meter_per_second>()))
    }
}

/// Equation problem balancing stack pressure against losses.
///
/// Computes the residual as `driving_pressure - pressure_loss`.
pub(super) struct AirflowProblem;

impl EquationProblem<1> for AirflowProblem {
    type Input = Velocity;
    type Output = AirflowState;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Velocity::new::<meter_per_second>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.driving_pressure - output.pressure_loss])
    }
}
