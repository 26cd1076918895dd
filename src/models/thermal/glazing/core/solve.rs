//! Iterative heat-balance solver for an IGU.
//!
//! Every pass evaluates the temperature-dependent coefficients (gas
//! properties, gap convection, pillar conduction, ventilation, surface
//! optics and environment convection) at the current surface temperatures,
//! solves the linearised network, and under-relaxes the temperature update.
//! The solve ends when the largest relative temperature change falls below
//! the configured tolerance.

mod config;
mod error;
mod network;

pub use config::SolverConfig;
pub use error::SolveError;

use tracing::{debug, trace, warn};
use uom::si::{
    angle::radian,
    f64::{
        HeatFluxDensity, HeatTransfer, Pressure, ThermalConductivity, ThermodynamicTemperature,
        Velocity,
    },
    heat_flux_density::watt_per_square_meter,
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    pressure::pascal,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::support::thermo::{GasError, RawGasProperties};

use super::{
    convection,
    environment::{Environment, Environments},
    igu::{AirflowPath, Igu, Pane},
    layer::{GapLayer, Openness, absorbed_solar},
    pillar::pillar_gap_coefficient,
    radiation::{RadiosityBalance, emissive_power, radiant_kelvin},
    results::{SolverResult, SurfaceState},
    ventilation::{self, Channel, VentilationFlow, VentilationInlet},
};

use network::{BoundaryTerms, Field, GapTerms, Network, PaneTerms};

/// Solves the steady-state heat balance of `igu` between `environments`.
///
/// # Errors
///
/// Returns [`SolveError`] if gas properties or a ventilation airflow cannot be
/// evaluated, if the linear system is singular, if the state becomes
/// non-physical, or if the iteration does not converge.
pub(super) fn solve(
    igu: &Igu,
    environments: &Environments,
    config: &SolverConfig,
) -> Result<SolverResult, SolveError> {
    let stack = Stack::new(igu, environments);
    debug!(
        panes = stack.panes.len(),
        gaps = stack.gaps.len(),
        airflow_paths = stack.paths.len(),
        t_outdoor = stack.outdoor.air_temperature.get::<kelvin>(),
        t_indoor = stack.indoor.air_temperature.get::<kelvin>(),
        "starting heat balance solve"
    );

    let mut phase = Phase::Initialized(stack.initial_field());
    loop {
        phase = match phase {
            Phase::Converged {
                network,
                field,
                iterations,
            } => {
                let result = stack.report(&network, &field, iterations);
                debug!(
                    iterations,
                    u_value = result.u_value().get::<watt_per_square_meter_kelvin>(),
                    q_indoor = result.heat_flow_indoor.get::<watt_per_square_meter>(),
                    q_outdoor = result.heat_flow_outdoor.get::<watt_per_square_meter>(),
                    "heat balance converged"
                );
                return Ok(result);
            }
            Phase::Failed(error) => return Err(error),
            active => active.step(&stack, config),
        };
    }
}

/// Progress of the outer iteration.
enum Phase {
    Initialized(Field),
    Iterating {
        field: Field,
        relaxation: f64,
        max_change: f64,
        iteration: usize,
    },
    Converged {
        network: Network,
        field: Field,
        iterations: usize,
    },
    Failed(SolveError),
}

impl Phase {
    fn step(self, stack: &Stack<'_>, config: &SolverConfig) -> Self {
        let (field, relaxation, previous_change, iteration) = match self {
            Self::Initialized(field) => (field, config.relaxation, f64::INFINITY, 0),
            Self::Iterating {
                field,
                relaxation,
                max_change,
                iteration,
            } => (field, relaxation, max_change, iteration),
            done @ (Self::Converged { .. } | Self::Failed(_)) => return done,
        };
        let iteration = iteration + 1;

        let (network, solved) = match stack
            .network(&field, config)
            .and_then(|network| network.solve(iteration).map(|solved| (network, solved)))
        {
            Ok(pair) => pair,
            Err(error) => return Self::Failed(error),
        };

        let max_change = field.max_relative_change(&solved);
        if max_change < config.tolerance {
            return Self::Converged {
                network,
                field: solved,
                iterations: iteration,
            };
        }

        if iteration >= config.max_iters {
            warn!(
                iterations = iteration,
                max_change, "heat balance did not converge"
            );
            return Self::Failed(SolveError::NonConvergence {
                iterations: iteration,
                max_change,
            });
        }

        let relaxation = if max_change > previous_change {
            (relaxation / 2.0).max(config.min_relaxation)
        } else {
            relaxation
        };
        trace!(iteration, max_change, relaxation, "heat balance iteration");

        Self::Iterating {
            field: field.relax_towards(&solved, relaxation),
            relaxation,
            max_change,
            iteration,
        }
    }
}

/// Everything about a solve that does not change between iterations.
struct Stack<'a> {
    panes: Vec<Pane<'a>>,
    gaps: Vec<&'a GapLayer>,
    paths: Vec<AirflowPath>,
    width: f64,
    height: f64,
    /// Tilt from horizontal, radians.
    tilt: f64,
    outdoor: &'a Environment,
    indoor: &'a Environment,
    outdoor_radiosity: f64,
    indoor_radiosity: f64,
    total_thickness: f64,
}

impl<'a> Stack<'a> {
    fn new(igu: &'a Igu, environments: &'a Environments) -> Self {
        let tilt = igu.tilt().get::<radian>();
        Self {
            panes: igu.panes().collect(),
            gaps: igu.gaps().collect(),
            paths: igu.airflow_paths(),
            width: igu.width().get::<meter>(),
            height: igu.height().get::<meter>(),
            tilt,
            outdoor: &environments.outdoor,
            indoor: &environments.indoor,
            outdoor_radiosity: environments.outdoor.radiosity_at(tilt),
            indoor_radiosity: environments.indoor.radiosity_at(tilt),
            total_thickness: igu.total_thickness().get::<meter>(),
        }
    }

    fn surface_count(&self) -> usize {
        2 * self.panes.len()
    }

    /// Linear temperature profile between the two air temperatures.
    fn initial_field(&self) -> Field {
        let t_out = self.outdoor.air_temperature.get::<kelvin>();
        let t_in = self.indoor.air_temperature.get::<kelvin>();
        let n = self.surface_count();

        #[allow(clippy::cast_precision_loss)]
        let temperatures: Vec<f64> = (0..n)
            .map(|i| t_out + (t_in - t_out) * (i + 1) as f64 / (n + 1) as f64)
            .collect();
        let radiosities = temperatures.iter().map(|t| emissive_power(*t)).collect();

        Field {
            temperatures,
            radiosities,
        }
    }

    fn inlet_temperature(&self, inlet: VentilationInlet) -> f64 {
        match inlet {
            VentilationInlet::Indoor => self.indoor.air_temperature.get::<kelvin>(),
            VentilationInlet::Outdoor => self.outdoor.air_temperature.get::<kelvin>(),
            VentilationInlet::Temperature(t) => t.get::<kelvin>(),
        }
    }

    /// Evaluates every coefficient of the network at `field`.
    fn network(&self, field: &Field, config: &SolverConfig) -> Result<Network, SolveError> {
        let t = &field.temperatures;
        let solar = self.outdoor.solar_radiation;

        let panes = self
            .panes
            .iter()
            .enumerate()
            .map(|(k, pane)| {
                let (t_front, t_back) = (t[2 * k], t[2 * k + 1]);
                let front = pane.front().optics_at(t_front);
                let back = pane.back().optics_at(t_back);
                let conductance = match pane {
                    Pane::Solid(solid) => solid.conductance(),
                    Pane::Shading(shade) => {
                        let mean = 0.5 * (t_front + t_back);
                        shade.conductance(ThermodynamicTemperature::new::<kelvin>(mean))?
                    }
                };
                Ok(PaneTerms {
                    conductance: conductance.get::<watt_per_square_meter_kelvin>(),
                    front: RadiosityBalance::new(front, back.transmittance, t_front),
                    back: RadiosityBalance::new(back, front.transmittance, t_back),
                    absorbed_solar: absorbed_solar(pane.solar_absorptance(), solar),
                })
            })
            .collect::<Result<Vec<_>, GasError>>()?;

        let mut gaps = Vec::with_capacity(self.gaps.len());
        let mut states = Vec::with_capacity(self.gaps.len());
        for (g, gap) in self.gaps.iter().enumerate() {
            let state = self.gap_state(g, gap, field)?;
            gaps.push(GapTerms::Sealed {
                coefficient: state.coefficient,
            });
            states.push(state);
        }

        for path in &self.paths {
            match *path {
                AirflowPath::Open {
                    gap,
                    inlet,
                    flow,
                    openness,
                } => {
                    let channel = self.channel(gap, &states[gap], openness);
                    let inlet_temperature = self.inlet_temperature(inlet);
                    let flow = match flow {
                        VentilationFlow::Forced(speed) => {
                            ventilation::forced(&channel, speed, inlet_temperature)
                        }
                        VentilationFlow::Natural => ventilation::natural_open(
                            &channel,
                            inlet_temperature,
                            &config.ventilation,
                        )?,
                    };
                    gaps[gap] = GapTerms::Ventilated { flow };
                }
                AirflowPath::Loop {
                    gaps: [a, b],
                    openness,
                } => {
                    let first = self.channel(a, &states[a], openness);
                    let second = self.channel(b, &states[b], openness);
                    let [flow_a, flow_b] =
                        ventilation::natural_loop(&first, &second, &config.ventilation)?;
                    gaps[a] = GapTerms::Ventilated { flow: flow_a };
                    gaps[b] = GapTerms::Ventilated { flow: flow_b };
                }
            }
        }

        let last = self.surface_count() - 1;
        let outdoor_emissivity = self.panes[0].front().optics_at(t[0]).emissivity;
        let indoor_emissivity = self.panes[self.panes.len() - 1]
            .back()
            .optics_at(t[last])
            .emissivity;

        let outdoor = BoundaryTerms {
            coefficient: self.outdoor.convection_at(
                t[0],
                outdoor_emissivity,
                radiant_kelvin(self.outdoor_radiosity),
                self.tilt,
                self.height,
            )?,
            air_temperature: self.outdoor.air_temperature.get::<kelvin>(),
            radiosity: self.outdoor_radiosity,
        };
        let indoor = BoundaryTerms {
            coefficient: self.indoor.convection_at(
                t[last],
                indoor_emissivity,
                radiant_kelvin(self.indoor_radiosity),
                self.tilt,
                self.height,
            )?,
            air_temperature: self.indoor.air_temperature.get::<kelvin>(),
            radiosity: self.indoor_radiosity,
        };

        Ok(Network {
            panes,
            gaps,
            outdoor,
            indoor,
        })
    }

    /// Gas properties and still-gas coefficient of gap `g`.
    fn gap_state(&self, g: usize, gap: &GapLayer, field: &Field) -> Result<GapState, GasError> {
        let t_outdoor_side = field.temperatures[2 * g + 1];
        let t_indoor_side = field.temperatures[2 * g + 2];
        let mean = 0.5 * (t_outdoor_side + t_indoor_side);
        let pressure = gap.pressure();

        let mut gas = gap.gas().clone();
        gas.set_temperature_and_pressure(ThermodynamicTemperature::new::<kelvin>(mean), pressure);
        let props = gas.properties()?.raw();

        let coefficient = match gap.pillars() {
            Some(pillars) => pillar_gap_coefficient(
                pillars,
                &props,
                mean,
                pressure.get::<pascal>(),
                gap.thickness(),
                self.panes[g].conductivity(),
                self.panes[g + 1].conductivity(),
            ),
            None => convection::gap_coefficient(
                &props,
                gap.thickness().get::<meter>(),
                self.height,
                self.tilt,
                t_outdoor_side,
                t_indoor_side,
            ),
        };

        Ok(GapState {
            props,
            mean_temperature: mean,
            pressure,
            coefficient,
        })
    }

    fn channel(&self, g: usize, state: &GapState, openness: Openness) -> Channel {
        Channel {
            spacing: self.gaps[g].thickness().get::<meter>(),
            height: self.height,
            width: self.width,
            tilt: self.tilt,
            surface_coefficient: state.coefficient,
            mean_surface_temperature: state.mean_temperature,
            pressure: state.pressure.get::<pascal>(),
            props: state.props,
            openness,
        }
    }

    /// Derives the reported quantities from the converged network.
    fn report(&self, network: &Network, field: &Field, iterations: usize) -> SolverResult {
        let t = &field.temperatures;
        let j = &field.radiosities;
        let last = self.surface_count() - 1;
        let flux = HeatFluxDensity::new::<watt_per_square_meter>;
        let conductivity = ThermalConductivity::new::<watt_per_meter_kelvin>;

        let t_out = network.outdoor.air_temperature;
        let t_in = network.indoor.air_temperature;
        let q_out = network.outdoor.coefficient * (t[0] - t_out) + j[0] - network.outdoor.radiosity;
        let q_in =
            network.indoor.coefficient * (t_in - t[last]) + network.indoor.radiosity - j[last];

        let mut gap_flows = Vec::with_capacity(network.gaps.len());
        let mut gains = Vec::with_capacity(network.gaps.len());
        let mut speeds = Vec::with_capacity(network.gaps.len());
        let mut gap_conductivities = Vec::with_capacity(network.gaps.len());
        for (g, terms) in network.gaps.iter().enumerate() {
            let (t1, t2) = (t[2 * g + 1], t[2 * g + 2]);
            let radiative = j[2 * g + 2] - j[2 * g + 1];
            let (q, gain, speed) = match *terms {
                GapTerms::Sealed { coefficient } => (coefficient * (t2 - t1) + radiative, 0.0, 0.0),
                GapTerms::Ventilated { flow } => {
                    let t_gm = flow.mean_air_temperature;
                    (
                        flow.coefficient * (t2 - t_gm) + radiative,
                        flow.coefficient * ((t1 - t_gm) + (t2 - t_gm)),
                        flow.speed,
                    )
                }
            };
            let thickness = self.gaps[g].thickness().get::<meter>();
            gap_flows.push(flux(q));
            gains.push(gain);
            speeds.push(Velocity::new::<meter_per_second>(speed));
            gap_conductivities.push(conductivity(effective_conductivity(q, thickness, t2 - t1)));
        }

        let (mut ventilation_outdoor, mut ventilation_indoor) = (0.0, 0.0);
        for path in &self.paths {
            if let AirflowPath::Open { gap, inlet, .. } = *path {
                match inlet {
                    VentilationInlet::Outdoor => ventilation_outdoor += gains[gap],
                    VentilationInlet::Indoor => ventilation_indoor += gains[gap],
                    VentilationInlet::Temperature(_) => {}
                }
            }
        }

        let solid_conductivities = network
            .panes
            .iter()
            .zip(&self.panes)
            .map(|(terms, pane)| conductivity(terms.conductance * pane.thickness().get::<meter>()))
            .collect();

        let surfaces = t
            .iter()
            .zip(j)
            .map(|(t, j)| SurfaceState {
                temperature: ThermodynamicTemperature::new::<kelvin>(*t),
                radiosity: flux(*j),
            })
            .collect();

        SolverResult {
            surfaces,
            iterations,
            heat_flow_outdoor: flux(q_out),
            heat_flow_indoor: flux(q_in),
            ventilation_outdoor: flux(ventilation_outdoor),
            ventilation_indoor: flux(ventilation_indoor),
            gap_heat_flows: gap_flows,
            gap_air_speeds: speeds,
            ventilation_gains: gains.into_iter().map(flux).collect(),
            solid_conductivities,
            gap_conductivities,
            system_conductivity: conductivity(effective_conductivity(
                q_in,
                self.total_thickness,
                t[last] - t[0],
            )),
            absorbed_solar: flux(network.panes.iter().map(|p| p.absorbed_solar).sum()),
            u_value: HeatTransfer::new::<watt_per_square_meter_kelvin>(
                (q_in - ventilation_indoor) / (t_in - t_out),
            ),
        }
    }
}

/// Gap gas state at the current iterate.
struct GapState {
    props: RawGasProperties,
    mean_temperature: f64,
    pressure: Pressure,
    coefficient: f64,
}

/// Conductivity of a solid of `thickness` carrying `flux` across `delta_t`.
fn effective_conductivity(flux: f64, thickness: f64, delta_t: f64) -> f64 {
    if delta_t.abs() < 1e-12 {
        0.0
    } else {
        flux * thickness / delta_t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        angle::degree,
        f64::{Angle, Length},
        length::millimeter,
    };

    use crate::models::thermal::glazing::core::{
        environment::Boundary,
        layer::{ATMOSPHERIC_PRESSURE, Layer, PropertyCurve, SolidLayer, Surface, SurfaceProperty},
        test_support::{
            air_gap, clear_glass, double_clear, nfrc_summer, nfrc_winter, open_shade,
            sunlit_double_clear, unit_igu, vacuum_gap,
        },
    };
    use crate::support::{
        constraint::NonNegative,
        thermo::{GasMixture, fluid::Air},
    };

    /// Converges far enough that per-iteration lag in the coefficients vanishes.
    fn tight() -> SolverConfig {
        SolverConfig {
            max_iters: 500,
            tolerance: 1e-8,
            ..SolverConfig::default()
        }
    }

    fn kelvins(result: &SolverResult) -> Vec<f64> {
        result
            .surface_temperatures()
            .iter()
            .map(|t| t.get::<kelvin>())
            .collect()
    }

    fn assert_energy_balance(result: &SolverResult) {
        let q_out = result.heat_flow(Boundary::Outdoor).get::<watt_per_square_meter>();
        let q_in = result.heat_flow(Boundary::Indoor).get::<watt_per_square_meter>();
        let solar = result.absorbed_solar().get::<watt_per_square_meter>();
        let gains: f64 = result
            .ventilation_gains()
            .iter()
            .map(|g| g.get::<watt_per_square_meter>())
            .sum();
        assert_relative_eq!(q_out, q_in + solar - gains, epsilon = 1e-6);
    }

    #[test]
    fn double_clear_winter_u_value() {
        let result = solve(&double_clear(), &nfrc_winter(), &SolverConfig::default()).unwrap();

        let u = result.u_value().get::<watt_per_square_meter_kelvin>();
        assert!((2.2..3.3).contains(&u), "u = {u}");
        assert!(result.iterations() > 1);
        assert_eq!(result.surfaces().len(), 4);
        assert_energy_balance(&result);

        // Temperatures rise monotonically from outdoors to indoors.
        let t = kelvins(&result);
        assert!(t.windows(2).all(|w| w[0] < w[1]), "{t:?}");
        assert!(t[0] > 255.15 && t[3] < 294.15);
    }

    #[test]
    fn gap_flux_matches_boundary_flux_without_solar() {
        let result = solve(&double_clear(), &nfrc_winter(), &SolverConfig::default()).unwrap();

        let q_in = result.heat_flow(Boundary::Indoor).get::<watt_per_square_meter>();
        let q_gap = result.gap_heat_flows()[0].get::<watt_per_square_meter>();
        assert_relative_eq!(q_gap, q_in, max_relative = 1e-6);

        let k_gap = result.gap_effective_conductivities()[0].get::<watt_per_meter_kelvin>();
        assert!(k_gap > 0.024, "still air plus radiation exceeds air conductivity");

        for k in result.solid_effective_conductivities() {
            assert_relative_eq!(k.get::<watt_per_meter_kelvin>(), 1.0, max_relative = 1e-12);
        }
        assert!(result.effective_system_conductivity().get::<watt_per_meter_kelvin>() > 0.0);
    }

    #[test]
    fn single_pane_loses_more_than_double() {
        let single = unit_igu(vec![clear_glass().into()]);
        let config = SolverConfig::default();

        let single_u = solve(&single, &nfrc_winter(), &config).unwrap().u_value();
        let double_u = solve(&double_clear(), &nfrc_winter(), &config).unwrap().u_value();
        assert!(single_u > double_u);
        assert!(single_u.get::<watt_per_square_meter_kelvin>() > 5.0);
    }

    #[test]
    fn vacuum_with_pillars_beats_air() {
        let vacuum = unit_igu(vec![
            clear_glass().into(),
            vacuum_gap().into(),
            clear_glass().into(),
        ]);
        let config = SolverConfig::default();

        let result = solve(&vacuum, &nfrc_winter(), &config).unwrap();
        let air_u = solve(&double_clear(), &nfrc_winter(), &config).unwrap().u_value();

        let u = result.u_value().get::<watt_per_square_meter_kelvin>();
        assert!(u > 0.0 && u < air_u.get::<watt_per_square_meter_kelvin>(), "u = {u}");
        assert_energy_balance(&result);
    }

    #[test]
    fn argon_fill_beats_air() {
        use crate::support::thermo::{GasMixture, fluid::Argon};

        let argon_gap =
            GapLayer::new(Length::new::<millimeter>(12.0), GasMixture::pure::<Argon>()).unwrap();
        let argon = unit_igu(vec![
            clear_glass().into(),
            argon_gap.into(),
            clear_glass().into(),
        ]);
        let config = SolverConfig::default();

        let argon_u = solve(&argon, &nfrc_winter(), &config).unwrap().u_value();
        let air_u = solve(&double_clear(), &nfrc_winter(), &config).unwrap().u_value();
        assert!(argon_u < air_u);
    }

    #[test]
    fn solar_absorption_balances() {
        let result =
            solve(&sunlit_double_clear(), &nfrc_summer(), &SolverConfig::default()).unwrap();
        assert!(result.absorbed_solar().get::<watt_per_square_meter>() > 0.0);
        assert_energy_balance(&result);
    }

    #[test]
    fn indoor_shade_ventilates_with_room_air() {
        let igu = unit_igu(vec![
            clear_glass().into(),
            air_gap(12.0).into(),
            clear_glass().into(),
            air_gap(50.0).into(),
            open_shade().into(),
        ]);

        let result = solve(&igu, &nfrc_winter(), &SolverConfig::default()).unwrap();

        assert_eq!(result.gap_air_speeds()[0].get::<meter_per_second>(), 0.0);
        assert!(result.gap_air_speeds()[1].get::<meter_per_second>() > 0.0);
        assert_eq!(
            result.ventilation_flow(Boundary::Indoor),
            result.ventilation_gains()[1]
        );
        assert_eq!(
            result.ventilation_flow(Boundary::Outdoor).get::<watt_per_square_meter>(),
            0.0
        );
        // Room air is cooled against the glass in winter.
        assert!(result.ventilation_flow(Boundary::Indoor).get::<watt_per_square_meter>() < 0.0);
        assert_energy_balance(&result);
    }

    #[test]
    fn interior_shade_circulates_air_between_gaps() {
        let igu = unit_igu(vec![
            clear_glass().into(),
            air_gap(12.0).into(),
            open_shade().into(),
            air_gap(20.0).into(),
            clear_glass().into(),
        ]);

        let result = solve(&igu, &nfrc_winter(), &tight()).unwrap();

        // Equal volume flow through both gaps.
        let speeds: Vec<f64> = result
            .gap_air_speeds()
            .iter()
            .map(|v| v.get::<meter_per_second>())
            .collect();
        assert!(speeds[0] > 0.0, "speeds = {speeds:?}");
        assert_relative_eq!(speeds[1], speeds[0] * 12.0 / 20.0, max_relative = 1e-12);

        // Air cools in the outdoor-side gap and rewarms in the room-side gap.
        // Both carry the same temperature swing, so the gains differ only by
        // each gap's volumetric heat capacity.
        let gains: Vec<f64> = result
            .ventilation_gains()
            .iter()
            .map(|g| g.get::<watt_per_square_meter>())
            .collect();
        assert!(gains[0] < 0.0 && gains[1] > 0.0, "gains = {gains:?}");

        let t = kelvins(&result);
        let heat_capacity = |g: usize| {
            let mut air = GasMixture::pure::<Air>();
            air.set_temperature_and_pressure(
                ThermodynamicTemperature::new::<kelvin>(0.5 * (t[2 * g + 1] + t[2 * g + 2])),
                Pressure::new::<pascal>(ATMOSPHERIC_PRESSURE),
            );
            let props = air.properties().unwrap().raw();
            props.density * props.specific_heat
        };
        assert_relative_eq!(
            -gains[0] / gains[1],
            heat_capacity(0) / heat_capacity(1),
            max_relative = 1e-4
        );

        // Nothing is exchanged with the room or outdoors, so the boundary
        // flows differ by the loop's net gain alone.
        assert_eq!(
            result.ventilation_flow(Boundary::Indoor).get::<watt_per_square_meter>(),
            0.0
        );
        assert_eq!(
            result.ventilation_flow(Boundary::Outdoor).get::<watt_per_square_meter>(),
            0.0
        );
        let q_out = result.heat_flow(Boundary::Outdoor).get::<watt_per_square_meter>();
        let q_in = result.heat_flow(Boundary::Indoor).get::<watt_per_square_meter>();
        assert!(q_out > q_in, "q_out = {q_out}, q_in = {q_in}");
        assert_energy_balance(&result);

        let u = result.u_value().get::<watt_per_square_meter_kelvin>();
        assert!((1.0..3.0).contains(&u), "u = {u}");
    }

    #[test]
    fn thermochromic_emissivity_follows_converged_temperature() {
        let curve = PropertyCurve::new([
            (ThermodynamicTemperature::new::<kelvin>(250.0), 0.84),
            (ThermodynamicTemperature::new::<kelvin>(270.0), 0.3),
        ])
        .unwrap();
        let outer = SolidLayer::new(
            Length::new::<millimeter>(3.048),
            ThermalConductivity::new::<watt_per_meter_kelvin>(1.0),
            Surface::with_properties(curve.clone(), 0.0),
            Surface::new(0.84, 0.0),
        )
        .unwrap();
        let igu = unit_igu(vec![
            outer.into(),
            air_gap(12.0).into(),
            clear_glass().into(),
        ]);
        let environments = nfrc_winter();

        let result = solve(&igu, &environments, &tight()).unwrap();
        assert!(result.iterations() > 1);
        assert_energy_balance(&result);

        let t0 = result.surface_temperatures()[0];
        let emissivity = SurfaceProperty::from(curve).value_at(t0);
        assert!(emissivity > 0.3 && emissivity < 0.84, "emissivity = {emissivity}");

        // The outer radiosity is emitted at the curve value for the converged
        // temperature; an opaque face reflects the rest of the sky.
        let sky = environments
            .outdoor
            .radiosity(Angle::new::<degree>(90.0))
            .get::<watt_per_square_meter>();
        let j0 = result.radiosities()[0].get::<watt_per_square_meter>();
        let expected =
            emissivity * emissive_power(t0.get::<kelvin>()) + (1.0 - emissivity) * sky;
        assert_relative_eq!(j0, expected, max_relative = 1e-6);

        // Less emission to the cold surroundings than plain clear glass.
        let clear = solve(&double_clear(), &environments, &tight()).unwrap();
        assert!(result.u_value() < clear.u_value());
    }

    #[test]
    fn forced_ventilation_uses_given_speed() {
        let forced = air_gap(30.0).with_ventilation(ventilation::Ventilation::forced(
            VentilationInlet::Outdoor,
            NonNegative::new(Velocity::new::<meter_per_second>(0.5)).unwrap(),
        ));
        let igu = unit_igu(vec![clear_glass().into(), forced.into(), clear_glass().into()]);

        let result = solve(&igu, &nfrc_winter(), &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.gap_air_speeds()[0].get::<meter_per_second>(), 0.5);
        assert_eq!(
            result.ventilation_flow(Boundary::Outdoor),
            result.ventilation_gains()[0]
        );
        assert_energy_balance(&result);
    }

    #[test]
    fn reports_non_convergence() {
        let config = SolverConfig {
            max_iters: 1,
            ..SolverConfig::default()
        };

        match solve(&double_clear(), &nfrc_winter(), &config) {
            Err(SolveError::NonConvergence {
                iterations,
                max_change,
            }) => {
                assert_eq!(iterations, 1);
                assert!(max_change >= config.tolerance);
            }
            other => panic!("expected NonConvergence, got: {other:?}"),
        }
    }

    #[test]
    fn equal_air_temperatures_leave_u_undefined() {
        let mut environments = nfrc_winter();
        environments.outdoor.air_temperature = environments.indoor.air_temperature;
        environments.outdoor.sky_temperature = environments.indoor.air_temperature;

        let result = solve(&double_clear(), &environments, &SolverConfig::default()).unwrap();
        assert!(!result.u_value().get::<watt_per_square_meter_kelvin>().is_finite());
    }

    #[test]
    fn initial_profile_is_linear() {
        let igu = double_clear();
        let environments = nfrc_winter();
        let stack = Stack::new(&igu, &environments);
        let field = stack.initial_field();

        assert_eq!(field.temperatures.len(), 4);
        let step = (294.15 - 255.15) / 5.0;
        for (i, t) in field.temperatures.iter().enumerate() {
            assert_relative_eq!(*t, 255.15 + step * (i + 1) as f64, epsilon = 1e-9);
        }
        assert_relative_eq!(field.radiosities[0], emissive_power(field.temperatures[0]));
    }

    #[test]
    fn layer_enum_round_trips_through_stack() {
        let igu = double_clear();
        let environments = nfrc_winter();
        let stack = Stack::new(&igu, &environments);
        assert_eq!(stack.panes.len(), 2);
        assert_eq!(stack.gaps.len(), 1);
        assert!(matches!(igu.layers()[1], Layer::Gap(_)));
    }
}
