//! Results of a converged heat-balance solve.

use uom::si::{
    f64::{HeatFluxDensity, HeatTransfer, ThermalConductivity, ThermodynamicTemperature, Velocity},
    heat_flux_density::watt_per_square_meter,
};

use super::environment::Boundary;

/// Temperature and radiosity of one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceState {
    pub temperature: ThermodynamicTemperature,
    pub radiosity: HeatFluxDensity,
}

/// Converged state and derived performance of one solve.
///
/// Surfaces are indexed from the outdoor face of the outermost pane: surface
/// `2k` is the front of pane `k` and surface `2k + 1` its back. Gap `g` lies
/// between panes `g` and `g + 1`.
///
/// Heat flows are positive from indoor towards outdoor.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult {
    pub(super) surfaces: Vec<SurfaceState>,
    pub(super) iterations: usize,
    pub(super) heat_flow_outdoor: HeatFluxDensity,
    pub(super) heat_flow_indoor: HeatFluxDensity,
    pub(super) ventilation_outdoor: HeatFluxDensity,
    pub(super) ventilation_indoor: HeatFluxDensity,
    pub(super) gap_heat_flows: Vec<HeatFluxDensity>,
    pub(super) gap_air_speeds: Vec<Velocity>,
    pub(super) ventilation_gains: Vec<HeatFluxDensity>,
    pub(super) solid_conductivities: Vec<ThermalConductivity>,
    pub(super) gap_conductivities: Vec<ThermalConductivity>,
    pub(super) system_conductivity: ThermalConductivity,
    pub(super) absorbed_solar: HeatFluxDensity,
    pub(super) u_value: HeatTransfer,
}

impl SolverResult {
    #[must_use]
    pub fn surfaces(&self) -> &[SurfaceState] {
        &self.surfaces
    }

    #[must_use]
    pub fn surface_temperatures(&self) -> Vec<ThermodynamicTemperature> {
        self.surfaces.iter().map(|s| s.temperature).collect()
    }

    #[must_use]
    pub fn radiosities(&self) -> Vec<HeatFluxDensity> {
        self.surfaces.iter().map(|s| s.radiosity).collect()
    }

    /// Iterations taken to converge.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Net heat flow through the glazing at a boundary.
    ///
    /// Outdoors this is the flow leaving the outermost surface; indoors the
    /// flow arriving at the innermost surface from the room.
    #[must_use]
    pub fn heat_flow(&self, boundary: Boundary) -> HeatFluxDensity {
        match boundary {
            Boundary::Outdoor => self.heat_flow_outdoor,
            Boundary::Indoor => self.heat_flow_indoor,
        }
    }

    /// Heat returned to an environment by ventilation air drawn from it.
    ///
    /// Negative when the air is cooled in the gap.
    #[must_use]
    pub fn ventilation_flow(&self, boundary: Boundary) -> HeatFluxDensity {
        match boundary {
            Boundary::Outdoor => self.ventilation_outdoor,
            Boundary::Indoor => self.ventilation_indoor,
        }
    }

    /// Convective plus radiative flow across each gap.
    #[must_use]
    pub fn gap_heat_flows(&self) -> &[HeatFluxDensity] {
        &self.gap_heat_flows
    }

    /// Mean air speed in each gap; zero for sealed gaps.
    #[must_use]
    pub fn gap_air_speeds(&self) -> &[Velocity] {
        &self.gap_air_speeds
    }

    /// Heat picked up by the air in each gap.
    #[must_use]
    pub fn ventilation_gains(&self) -> &[HeatFluxDensity] {
        &self.ventilation_gains
    }

    /// Effective conductivity of each pane.
    #[must_use]
    pub fn solid_effective_conductivities(&self) -> &[ThermalConductivity] {
        &self.solid_conductivities
    }

    /// Conductivity of a solid layer of the gap's thickness passing the same flow.
    #[must_use]
    pub fn gap_effective_conductivities(&self) -> &[ThermalConductivity] {
        &self.gap_conductivities
    }

    /// Conductivity of a solid of the IGU's thickness passing the indoor flow.
    #[must_use]
    pub fn effective_system_conductivity(&self) -> ThermalConductivity {
        self.system_conductivity
    }

    /// Solar radiation absorbed by all layers.
    #[must_use]
    pub fn absorbed_solar(&self) -> HeatFluxDensity {
        self.absorbed_solar
    }

    /// Net heat loss from the room: indoor surface flow minus the heat
    /// ventilation air brings back.
    #[must_use]
    pub fn room_heat_loss(&self) -> HeatFluxDensity {
        self.heat_flow_indoor - self.ventilation_indoor
    }

    /// Heat transfer coefficient of this case, `(q_in − V_in)/(T_in − T_out)`.
    ///
    /// Not finite when the indoor and outdoor air temperatures are equal.
    #[must_use]
    pub fn u_value(&self) -> HeatTransfer {
        self.u_value
    }

    pub(super) fn room_heat_loss_w(&self) -> f64 {
        self.room_heat_loss().get::<watt_per_square_meter>()
    }
}
