use uom::si::{
    f64::{DynamicViscosity, MassDensity, MolarMass, SpecificHeatCapacity, ThermalConductivity},
    dynamic_viscosity::pascal_second,
    mass_density::kilogram_per_cubic_meter,
    molar_mass::gram_per_mole,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::units::ThermalDiffusivity;

/// Thermophysical properties of a gas or gas mixture at one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasProperties {
    pub molecular_weight: MolarMass,
    pub thermal_conductivity: ThermalConductivity,
    pub viscosity: DynamicViscosity,
    pub specific_heat: SpecificHeatCapacity,
    pub density: MassDensity,
    /// Ratio of specific heats, cp/cv.
    pub specific_heat_ratio: f64,
    /// Prandtl number, `cp·μ/k`.
    pub prandtl: f64,
    /// Thermal diffusivity, `k/(ρ·cp)`.
    pub thermal_diffusivity: ThermalDiffusivity,
}

/// Raw SI values used by the correlations that consume gas properties.
///
/// Conductivity in W/(m·K), viscosity in Pa·s, specific heat in J/(kg·K),
/// density in kg/m³ and molecular weight in kg/kmol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawGasProperties {
    pub(crate) molecular_weight: f64,
    pub(crate) conductivity: f64,
    pub(crate) viscosity: f64,
    pub(crate) specific_heat: f64,
    pub(crate) density: f64,
    pub(crate) specific_heat_ratio: f64,
    pub(crate) prandtl: f64,
}

impl GasProperties {
    /// Returns the properties as plain SI numbers.
    pub(crate) fn raw(&self) -> RawGasProperties {
        RawGasProperties {
            molecular_weight: self.molecular_weight.get::<gram_per_mole>(),
            conductivity: self.thermal_conductivity.get::<watt_per_meter_kelvin>(),
            viscosity: self.viscosity.get::<pascal_second>(),
            specific_heat: self.specific_heat.get::<joule_per_kilogram_kelvin>(),
            density: self.density.get::<kilogram_per_cubic_meter>(),
            specific_heat_ratio: self.specific_heat_ratio,
            prandtl: self.prandtl,
        }
    }
}
