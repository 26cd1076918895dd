//! Longwave radiation relations.
//!
//! Each face of a pane leaves a radiosity `J = εσT⁴ + ρG + τG'`, where `G`
//! is the radiosity incident on that face and `G'` the radiosity incident on
//! the opposite face of the same pane, part of which passes straight through.
//! The solver linearises emission about the previous iterate as `(εσT_old³)·T`.

use uom::si::{
    f64::{HeatFluxDensity, HeatTransfer, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    heat_transfer::watt_per_square_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use super::layer::SurfaceOptics;

/// Stefan–Boltzmann constant in W/(m²·K⁴), as used by ISO 15099.
pub const STEFAN_BOLTZMANN: f64 = 5.6697e-8;

/// Radiosity of a black body, `σT⁴`.
#[must_use]
pub fn black_body_radiosity(temperature: ThermodynamicTemperature) -> HeatFluxDensity {
    HeatFluxDensity::new::<watt_per_square_meter>(emissive_power(temperature.get::<kelvin>()))
}

/// Temperature of the black body with the given radiosity.
#[must_use]
pub fn radiant_temperature(radiosity: HeatFluxDensity) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<kelvin>(radiant_kelvin(
        radiosity.get::<watt_per_square_meter>(),
    ))
}

/// Effective emissivity of two infinite parallel grey planes.
#[must_use]
pub fn parallel_plate_emissivity(emissivity_1: f64, emissivity_2: f64) -> f64 {
    1.0 / (1.0 / emissivity_1 + 1.0 / emissivity_2 - 1.0)
}

/// Linearised radiative coefficient `εσ(Ts² + Tr²)(Ts + Tr)`.
#[must_use]
pub fn radiative_coefficient(
    emissivity: f64,
    surface: ThermodynamicTemperature,
    radiant: ThermodynamicTemperature,
) -> HeatTransfer {
    HeatTransfer::new::<watt_per_square_meter_kelvin>(radiative_coefficient_kelvin(
        emissivity,
        surface.get::<kelvin>(),
        radiant.get::<kelvin>(),
    ))
}

pub(crate) fn emissive_power(temperature: f64) -> f64 {
    STEFAN_BOLTZMANN * temperature.powi(4)
}

pub(crate) fn radiant_kelvin(radiosity: f64) -> f64 {
    (radiosity.max(0.0) / STEFAN_BOLTZMANN).powf(0.25)
}

pub(crate) fn radiative_coefficient_kelvin(emissivity: f64, surface: f64, radiant: f64) -> f64 {
    emissivity * STEFAN_BOLTZMANN * (surface * surface + radiant * radiant) * (surface + radiant)
}

/// Coefficients of one linearised radiosity equation.
///
/// Represents `J − e·T − ρ·G_same − τ·G_opposite = 0` for one face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RadiosityBalance {
    /// Linearised emission coefficient, `εσT_old³`.
    pub(crate) emission: f64,
    /// Reflectance of this face.
    pub(crate) reflectance: f64,
    /// Transmittance of the opposite face for radiation incident on it.
    pub(crate) transmittance: f64,
}

impl RadiosityBalance {
    /// Balance for a face with `optics`, whose pane passes `opposite_transmittance`
    /// of the radiation arriving on its other face.
    pub(crate) fn new(optics: SurfaceOptics, opposite_transmittance: f64, t_old: f64) -> Self {
        Self {
            emission: optics.emissivity * STEFAN_BOLTZMANN * t_old.powi(3),
            reflectance: optics.reflectance(),
            transmittance: opposite_transmittance,
        }
    }
}
