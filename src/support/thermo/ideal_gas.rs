//! Ideal gas equation of state helpers.
//!
//! Fill gases are treated as ideal: `p = ρ·R·T`, with `R` the universal gas
//! constant divided by the molecular weight.

use uom::si::{
    f64::{MassDensity, MolarMass, Pressure, ThermodynamicTemperature},
    molar_mass::gram_per_mole,
    specific_heat_capacity::joule_per_kilogram_kelvin,
};

use crate::support::units::SpecificGasConstant;

/// Universal gas constant in J/(kmol·K).
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8314.462175;

/// Computes the specific gas constant for a given molecular weight.
#[must_use]
pub(crate) fn specific_gas_constant(molecular_weight: MolarMass) -> SpecificGasConstant {
    SpecificGasConstant::new::<joule_per_kilogram_kelvin>(
        UNIVERSAL_GAS_CONSTANT / molecular_weight.get::<gram_per_mole>(),
    )
}

/// Computes density using the ideal gas equation of state.
#[must_use]
pub(crate) fn density(
    temperature: ThermodynamicTemperature,
    pressure: Pressure,
    gas_constant: SpecificGasConstant,
) -> MassDensity {
    pressure / (gas_constant * temperature)
}
