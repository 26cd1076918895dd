use uom::si::{f64::MolarMass, molar_mass::gram_per_mole};

use super::Coefficients;

/// Property data for a single pure gas.
///
/// Built-in gases are available through the [`FillGas`] markers in
/// [`fluid`](super::fluid). Custom gases can be described directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasData {
    pub name: &'static str,
    pub molecular_weight: MolarMass,
    /// Ratio of specific heats, cp/cv.
    pub specific_heat_ratio: f64,
    pub conductivity: Coefficients,
    pub viscosity: Coefficients,
    pub specific_heat: Coefficients,
}

impl GasData {
    /// Molecular weight in kg/kmol (numerically equal to g/mol).
    pub(crate) fn molecular_weight_kg_per_kmol(&self) -> f64 {
        self.molecular_weight.get::<gram_per_mole>()
    }
}

/// A named fill gas with tabulated property fits.
pub trait FillGas {
    fn gas_data() -> GasData;
}
