use uom::si::{f64::MolarMass, molar_mass::gram_per_mole};

use crate::support::thermo::{Coefficients, FillGas, GasData};

/// Xenon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Xenon;

impl FillGas for Xenon {
    fn gas_data() -> GasData {
        GasData {
            name: "Xenon",
            molecular_weight: MolarMass::new::<gram_per_mole>(131.3),
            specific_heat_ratio: 1.66,
            conductivity: Coefficients::linear(4.538e-4, 1.723e-5),
            viscosity: Coefficients::linear(1.069e-6, 7.414e-8),
            specific_heat: Coefficients::constant(158.3397),
        }
    }
}
