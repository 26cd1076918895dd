use uom::si::{f64::MolarMass, molar_mass::gram_per_mole};

use crate::support::thermo::{Coefficients, FillGas, GasData};

/// Argon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Argon;

impl FillGas for Argon {
    fn gas_data() -> GasData {
        GasData {
            name: "Argon",
            molecular_weight: MolarMass::new::<gram_per_mole>(39.948),
            specific_heat_ratio: 1.67,
            conductivity: Coefficients::linear(2.2848e-3, 5.1486e-5),
            viscosity: Coefficients::linear(3.3786e-6, 6.4514e-8),
            specific_heat: Coefficients::constant(521.9285),
        }
    }
}
