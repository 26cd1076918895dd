use uom::si::{f64::MolarMass, molar_mass::gram_per_mole};

use crate::support::thermo::{Coefficients, FillGas, GasData};

/// Krypton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Krypton;

impl FillGas for Krypton {
    fn gas_data() -> GasData {
        GasData {
            name: "Krypton",
            molecular_weight: MolarMass::new::<gram_per_mole>(83.8),
            specific_heat_ratio: 1.68,
            conductivity: Coefficients::linear(9.443e-4, 2.826e-5),
            viscosity: Coefficients::linear(2.213e-6, 7.7765e-8),
            specific_heat: Coefficients::constant(248.0907),
        }
    }
}
