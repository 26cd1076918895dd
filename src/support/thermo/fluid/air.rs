use uom::si::{f64::MolarMass, molar_mass::gram_per_mole};

use crate::support::thermo::{Coefficients, FillGas, GasData};

/// Dry air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Air;

impl FillGas for Air {
    fn gas_data() -> GasData {
        GasData {
            name: "Air",
            molecular_weight: MolarMass::new::<gram_per_mole>(28.97),
            specific_heat_ratio: 1.4,
            conductivity: Coefficients::linear(2.8733e-3, 7.76e-5),
            viscosity: Coefficients::linear(3.7233e-6, 4.94e-8),
            specific_heat: Coefficients::linear(1002.7370, 1.2324e-2),
        }
    }
}
