use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for computing temperature differences.
///
/// This trait provides a [`minus`](Self::minus) method that subtracts two
/// [`ThermodynamicTemperature`] values (absolute temperatures) and returns a
/// [`TemperatureInterval`] (temperature difference).
///
/// For background on this distinction and why this extension is needed:
/// [#380](https://github.com/iliekturtles/uom/issues/380),
/// [#289](https://github.com/iliekturtles/uom/issues/289),
/// [#403](https://github.com/iliekturtles/uom/issues/403).
///
/// [`TemperatureInterval`]: uom::si::f64::TemperatureInterval
/// [`ThermodynamicTemperature`]: uom::si::f64::ThermodynamicTemperature
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::{degree_celsius, kelvin as abs_kelvin},
    };

    #[test]
    fn winter_design_difference() {
        let indoor = ThermodynamicTemperature::new::<abs_kelvin>(294.15);
        let outdoor = ThermodynamicTemperature::new::<abs_kelvin>(255.15);

        assert_relative_eq!(indoor.minus(outdoor).get::<delta_kelvin>(), 39.0, epsilon = 1e-12);
        assert_relative_eq!(outdoor.minus(indoor).get::<delta_kelvin>(), -39.0, epsilon = 1e-12);
    }

    #[test]
    fn mixed_scales() {
        let surface = ThermodynamicTemperature::new::<degree_celsius>(21.0);
        let air = ThermodynamicTemperature::new::<abs_kelvin>(294.15);
        assert_relative_eq!(surface.minus(air).get::<delta_kelvin>(), 0.0, epsilon = 1e-12);
    }
}
