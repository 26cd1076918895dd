use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

/// The temperature and pressure at which gas properties are evaluated.
///
/// The default state is 273.15 K at standard atmospheric pressure.
///
/// # Example
///
/// ```
/// use twine_glazing::support::thermo::GasState;
/// use uom::si::{
///     f64::{Pressure, ThermodynamicTemperature},
///     pressure::pascal,
///     thermodynamic_temperature::kelvin,
/// };
///
/// let state = GasState::new(
///     ThermodynamicTemperature::new::<kelvin>(283.15),
///     Pressure::new::<pascal>(0.1),
/// );
/// assert_eq!(state.pressure.get::<pascal>(), 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasState {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
}

impl GasState {
    /// Creates a new state with the given temperature and pressure.
    #[must_use]
    pub fn new(temperature: ThermodynamicTemperature, pressure: Pressure) -> Self {
        Self {
            temperature,
            pressure,
        }
    }
}

impl Default for GasState {
    fn default() -> Self {
        Self {
            temperature: ThermodynamicTemperature::new::<kelvin>(273.15),
            pressure: Pressure::new::<pascal>(101_325.0),
        }
    }
}
