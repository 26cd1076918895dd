//! Thermophysical properties of glazing fill gases.
//!
//! Pure-gas conductivity, viscosity and specific heat are quadratic
//! polynomials in absolute temperature ([`Coefficients`]). A [`GasMixture`]
//! combines any number of [`GasComponent`]s and evaluates mixture properties
//! at its current [`GasState`], either with simple mole-fraction weighting or
//! with full kinetic-theory mixing rules.
//!
//! # Example
//!
//! ```
//! use twine_glazing::support::thermo::{
//!     GasComponent, GasMixture,
//!     fluid::{Air, Argon},
//! };
//! use uom::si::{
//!     f64::{Pressure, ThermodynamicTemperature},
//!     pressure::pascal,
//!     thermal_conductivity::watt_per_meter_kelvin,
//!     thermodynamic_temperature::kelvin,
//! };
//!
//! let mut gas = GasMixture::new(vec![
//!     GasComponent::of::<Air>(0.1),
//!     GasComponent::of::<Argon>(0.9),
//! ]);
//! gas.set_temperature_and_pressure(
//!     ThermodynamicTemperature::new::<kelvin>(300.0),
//!     Pressure::new::<pascal>(101_325.0),
//! );
//!
//! let props = gas.properties().unwrap();
//! assert!((props.thermal_conductivity.get::<watt_per_meter_kelvin>() - 1.8509e-2).abs() < 1e-6);
//! ```

mod coefficients;
mod error;
mod gas_data;
mod ideal_gas;
mod mixture;
mod properties;
mod state;

pub mod fluid;

pub use coefficients::Coefficients;
pub use error::GasError;
pub use gas_data::{FillGas, GasData};
pub use ideal_gas::UNIVERSAL_GAS_CONSTANT;
pub use mixture::{GasComponent, GasMixture};
pub use properties::GasProperties;
pub use state::GasState;

pub(crate) use ideal_gas::{density, specific_gas_constant};
pub(crate) use properties::RawGasProperties;
