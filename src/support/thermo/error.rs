use thiserror::Error;
use uom::si::f64::ThermodynamicTemperature;

/// Errors that may occur when evaluating gas mixture properties.
///
/// Each variant separates a bad mixture definition from bad gas data so
/// callers can report which input needs fixing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GasError {
    /// The molar fractions of all components sum to zero.
    #[error("gas mixture has zero total molar fraction")]
    ZeroGasFraction,

    /// A component has a zero molecular weight.
    #[error("gas component {component} ({name}) has zero molecular weight")]
    ZeroMolecularWeight {
        /// Index of the offending component within the mixture.
        component: usize,
        name: &'static str,
    },

    /// A component's viscosity fit evaluates to zero.
    #[error("gas component {component} ({name}) has zero viscosity at {temperature:?}")]
    ZeroViscosity {
        /// Index of the offending component within the mixture.
        component: usize,
        name: &'static str,
        temperature: ThermodynamicTemperature,
    },
}
