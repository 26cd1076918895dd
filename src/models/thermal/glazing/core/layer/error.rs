use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors raised while constructing a layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayerError {
    /// Layer thickness must be strictly positive.
    #[error("invalid layer thickness")]
    Thickness(#[source] ConstraintError),

    /// Layer conductivity must be strictly positive.
    #[error("invalid layer conductivity")]
    Conductivity(#[source] ConstraintError),

    /// Emissivity must lie in `(0, 1]`.
    #[error("invalid emissivity {value}")]
    Emissivity {
        value: f64,
        source: ConstraintError,
    },

    /// IR transmittance must lie in `[0, 1]`.
    #[error("invalid IR transmittance {value}")]
    IrTransmittance {
        value: f64,
        source: ConstraintError,
    },

    /// Emissivity and IR transmittance of one surface exceed unity together.
    #[error("emissivity {emissivity} plus IR transmittance {ir_transmittance} exceeds 1")]
    SurfaceSum {
        emissivity: f64,
        ir_transmittance: f64,
    },

    /// Solar absorptance must lie in `[0, 1]`.
    #[error("invalid solar absorptance {value}")]
    Absorptance {
        value: f64,
        source: ConstraintError,
    },

    /// Openness fractions must lie in `[0, 1]`.
    #[error("invalid {side} openness {value}")]
    Openness {
        side: &'static str,
        value: f64,
        source: ConstraintError,
    },

    /// Gap pressure must be strictly positive.
    #[error("invalid gap pressure")]
    Pressure(#[source] ConstraintError),

    /// A property curve needs at least one finite point in ascending temperature order.
    #[error("invalid property curve: {context}")]
    Curve { context: &'static str },
}
