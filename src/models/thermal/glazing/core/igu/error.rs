use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors raised while assembling an IGU.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IguError {
    /// The IGU has no layers.
    #[error("an IGU needs at least one layer")]
    Empty,

    /// The outermost or innermost layer is a gap.
    #[error("layer {index} is a gap at the boundary of the IGU")]
    GapAtBoundary { index: usize },

    /// Two gaps are adjacent.
    #[error("layers {index} and {} are both gaps", index + 1)]
    AdjacentGaps { index: usize },

    /// Two panes are adjacent with no gap between them.
    #[error("layers {index} and {} are both panes with no gap between them", index + 1)]
    MissingGap { index: usize },

    /// A gap is both ventilated and supported by pillars.
    #[error("gap layer {index} cannot be both ventilated and pillar-supported")]
    VentilatedPillarGap { index: usize },

    /// Width or height is not strictly positive.
    #[error("invalid IGU {dimension}")]
    Dimension {
        dimension: &'static str,
        source: ConstraintError,
    },

    /// Tilt is outside `[0°, 180°]`.
    #[error("tilt {degrees}° is outside [0°, 180°]")]
    Tilt { degrees: f64 },
}
