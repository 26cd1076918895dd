use crate::support::constraint::UnitInterval;

use super::LayerError;

/// Open-area fractions of a permeable shading layer.
///
/// `front` is the fraction of the shade face that is open. The edge fractions
/// are relative to the gap cross-section at that edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Openness {
    pub front: f64,
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Openness {
    /// A shade with no open area.
    #[must_use]
    pub fn closed() -> Self {
        Self::default()
    }

    /// Creates validated openness fractions.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::Openness`] if any fraction is outside `[0, 1]`.
    pub fn new(
        front: f64,
        top: f64,
        bottom: f64,
        left: f64,
        right: f64,
    ) -> Result<Self, LayerError> {
        let openness = Self {
            front,
            top,
            bottom,
            left,
            right,
        };
        openness.validate()?;
        Ok(openness)
    }

    /// Whether any opening lets air through.
    #[must_use]
    pub fn is_open(&self) -> bool {
        [self.front, self.top, self.bottom, self.left, self.right]
            .iter()
            .any(|&fraction| fraction > 0.0)
    }

    pub(crate) fn validate(&self) -> Result<(), LayerError> {
        let sides = [
            ("front", self.front),
            ("top", self.top),
            ("bottom", self.bottom),
            ("left", self.left),
            ("right", self.right),
        ];
        for (side, value) in sides {
            UnitInterval::new(value).map_err(|source| LayerError::Openness {
                side,
                value,
                source,
            })?;
        }
        Ok(())
    }
}
