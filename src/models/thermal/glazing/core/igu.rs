//! Assembly of layers into an insulating glazing unit.

mod error;

pub use error::IguError;

use uom::si::{
    angle::degree,
    f64::{Angle, Length, ThermalConductivity},
    length::meter,
};

use crate::support::constraint::StrictlyPositive;

use super::{
    layer::{GapLayer, Layer, Openness, ShadingLayer, SolidLayer, Surface},
    ventilation::{VentilationFlow, VentilationInlet, open_ends},
};

/// An ordered stack of layers, outdoor first.
///
/// Panes (solid or shading layers) alternate with gaps, so a stack of `n`
/// panes has `n − 1` gaps and `2n` surfaces. Surface `2k` is the outdoor-facing
/// front of pane `k`; surface `2k + 1` is its indoor-facing back.
#[derive(Debug, Clone)]
pub struct Igu {
    layers: Vec<Layer>,
    width: Length,
    height: Length,
    tilt: Angle,
}

impl Igu {
    /// Creates an IGU from layers ordered outdoor to indoor.
    ///
    /// `tilt` is measured from horizontal; 90° is a vertical window.
    ///
    /// # Errors
    ///
    /// Returns an [`IguError`] if the layer sequence is not
    /// pane, gap, pane, ..., pane, if a dimension is not strictly positive,
    /// or if the tilt is outside `[0°, 180°]`.
    pub fn new(
        layers: Vec<Layer>,
        width: Length,
        height: Length,
        tilt: Angle,
    ) -> Result<Self, IguError> {
        validate_sequence(&layers)?;

        let width = StrictlyPositive::new(width)
            .map_err(|source| IguError::Dimension {
                dimension: "width",
                source,
            })?
            .into_inner();
        let height = StrictlyPositive::new(height)
            .map_err(|source| IguError::Dimension {
                dimension: "height",
                source,
            })?
            .into_inner();

        let degrees = tilt.get::<degree>();
        if !(0.0..=180.0).contains(&degrees) {
            return Err(IguError::Tilt { degrees });
        }

        Ok(Self {
            layers,
            width,
            height,
            tilt,
        })
    }

    /// Creates a vertical IGU.
    ///
    /// # Errors
    ///
    /// See [`Igu::new`].
    pub fn vertical(layers: Vec<Layer>, width: Length, height: Length) -> Result<Self, IguError> {
        Self::new(layers, width, height, Angle::new::<degree>(90.0))
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[must_use]
    pub fn width(&self) -> Length {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> Length {
        self.height
    }

    #[must_use]
    pub fn tilt(&self) -> Angle {
        self.tilt
    }

    /// Number of solid and shading layers.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.layers.len().div_ceil(2)
    }

    #[must_use]
    pub fn surface_count(&self) -> usize {
        2 * self.pane_count()
    }

    /// Overall thickness of the stack.
    #[must_use]
    pub fn total_thickness(&self) -> Length {
        Length::new::<meter>(
            self.layers
                .iter()
                .map(|layer| layer.thickness().get::<meter>())
                .sum(),
        )
    }

    /// Panes ordered outdoor to indoor.
    pub(crate) fn panes(&self) -> impl Iterator<Item = Pane<'_>> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Solid(solid) => Some(Pane::Solid(solid)),
            Layer::Shading(shade) => Some(Pane::Shading(shade)),
            Layer::Gap(_) => None,
        })
    }

    /// Gaps ordered outdoor to indoor; gap `g` lies between panes `g` and `g + 1`.
    pub(crate) fn gaps(&self) -> impl Iterator<Item = &GapLayer> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Gap(gap) => Some(gap),
            _ => None,
        })
    }

    /// Discovers every path along which air moves through the gaps.
    ///
    /// Explicitly ventilated gaps come first. Then each shade with open area
    /// claims the unventilated gaps beside it: an outermost shade draws from
    /// the environment on its open side, and an interior shade circulates air
    /// between the gaps on either side. A gap joins at most one path.
    pub(crate) fn airflow_paths(&self) -> Vec<AirflowPath> {
        let panes: Vec<Pane<'_>> = self.panes().collect();
        let gaps: Vec<&GapLayer> = self.gaps().collect();
        let mut claimed = vec![false; gaps.len()];
        let mut paths = Vec::new();

        for (g, gap) in gaps.iter().enumerate() {
            if let Some(ventilation) = gap.ventilation() {
                claimed[g] = true;
                let openness = [&panes[g], &panes[g + 1]]
                    .into_iter()
                    .find_map(|pane| pane.openness().copied())
                    .unwrap_or_else(open_ends);
                paths.push(AirflowPath::Open {
                    gap: g,
                    inlet: ventilation.inlet,
                    flow: ventilation.flow,
                    openness,
                });
            }
        }

        let last = panes.len() - 1;
        for (k, pane) in panes.iter().enumerate() {
            let Some(openness) = pane.openness().copied().filter(Openness::is_open) else {
                continue;
            };
            let front_gap = k.checked_sub(1);
            let back_gap = (k < last).then_some(k);

            match (front_gap, back_gap) {
                (None, Some(g)) if !claimed[g] => {
                    claimed[g] = true;
                    paths.push(AirflowPath::natural(g, VentilationInlet::Outdoor, openness));
                }
                (Some(g), None) if !claimed[g] => {
                    claimed[g] = true;
                    paths.push(AirflowPath::natural(g, VentilationInlet::Indoor, openness));
                }
                (Some(a), Some(b)) if !claimed[a] && !claimed[b] => {
                    claimed[a] = true;
                    claimed[b] = true;
                    paths.push(AirflowPath::Loop {
                        gaps: [a, b],
                        openness,
                    });
                }
                _ => {}
            }
        }

        paths
    }
}

fn validate_sequence(layers: &[Layer]) -> Result<(), IguError> {
    let (Some(first), Some(last)) = (layers.first(), layers.last()) else {
        return Err(IguError::Empty);
    };
    if first.is_gap() {
        return Err(IguError::GapAtBoundary { index: 0 });
    }
    if last.is_gap() {
        return Err(IguError::GapAtBoundary {
            index: layers.len() - 1,
        });
    }

    for (index, pair) in layers.windows(2).enumerate() {
        match (pair[0].is_gap(), pair[1].is_gap()) {
            (true, true) => return Err(IguError::AdjacentGaps { index }),
            (false, false) => return Err(IguError::MissingGap { index }),
            _ => {}
        }
    }

    let ventilated_pillars = |layer: &Layer| {
        matches!(layer, Layer::Gap(gap) if gap.ventilation().is_some() && gap.pillars().is_some())
    };
    if let Some(index) = layers.iter().position(ventilated_pillars) {
        return Err(IguError::VentilatedPillarGap { index });
    }

    Ok(())
}

/// A solid or shading layer, borrowed from the IGU.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Pane<'a> {
    Solid(&'a SolidLayer),
    Shading(&'a ShadingLayer),
}

impl Pane<'_> {
    pub(crate) fn thickness(&self) -> Length {
        match self {
            Self::Solid(solid) => solid.thickness(),
            Self::Shading(shade) => shade.thickness(),
        }
    }

    pub(crate) fn conductivity(&self) -> ThermalConductivity {
        match self {
            Self::Solid(solid) => solid.conductivity(),
            Self::Shading(shade) => shade.conductivity(),
        }
    }

    pub(crate) fn front(&self) -> &Surface {
        match self {
            Self::Solid(solid) => solid.front(),
            Self::Shading(shade) => shade.front(),
        }
    }

    pub(crate) fn back(&self) -> &Surface {
        match self {
            Self::Solid(solid) => solid.back(),
            Self::Shading(shade) => shade.back(),
        }
    }

    pub(crate) fn solar_absorptance(&self) -> f64 {
        match self {
            Self::Solid(solid) => solid.solar_absorptance(),
            Self::Shading(shade) => shade.solar_absorptance(),
        }
    }

    /// Openness of a shading layer; solid layers have none.
    pub(crate) fn openness(&self) -> Option<&Openness> {
        match self {
            Self::Solid(_) => None,
            Self::Shading(shade) => Some(shade.openness()),
        }
    }
}

/// A route air takes through one or two gaps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AirflowPath {
    /// Air drawn from a reservoir through one gap.
    Open {
        gap: usize,
        inlet: VentilationInlet,
        flow: VentilationFlow,
        openness: Openness,
    },
    /// Air circulating between the two gaps around an interior shade.
    Loop { gaps: [usize; 2], openness: Openness },
}

impl AirflowPath {
    fn natural(gap: usize, inlet: VentilationInlet, openness: Openness) -> Self {
        Self::Open {
            gap,
            inlet,
            flow: VentilationFlow::Natural,
            openness,
        }
    }
}
