use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::support::constraint::{UnitInterval, UnitIntervalLowerOpen};

use super::LayerError;

/// A longwave surface property that may depend on surface temperature.
///
/// Thermochromic coatings are described with a [`PropertyCurve`]; everything
/// else is [`SurfaceProperty::Constant`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceProperty {
    Constant(f64),
    Curve(PropertyCurve),
}

impl SurfaceProperty {
    /// Evaluates the property at a surface temperature.
    #[must_use]
    pub fn value_at(&self, temperature: ThermodynamicTemperature) -> f64 {
        self.at_kelvin(temperature.get::<kelvin>())
    }

    pub(crate) fn at_kelvin(&self, temperature: f64) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::Curve(curve) => curve.at_kelvin(temperature),
        }
    }

    /// Temperatures at which the property changes slope.
    fn breakpoints(&self) -> &[(f64, f64)] {
        match self {
            Self::Constant(_) => &[],
            Self::Curve(curve) => &curve.points,
        }
    }

    /// Every value the property can take at a breakpoint.
    fn extreme_values(&self) -> Vec<f64> {
        match self {
            Self::Constant(value) => vec![*value],
            Self::Curve(curve) => curve.points.iter().map(|&(_, v)| v).collect(),
        }
    }
}

impl From<f64> for SurfaceProperty {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl From<PropertyCurve> for SurfaceProperty {
    fn from(curve: PropertyCurve) -> Self {
        Self::Curve(curve)
    }
}

/// Temperature-keyed table interpolated linearly and clamped at its ends.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyCurve {
    /// `(temperature [K], value)` pairs in ascending temperature order.
    points: Vec<(f64, f64)>,
}

impl PropertyCurve {
    /// Creates a curve from `(temperature, value)` points.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::Curve`] if the table is empty, holds a non-finite
    /// temperature or value, or its temperatures are not strictly increasing.
    pub fn new(
        points: impl IntoIterator<Item = (ThermodynamicTemperature, f64)>,
    ) -> Result<Self, LayerError> {
        let points: Vec<(f64, f64)> = points
            .into_iter()
            .map(|(t, v)| (t.get::<kelvin>(), v))
            .collect();

        if points.is_empty() {
            return Err(LayerError::Curve {
                context: "no points",
            });
        }
        if points.iter().any(|(t, v)| !t.is_finite() || !v.is_finite()) {
            return Err(LayerError::Curve {
                context: "points must be finite",
            });
        }
        if points.windows(2).any(|pair| pair[1].0 <= pair[0].0) {
            return Err(LayerError::Curve {
                context: "temperatures must be strictly increasing",
            });
        }

        Ok(Self { points })
    }

    fn at_kelvin(&self, temperature: f64) -> f64 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];

        if temperature.is_nan() || temperature <= first.0 {
            return first.1;
        }
        if temperature >= last.0 {
            return last.1;
        }

        let upper = self.points.partition_point(|&(t, _)| t < temperature);
        let (t0, v0) = self.points[upper - 1];
        let (t1, v1) = self.points[upper];
        v0 + (v1 - v0) * (temperature - t0) / (t1 - t0)
    }
}

/// Longwave properties of one face of a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub emissivity: SurfaceProperty,
    pub ir_transmittance: SurfaceProperty,
}

impl Surface {
    /// A surface with constant properties.
    #[must_use]
    pub fn new(emissivity: f64, ir_transmittance: f64) -> Self {
        Self {
            emissivity: SurfaceProperty::Constant(emissivity),
            ir_transmittance: SurfaceProperty::Constant(ir_transmittance),
        }
    }

    /// An opaque surface with the given emissivity.
    #[must_use]
    pub fn opaque(emissivity: f64) -> Self {
        Self::new(emissivity, 0.0)
    }

    /// A surface whose properties may vary with temperature.
    #[must_use]
    pub fn with_properties(
        emissivity: impl Into<SurfaceProperty>,
        ir_transmittance: impl Into<SurfaceProperty>,
    ) -> Self {
        Self {
            emissivity: emissivity.into(),
            ir_transmittance: ir_transmittance.into(),
        }
    }

    /// Evaluates both properties at a surface temperature in kelvin.
    pub(crate) fn optics_at(&self, temperature: f64) -> SurfaceOptics {
        SurfaceOptics {
            emissivity: self.emissivity.at_kelvin(temperature),
            transmittance: self.ir_transmittance.at_kelvin(temperature),
        }
    }

    /// Checks every value either property can take.
    ///
    /// Both properties are piecewise linear, so their sum peaks at a breakpoint
    /// of one of them.
    pub(crate) fn validate(&self) -> Result<(), LayerError> {
        for value in self.emissivity.extreme_values() {
            UnitIntervalLowerOpen::new(value)
                .map_err(|source| LayerError::Emissivity { value, source })?;
        }
        for value in self.ir_transmittance.extreme_values() {
            UnitInterval::new(value)
                .map_err(|source| LayerError::IrTransmittance { value, source })?;
        }

        let mut temperatures: Vec<f64> = self
            .emissivity
            .breakpoints()
            .iter()
            .chain(self.ir_transmittance.breakpoints())
            .map(|&(t, _)| t)
            .collect();
        if temperatures.is_empty() {
            temperatures.push(0.0);
        }

        for t in temperatures {
            let optics = self.optics_at(t);
            if optics.emissivity + optics.transmittance > 1.0 + 1e-12 {
                return Err(LayerError::SurfaceSum {
                    emissivity: optics.emissivity,
                    ir_transmittance: optics.transmittance,
                });
            }
        }

        Ok(())
    }
}

/// Surface properties evaluated at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SurfaceOptics {
    pub(crate) emissivity: f64,
    pub(crate) transmittance: f64,
}

impl SurfaceOptics {
    /// Longwave reflectance, `1 − ε − τ`.
    pub(crate) fn reflectance(&self) -> f64 {
        (1.0 - self.emissivity - self.transmittance).max(0.0)
    }
}
