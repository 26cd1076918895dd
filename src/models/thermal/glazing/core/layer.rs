//! Layers of an insulating glazing unit.
//!
//! An IGU is a stack of [`Layer`]s ordered from outdoor to indoor. Solid and
//! shading layers conduct heat between their two faces; gap layers hold a gas
//! fill and couple the faces of their neighbours through convection and
//! radiation.

mod error;
mod openness;
mod surface;

pub use error::LayerError;
pub use openness::Openness;
pub use surface::{PropertyCurve, Surface, SurfaceProperty};

pub(crate) use surface::SurfaceOptics;

use uom::si::{
    f64::{
        HeatFluxDensity, HeatTransfer, Length, Pressure, ThermalConductivity,
        ThermodynamicTemperature,
    },
    heat_flux_density::watt_per_square_meter,
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    pressure::pascal,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::{
    constraint::{StrictlyPositive, UnitInterval},
    thermo::{GasError, GasMixture, fluid::Air},
    units::TemperatureDifference,
};

use super::{pillar::PillarArray, ventilation::Ventilation};

/// Standard atmospheric pressure, the default fill pressure of a gap.
pub(crate) const ATMOSPHERIC_PRESSURE: f64 = 101_325.0;

/// One layer of the stack.
#[derive(Debug, Clone)]
pub enum Layer {
    Solid(SolidLayer),
    Gap(GapLayer),
    Shading(ShadingLayer),
}

impl Layer {
    #[must_use]
    pub fn thickness(&self) -> Length {
        match self {
            Self::Solid(solid) => solid.thickness,
            Self::Gap(gap) => gap.thickness,
            Self::Shading(shade) => shade.thickness,
        }
    }

    #[must_use]
    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap(_))
    }
}

impl From<SolidLayer> for Layer {
    fn from(layer: SolidLayer) -> Self {
        Self::Solid(layer)
    }
}

impl From<GapLayer> for Layer {
    fn from(layer: GapLayer) -> Self {
        Self::Gap(layer)
    }
}

impl From<ShadingLayer> for Layer {
    fn from(layer: ShadingLayer) -> Self {
        Self::Shading(layer)
    }
}

/// A conducting pane such as glass or a rigid film.
#[derive(Debug, Clone)]
pub struct SolidLayer {
    thickness: Length,
    conductivity: ThermalConductivity,
    front: Surface,
    back: Surface,
    solar_absorptance: f64,
}

impl SolidLayer {
    /// Creates a solid layer with no solar absorptance.
    ///
    /// # Errors
    ///
    /// Returns a [`LayerError`] if the thickness or conductivity is not
    /// strictly positive, or if either surface has invalid longwave properties.
    pub fn new(
        thickness: Length,
        conductivity: ThermalConductivity,
        front: Surface,
        back: Surface,
    ) -> Result<Self, LayerError> {
        let thickness = StrictlyPositive::new(thickness)
            .map_err(LayerError::Thickness)?
            .into_inner();
        let conductivity = StrictlyPositive::new(conductivity)
            .map_err(LayerError::Conductivity)?
            .into_inner();
        front.validate()?;
        back.validate()?;

        Ok(Self {
            thickness,
            conductivity,
            front,
            back,
            solar_absorptance: 0.0,
        })
    }

    /// Sets the fraction of incident outdoor solar radiation absorbed by this layer.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::Absorptance`] if the value is outside `[0, 1]`.
    pub fn with_solar_absorptance(mut self, absorptance: f64) -> Result<Self, LayerError> {
        self.solar_absorptance = validate_absorptance(absorptance)?;
        Ok(self)
    }

    #[must_use]
    pub fn thickness(&self) -> Length {
        self.thickness
    }

    #[must_use]
    pub fn conductivity(&self) -> ThermalConductivity {
        self.conductivity
    }

    #[must_use]
    pub fn front(&self) -> &Surface {
        &self.front
    }

    #[must_use]
    pub fn back(&self) -> &Surface {
        &self.back
    }

    #[must_use]
    pub fn solar_absorptance(&self) -> f64 {
        self.solar_absorptance
    }

    /// Conductance through the layer, `k/t`.
    #[must_use]
    pub fn conductance(&self) -> HeatTransfer {
        self.conductivity / self.thickness
    }

    /// Conductive heat flux from the front face to the back face.
    #[must_use]
    pub fn heat_flow(
        &self,
        front_temperature: ThermodynamicTemperature,
        back_temperature: ThermodynamicTemperature,
    ) -> HeatFluxDensity {
        self.conductance() * front_temperature.minus(back_temperature)
    }
}

/// A gas-filled space between two panes.
#[derive(Debug, Clone)]
pub struct GapLayer {
    thickness: Length,
    gas: GasMixture,
    pressure: Pressure,
    ventilation: Option<Ventilation>,
    pillars: Option<PillarArray>,
}

impl GapLayer {
    /// Creates a sealed gap at atmospheric pressure.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::Thickness`] if the thickness is not strictly positive.
    pub fn new(thickness: Length, gas: GasMixture) -> Result<Self, LayerError> {
        let thickness = StrictlyPositive::new(thickness)
            .map_err(LayerError::Thickness)?
            .into_inner();

        Ok(Self {
            thickness,
            gas,
            pressure: Pressure::new::<pascal>(ATMOSPHERIC_PRESSURE),
            ventilation: None,
            pillars: None,
        })
    }

    /// Sets the fill pressure.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::Pressure`] if the pressure is not strictly positive.
    pub fn with_pressure(mut self, pressure: Pressure) -> Result<Self, LayerError> {
        self.pressure = StrictlyPositive::new(pressure)
            .map_err(LayerError::Pressure)?
            .into_inner();
        Ok(self)
    }

    /// Ventilates the gap with air.
    #[must_use]
    pub fn with_ventilation(mut self, ventilation: Ventilation) -> Self {
        self.ventilation = Some(ventilation);
        self
    }

    /// Supports the gap with an array of pillars.
    #[must_use]
    pub fn with_pillars(mut self, pillars: PillarArray) -> Self {
        self.pillars = Some(pillars);
        self
    }

    #[must_use]
    pub fn thickness(&self) -> Length {
        self.thickness
    }

    #[must_use]
    pub fn gas(&self) -> &GasMixture {
        &self.gas
    }

    #[must_use]
    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    #[must_use]
    pub fn ventilation(&self) -> Option<&Ventilation> {
        self.ventilation.as_ref()
    }

    #[must_use]
    pub fn pillars(&self) -> Option<&PillarArray> {
        self.pillars.as_ref()
    }
}

/// A permeable or non-planar shade such as a blind, screen or roller.
#[derive(Debug, Clone)]
pub struct ShadingLayer {
    thickness: Length,
    conductivity: ThermalConductivity,
    openness: Openness,
    front: Surface,
    back: Surface,
    solar_absorptance: f64,
    exchange: Option<ExchangeFactors>,
}

/// Precomputed effective longwave properties of a non-planar shade.
///
/// Produced by an enclosure view-factor calculation and used in place of the
/// material surfaces in the radiation network.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeFactors {
    pub front: Surface,
    pub back: Surface,
}

impl ShadingLayer {
    /// Creates a shading layer.
    ///
    /// # Errors
    ///
    /// Returns a [`LayerError`] for a non-positive thickness or conductivity,
    /// invalid openness, or invalid surface properties.
    pub fn new(
        thickness: Length,
        conductivity: ThermalConductivity,
        openness: Openness,
        front: Surface,
        back: Surface,
    ) -> Result<Self, LayerError> {
        let thickness = StrictlyPositive::new(thickness)
            .map_err(LayerError::Thickness)?
            .into_inner();
        let conductivity = StrictlyPositive::new(conductivity)
            .map_err(LayerError::Conductivity)?
            .into_inner();
        openness.validate()?;
        front.validate()?;
        back.validate()?;

        Ok(Self {
            thickness,
            conductivity,
            openness,
            front,
            back,
            solar_absorptance: 0.0,
            exchange: None,
        })
    }

    /// Sets the fraction of incident outdoor solar radiation absorbed by this layer.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::Absorptance`] if the value is outside `[0, 1]`.
    pub fn with_solar_absorptance(mut self, absorptance: f64) -> Result<Self, LayerError> {
        self.solar_absorptance = validate_absorptance(absorptance)?;
        Ok(self)
    }

    /// Replaces the material surfaces in radiative exchange.
    ///
    /// # Errors
    ///
    /// Returns a [`LayerError`] if either effective surface is invalid.
    pub fn with_exchange_factors(mut self, exchange: ExchangeFactors) -> Result<Self, LayerError> {
        exchange.front.validate()?;
        exchange.back.validate()?;
        self.exchange = Some(exchange);
        Ok(self)
    }

    #[must_use]
    pub fn thickness(&self) -> Length {
        self.thickness
    }

    #[must_use]
    pub fn conductivity(&self) -> ThermalConductivity {
        self.conductivity
    }

    #[must_use]
    pub fn openness(&self) -> &Openness {
        &self.openness
    }

    #[must_use]
    pub fn solar_absorptance(&self) -> f64 {
        self.solar_absorptance
    }

    /// Front surface as seen by the radiation network.
    #[must_use]
    pub fn front(&self) -> &Surface {
        self.exchange.as_ref().map_or(&self.front, |e| &e.front)
    }

    /// Back surface as seen by the radiation network.
    #[must_use]
    pub fn back(&self) -> &Surface {
        self.exchange.as_ref().map_or(&self.back, |e| &e.back)
    }

    /// Conductance through the shade, blending the material with air in the
    /// open front area.
    ///
    /// Air conductivity is evaluated at `mean_temperature` and atmospheric pressure.
    ///
    /// # Errors
    ///
    /// Returns a [`GasError`] if air properties cannot be evaluated.
    pub fn conductance(
        &self,
        mean_temperature: ThermodynamicTemperature,
    ) -> Result<HeatTransfer, GasError> {
        let mut air = GasMixture::pure::<Air>();
        air.set_temperature_and_pressure(
            mean_temperature,
            Pressure::new::<pascal>(ATMOSPHERIC_PRESSURE),
        );
        let k_air = air.properties()?.thermal_conductivity.get::<watt_per_meter_kelvin>();

        let k = self.conductivity.get::<watt_per_meter_kelvin>();
        let t = self.thickness.get::<meter>();
        let open = self.openness.front;

        Ok(HeatTransfer::new::<watt_per_square_meter_kelvin>(
            ((1.0 - open) * k + open * k_air) / t,
        ))
    }
}

fn validate_absorptance(value: f64) -> Result<f64, LayerError> {
    UnitInterval::new(value)
        .map(|a| a.into_inner())
        .map_err(|source| LayerError::Absorptance { value, source })
}

/// Absorbed solar flux for a layer with the given absorptance.
pub(crate) fn absorbed_solar(absorptance: f64, irradiance: HeatFluxDensity) -> f64 {
    absorptance * irradiance.get::<watt_per_square_meter>()
}
