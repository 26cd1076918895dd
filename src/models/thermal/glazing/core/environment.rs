//! Indoor and outdoor boundary conditions.

use uom::si::{
    angle::radian,
    f64::{
        Angle, HeatFluxDensity, HeatTransfer, Length, Pressure, ThermodynamicTemperature,
        Velocity,
    },
    heat_flux_density::watt_per_square_meter,
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::support::thermo::{GasError, GasMixture, fluid::Air};

use super::{
    convection::{indoor_nusselt, rayleigh},
    layer::ATMOSPHERIC_PRESSURE,
    radiation::{emissive_power, radiant_kelvin, radiative_coefficient_kelvin},
};

/// Which side of the glazing an environment sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Outdoor,
    Indoor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindDirection {
    #[default]
    Windward,
    Leeward,
}

/// How the sky's longwave radiation is described.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkyModel {
    /// Sky temperature and emissivity both given.
    AllSpecified { emissivity: f64 },
    /// Sky temperature given; the sky radiates as a black body.
    TSkySpecified,
    /// Sky temperature estimated from air temperature, `0.0552·T_air^1.5`.
    Swinbank,
}

/// How the surface convective coefficient is obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConvectionModel {
    /// Wind correlation outdoors, natural convection indoors.
    Calculated,
    /// Fixed convective coefficient.
    Prescribed(HeatTransfer),
    /// Fixed combined coefficient; the radiative part is subtracted.
    CombinedPrescribed(HeatTransfer),
}

/// Conditions on one side of the glazing.
///
/// Indoors, `sky_temperature` is the mean radiant temperature of the room.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub boundary: Boundary,
    pub air_temperature: ThermodynamicTemperature,
    pub air_speed: Velocity,
    pub wind_direction: WindDirection,
    /// Incident solar irradiance; only the outdoor value drives absorption.
    pub solar_radiation: HeatFluxDensity,
    pub sky_temperature: ThermodynamicTemperature,
    pub sky_model: SkyModel,
    pub fraction_clear_sky: f64,
    pub convection: ConvectionModel,
}

impl Environment {
    /// Outdoor conditions with a black-body sky at the air temperature.
    #[must_use]
    pub fn outdoor(
        air_temperature: ThermodynamicTemperature,
        air_speed: Velocity,
        solar_radiation: HeatFluxDensity,
    ) -> Self {
        Self {
            boundary: Boundary::Outdoor,
            air_temperature,
            air_speed,
            wind_direction: WindDirection::Windward,
            solar_radiation,
            sky_temperature: air_temperature,
            sky_model: SkyModel::TSkySpecified,
            fraction_clear_sky: 1.0,
            convection: ConvectionModel::Calculated,
        }
    }

    /// Still room air with radiant temperature equal to the air temperature.
    #[must_use]
    pub fn indoor(air_temperature: ThermodynamicTemperature) -> Self {
        Self {
            boundary: Boundary::Indoor,
            air_temperature,
            air_speed: Velocity::new::<meter_per_second>(0.0),
            wind_direction: WindDirection::Windward,
            solar_radiation: HeatFluxDensity::new::<watt_per_square_meter>(0.0),
            sky_temperature: air_temperature,
            sky_model: SkyModel::TSkySpecified,
            fraction_clear_sky: 1.0,
            convection: ConvectionModel::Calculated,
        }
    }

    #[must_use]
    pub fn with_sky(
        mut self,
        sky_temperature: ThermodynamicTemperature,
        sky_model: SkyModel,
    ) -> Self {
        self.sky_temperature = sky_temperature;
        self.sky_model = sky_model;
        self
    }

    /// Sets the room mean radiant temperature.
    #[must_use]
    pub fn with_room_radiant_temperature(mut self, temperature: ThermodynamicTemperature) -> Self {
        self.sky_temperature = temperature;
        self
    }

    #[must_use]
    pub fn with_wind_direction(mut self, wind_direction: WindDirection) -> Self {
        self.wind_direction = wind_direction;
        self
    }

    /// Sets the clear fraction of the sky, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_fraction_clear_sky(mut self, fraction: f64) -> Self {
        self.fraction_clear_sky = fraction.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_convection(mut self, convection: ConvectionModel) -> Self {
        self.convection = convection;
        self
    }

    #[must_use]
    pub fn with_solar_radiation(mut self, solar_radiation: HeatFluxDensity) -> Self {
        self.solar_radiation = solar_radiation;
        self
    }

    /// Effective sky temperature after applying the sky model.
    #[must_use]
    pub fn effective_sky_temperature(&self) -> ThermodynamicTemperature {
        match self.sky_model {
            SkyModel::Swinbank => {
                let t_air = self.air_temperature.get::<kelvin>();
                ThermodynamicTemperature::new::<kelvin>(0.0552 * t_air.powf(1.5))
            }
            SkyModel::AllSpecified { .. } | SkyModel::TSkySpecified => self.sky_temperature,
        }
    }

    fn sky_emissivity(&self) -> f64 {
        match self.sky_model {
            SkyModel::AllSpecified { emissivity } => emissivity,
            SkyModel::TSkySpecified | SkyModel::Swinbank => 1.0,
        }
    }

    /// Longwave radiosity the environment directs at a glazing tilted by `tilt`.
    #[must_use]
    pub fn radiosity(&self, tilt: Angle) -> HeatFluxDensity {
        HeatFluxDensity::new::<watt_per_square_meter>(self.radiosity_at(tilt.get::<radian>()))
    }

    pub(crate) fn radiosity_at(&self, tilt: f64) -> f64 {
        match self.boundary {
            Boundary::Indoor => emissive_power(self.sky_temperature.get::<kelvin>()),
            Boundary::Outdoor => {
                let t_air = self.air_temperature.get::<kelvin>();
                let t_sky = self.effective_sky_temperature().get::<kelvin>();

                let f_sky = (1.0 + tilt.cos()) / 2.0;
                let f_ground = 1.0 - f_sky;
                let r_sky = self.sky_emissivity() * t_sky.powi(4) / t_air.powi(4);
                let f_clear = self.fraction_clear_sky;

                emissive_power(t_air)
                    * (f_ground + (1.0 - f_clear) * f_sky + f_sky * f_clear * r_sky)
            }
        }
    }

    /// Convective coefficient between the environment air and the facing surface.
    ///
    /// `surface_emissivity` only matters for [`ConvectionModel::CombinedPrescribed`],
    /// where the radiative part is taken against this environment's radiant
    /// temperature. `height` only matters for indoor natural convection.
    ///
    /// # Errors
    ///
    /// Returns a [`GasError`] if air properties cannot be evaluated.
    pub fn convection_coefficient(
        &self,
        surface_temperature: ThermodynamicTemperature,
        surface_emissivity: f64,
        tilt: Angle,
        height: Length,
    ) -> Result<HeatTransfer, GasError> {
        let tilt = tilt.get::<radian>();
        let radiant = radiant_kelvin(self.radiosity_at(tilt));
        self.convection_at(
            surface_temperature.get::<kelvin>(),
            surface_emissivity,
            radiant,
            tilt,
            height.get::<meter>(),
        )
        .map(HeatTransfer::new::<watt_per_square_meter_kelvin>)
    }

    pub(crate) fn convection_at(
        &self,
        surface_temperature: f64,
        surface_emissivity: f64,
        radiant_temperature: f64,
        tilt: f64,
        height: f64,
    ) -> Result<f64, GasError> {
        match self.convection {
            ConvectionModel::Prescribed(hc) => Ok(hc.get::<watt_per_square_meter_kelvin>()),
            ConvectionModel::CombinedPrescribed(h) => {
                let hr = radiative_coefficient_kelvin(
                    surface_emissivity,
                    surface_temperature,
                    radiant_temperature,
                );
                Ok((h.get::<watt_per_square_meter_kelvin>() - hr).max(0.0))
            }
            ConvectionModel::Calculated => match self.boundary {
                Boundary::Outdoor => Ok(self.wind_coefficient()),
                Boundary::Indoor => self.natural_coefficient(surface_temperature, tilt, height),
            },
        }
    }

    fn wind_coefficient(&self) -> f64 {
        let v = self.air_speed.get::<meter_per_second>().max(0.0);
        match self.wind_direction {
            WindDirection::Windward => 4.0 + 4.0 * v,
            WindDirection::Leeward => 4.0 + 4.0 * (0.3 + 0.05 * v),
        }
    }

    fn natural_coefficient(
        &self,
        surface_temperature: f64,
        tilt: f64,
        height: f64,
    ) -> Result<f64, GasError> {
        let t_air = self.air_temperature.get::<kelvin>();
        let t_film = t_air + 0.25 * (surface_temperature - t_air);

        let mut air = GasMixture::pure::<Air>();
        air.set_temperature_and_pressure(
            ThermodynamicTemperature::new::<kelvin>(t_film),
            Pressure::new::<pascal>(ATMOSPHERIC_PRESSURE),
        );
        let props = air.properties()?.raw();

        let mut tilt_degrees = tilt.to_degrees();
        if surface_temperature > t_air {
            tilt_degrees = 180.0 - tilt_degrees;
        }

        let ra = rayleigh(&props, height, t_film, surface_temperature - t_air);
        Ok(indoor_nusselt(ra, tilt_degrees) * props.conductivity / height)
    }
}

/// The two environments of a solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Environments {
    pub outdoor: Environment,
    pub indoor: Environment,
}

impl Environments {
    #[must_use]
    pub fn new(outdoor: Environment, indoor: Environment) -> Self {
        Self { outdoor, indoor }
    }

    #[must_use]
    pub fn get(&self, boundary: Boundary) -> &Environment {
        match boundary {
            Boundary::Outdoor => &self.outdoor,
            Boundary::Indoor => &self.indoor,
        }
    }

    /// Copy with no incident solar radiation.
    #[must_use]
    pub(crate) fn without_solar(&self) -> Self {
        let zero = HeatFluxDensity::new::<watt_per_square_meter>(0.0);
        Self {
            outdoor: self.outdoor.clone().with_solar_radiation(zero),
            indoor: self.indoor.clone().with_solar_radiation(zero),
        }
    }
}
