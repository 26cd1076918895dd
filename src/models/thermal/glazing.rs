//! Glazing heat-balance models.
//!
//! [`GlazingSystem`] rates an insulating glazing unit per ISO 15099. It pairs a
//! fixed layer stack with solver settings and maps a pair of environments to
//! the unit's U-value and SHGC results.
//!
//! # Example
//!
//! ```
//! use twine_core::Model;
//! use twine_glazing::models::thermal::glazing::{
//!     Environment, Environments, GapLayer, GlazingSystem, Igu, SolidLayer, Surface,
//! };
//! use twine_glazing::support::thermo::{GasMixture, fluid::Air};
//! use uom::si::{
//!     f64::{HeatFluxDensity, Length, ThermalConductivity, ThermodynamicTemperature, Velocity},
//!     heat_flux_density::watt_per_square_meter,
//!     heat_transfer::watt_per_square_meter_kelvin,
//!     length::{meter, millimeter},
//!     thermal_conductivity::watt_per_meter_kelvin,
//!     thermodynamic_temperature::kelvin,
//!     velocity::meter_per_second,
//! };
//!
//! let glass = SolidLayer::new(
//!     Length::new::<millimeter>(3.048),
//!     ThermalConductivity::new::<watt_per_meter_kelvin>(1.0),
//!     Surface::new(0.84, 0.0),
//!     Surface::new(0.84, 0.0),
//! )
//! .unwrap();
//! let gap = GapLayer::new(Length::new::<millimeter>(12.0), GasMixture::pure::<Air>()).unwrap();
//!
//! let igu = Igu::vertical(
//!     vec![glass.clone().into(), gap.into(), glass.into()],
//!     Length::new::<meter>(1.0),
//!     Length::new::<meter>(1.0),
//! )
//! .unwrap();
//!
//! let environments = Environments::new(
//!     Environment::outdoor(
//!         ThermodynamicTemperature::new::<kelvin>(255.15),
//!         Velocity::new::<meter_per_second>(5.5),
//!         HeatFluxDensity::new::<watt_per_square_meter>(0.0),
//!     ),
//!     Environment::indoor(ThermodynamicTemperature::new::<kelvin>(294.15)),
//! );
//!
//! let results = GlazingSystem::new(igu).call(&environments).unwrap();
//! let u = results.u_value().get::<watt_per_square_meter_kelvin>();
//! assert!(u > 2.2 && u < 3.3);
//! ```

pub(crate) mod core;

pub use self::core::{
    Boundary, CellSpacing, ConvectionModel, DEFAULT_ACCOMMODATION, Environment, Environments,
    ExchangeFactors, GapLayer, Igu, IguError, Layer, LayerError, Openness, PillarArray,
    PillarGeometry, PropertyCurve, STEFAN_BOLTZMANN, ShadingLayer, SkyModel, SolidLayer,
    SolveError, SolverConfig, SolverResult, Surface, SurfaceProperty, SurfaceState,
    SystemResults, Ventilation, VentilationConfig, VentilationError, VentilationFlow,
    VentilationInlet, WindDirection, black_body_radiosity, parallel_plate_emissivity,
    pillar_cell_area, radiant_temperature, radiative_coefficient,
};

use twine_core::Model;

/// An IGU rated between indoor and outdoor environments.
#[derive(Debug, Clone)]
pub struct GlazingSystem {
    igu: Igu,
    config: SolverConfig,
}

impl GlazingSystem {
    /// Creates a system with the default solver settings.
    #[must_use]
    pub fn new(igu: Igu) -> Self {
        Self::with_config(igu, SolverConfig::default())
    }

    #[must_use]
    pub fn with_config(igu: Igu, config: SolverConfig) -> Self {
        Self { igu, config }
    }

    #[must_use]
    pub fn igu(&self) -> &Igu {
        &self.igu
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

impl Model for GlazingSystem {
    type Input = Environments;
    type Output = SystemResults;
    type Error = SolveError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self::core::solve_system(&self.igu, input, &self.config)
    }
}
