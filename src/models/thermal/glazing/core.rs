//! ISO 15099 heat balance of a multi-layer glazing unit.
//!
//! An [`Igu`] is an ordered stack of solid, gap and shading layers. Between
//! an outdoor and an indoor [`Environment`], the solver finds every surface
//! temperature and longwave radiosity, then derives heat flows, effective
//! conductivities, the U-value and the SHGC.
//!
//! Leaf modules hold the physics: gap convection correlations, pillar and
//! rarefied-gas conduction, radiosity relations, environment boundary models
//! and gap ventilation. The solver linearises them about the current
//! temperatures, solves the dense network, and repeats until the
//! temperatures settle.

mod convection;
mod environment;
mod igu;
mod layer;
mod pillar;
mod radiation;
mod results;
mod solve;
mod system;
mod ventilation;

#[cfg(test)]
mod test_support;

pub use environment::{
    Boundary, ConvectionModel, Environment, Environments, SkyModel, WindDirection,
};
pub use igu::{Igu, IguError};
pub use layer::{
    ExchangeFactors, GapLayer, Layer, LayerError, Openness, PropertyCurve, ShadingLayer,
    SolidLayer, Surface, SurfaceProperty,
};
pub use pillar::{CellSpacing, DEFAULT_ACCOMMODATION, PillarArray, PillarGeometry, pillar_cell_area};
pub use radiation::{
    STEFAN_BOLTZMANN, black_body_radiosity, parallel_plate_emissivity, radiant_temperature,
    radiative_coefficient,
};
pub use results::{SolverResult, SurfaceState};
pub use solve::{SolveError, SolverConfig};
pub use system::SystemResults;
pub use ventilation::{
    Ventilation, VentilationConfig, VentilationError, VentilationFlow, VentilationInlet,
};

pub(crate) use system::solve_system;
