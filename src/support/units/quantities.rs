use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, P2, Z0},
};

/// Specific gas constant, J/kg·K in SI.
///
/// For a fill gas this is the universal gas constant divided by the
/// (mixture) molecular weight.
pub type SpecificGasConstant = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Thermal diffusivity, m²/s in SI.
///
/// Shares its dimension with mass diffusivity, so values are built with
/// [`diffusion_coefficient`](uom::si::diffusion_coefficient) units.
pub type ThermalDiffusivity = Quantity<ISQ<P2, Z0, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;
