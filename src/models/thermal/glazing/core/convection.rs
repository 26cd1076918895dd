//! Natural convection correlations.
//!
//! Gap coefficients follow the enclosed-cavity Nusselt correlations of
//! ISO 15099 §5.3.3. Indoor surface coefficients follow the free-surface
//! correlations of ISO 15099 §8.3.2.2.
//!
//! Tilt angles are in radians: 0 is horizontal, π/2 is vertical.

use std::f64::consts::PI;

use tracing::warn;

use crate::support::thermo::RawGasProperties;

/// Standard gravity used by the ISO 15099 correlations.
pub(crate) const GRAVITY: f64 = 9.81;

/// Rayleigh number of a layer of gas, `ρ²L³gβcp|ΔT|/(μk)` with `β = 1/T_mean`.
pub(crate) fn rayleigh(
    props: &RawGasProperties,
    length: f64,
    mean_temperature: f64,
    delta_t: f64,
) -> f64 {
    let beta = 1.0 / mean_temperature;
    props.density.powi(2) * length.powi(3) * GRAVITY * beta * props.specific_heat * delta_t.abs()
        / (props.viscosity * props.conductivity)
}

/// Convective coefficient of a sealed gap in W/(m²·K).
///
/// `t_outdoor_side` and `t_indoor_side` are the bounding surface temperatures
/// in kelvin. The correlations assume the cavity is heated from the indoor
/// side; when the outdoor side is hotter the tilt complement is used.
/// `props` must be evaluated at the gap mean temperature and fill pressure.
pub(crate) fn gap_coefficient(
    props: &RawGasProperties,
    thickness: f64,
    height: f64,
    tilt: f64,
    t_outdoor_side: f64,
    t_indoor_side: f64,
) -> f64 {
    let tilt = tilt.clamp(0.0, PI);
    let gamma = if t_outdoor_side > t_indoor_side {
        PI - tilt
    } else {
        tilt
    };

    let delta_t = t_outdoor_side - t_indoor_side;
    let ra = if delta_t.abs() < 1e-10 {
        1e-7
    } else {
        let mean = 0.5 * (t_outdoor_side + t_indoor_side);
        rayleigh(props, thickness, mean, delta_t)
    };

    let aspect_ratio = height / thickness;
    nusselt(ra, gamma, aspect_ratio) * props.conductivity / thickness
}

/// Cavity Nusselt number for a tilt `gamma` in `[0, π]`.
pub(crate) fn nusselt(ra: f64, gamma: f64, aspect_ratio: f64) -> f64 {
    const SIXTY: f64 = PI / 3.0;
    const NINETY: f64 = PI / 2.0;
    const HALF_DEGREE: f64 = 0.5 * PI / 180.0;

    let gamma = gamma.clamp(0.0, PI);

    if gamma < SIXTY - HALF_DEGREE {
        nu_0_60(ra, gamma, aspect_ratio)
    } else if gamma < SIXTY + HALF_DEGREE {
        nu_60(ra, aspect_ratio)
    } else if gamma < NINETY - HALF_DEGREE {
        nu_60_90(ra, gamma, aspect_ratio)
    } else if gamma < NINETY + HALF_DEGREE {
        nu_90(ra, aspect_ratio)
    } else {
        nu_90_180(ra, gamma, aspect_ratio)
    }
}

/// Eqs. 43–44, tilts below 60°.
fn nu_0_60(ra: f64, gamma: f64, aspect_ratio: f64) -> f64 {
    if ra > 1e5 || aspect_ratio < 20.0 {
        warn!(
            rayleigh = ra,
            aspect_ratio, "cavity correlation used outside its range (0-60 degrees)"
        );
    }
    let positive = |x: f64| f64::midpoint(x, x.abs());
    let ra_cos = ra * gamma.cos();

    let a = positive(1.0 - 1708.0 / ra_cos);
    let b = 1.0 - 1708.0 * (1.8 * gamma).sin().powf(1.6) / ra_cos;
    let c = (ra_cos / 5830.0).cbrt() - 1.0;

    1.0 + 1.44 * a * b + positive(c)
}

/// Eqs. 45–48, tilt of 60°.
fn nu_60(ra: f64, aspect_ratio: f64) -> f64 {
    let g = 0.5 / (1.0 + (ra / 3160.0).powf(20.6)).powf(0.1);
    let nu1 = (1.0 + (0.0936 * ra.powf(0.314) / (1.0 + g)).powi(7)).powf(1.0 / 7.0);
    let nu2 = (0.104 + 0.175 / aspect_ratio) * ra.powf(0.283);
    nu1.max(nu2)
}

/// Linear interpolation between the 60° and 90° correlations.
fn nu_60_90(ra: f64, gamma: f64, aspect_ratio: f64) -> f64 {
    if ra <= 1e2 || ra >= 2e7 || aspect_ratio <= 5.0 || aspect_ratio >= 100.0 {
        warn!(
            rayleigh = ra,
            aspect_ratio, "cavity correlation used outside its range (60-90 degrees)"
        );
    }
    let nu60 = nu_60(ra, aspect_ratio);
    let nu90 = nu_90(ra, aspect_ratio);
    let x = (gamma - PI / 3.0) / (PI / 2.0 - PI / 3.0);
    nu60 + (nu90 - nu60) * x
}

/// Eqs. 49–53, vertical cavity.
fn nu_90(ra: f64, aspect_ratio: f64) -> f64 {
    let nu1 = if ra <= 1e4 {
        1.0 + 1.759_667_8e-10 * ra.powf(2.298_475_5)
    } else if ra <= 5e4 {
        0.028_154 * ra.powf(0.4134)
    } else {
        0.067_383_8 * ra.cbrt()
    };
    let nu2 = 0.242 * (ra / aspect_ratio).powf(0.272);
    nu1.max(nu2)
}

/// Eq. 54, cavity heated from above.
fn nu_90_180(ra: f64, gamma: f64, aspect_ratio: f64) -> f64 {
    1.0 + (nu_90(ra, aspect_ratio) - 1.0) * gamma.sin()
}

/// Nusselt number of a free indoor surface of height `H`.
///
/// `tilt_degrees` is the effective tilt: already complemented by the caller
/// when the surface is hotter than the room air. Above 179° the correlation
/// jumps to the horizontal heated-from-above form.
pub(crate) fn indoor_nusselt(ra: f64, tilt_degrees: f64) -> f64 {
    let gamma = tilt_degrees.clamp(0.0, 180.0);
    let sin_gamma = gamma.to_radians().sin();

    if gamma < 15.0 {
        0.13 * ra.cbrt()
    } else if gamma <= 90.0 {
        let ra_cv = 2.5e5 * ((0.72 * gamma).exp() / sin_gamma).powf(0.2);
        if ra <= ra_cv {
            0.56 * (ra * sin_gamma).powf(0.25)
        } else {
            0.13 * (ra.cbrt() - ra_cv.cbrt()) + 0.56 * (ra_cv * sin_gamma).powf(0.25)
        }
    } else if gamma <= 179.0 {
        0.56 * (ra * sin_gamma).powf(0.25)
    } else {
        0.58 * ra.powf(0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use uom::si::{
        f64::{Pressure, ThermodynamicTemperature},
        pressure::pascal,
        thermodynamic_temperature::kelvin,
    };

    use crate::support::thermo::{GasMixture, fluid::Air};

    const TILTS: [f64; 5] = [30.0, 60.0, 73.0, 90.0, 134.0];

    fn check(ra: f64, aspect_ratio: f64, expected: [f64; 5]) {
        for (tilt, expected) in TILTS.into_iter().zip(expected) {
            let nu = nusselt(ra, tilt.to_radians(), aspect_ratio);
            assert_abs_diff_eq!(nu, expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn moderate_rayleigh() {
        check(
            3638.216_670_645_28,
            83.333_333_333_333_3,
            [
                1.404_743_492_002_54,
                1.080_057_423_427_89,
                1.057_030_420_798_92,
                1.026_918_186_591_79,
                1.019_363_322_968_42,
            ],
        );
    }

    #[test]
    fn conduction_regime() {
        check(
            140.779_077_041_012,
            200.0,
            [
                1.0,
                1.000_027_774_390_94,
                1.000_022_355_118_65,
                1.000_015_268_377_95,
                1.000_010_983_151_95,
            ],
        );
    }

    #[test]
    fn high_rayleigh() {
        check(
            4_633_340.886_671_7,
            10.0,
            [
                10.268_098_154_528_8,
                11.597_550_226_109_6,
                11.439_852_967_310_1,
                11.233_633_475_034_0,
                8.361_460,
            ],
        );
    }

    #[test]
    fn vertical_branch_boundary_is_continuous_enough() {
        // Eq. 51 applies up to and including Ra = 5e4.
        let at = nu_90(5e4, 80.0);
        let above = nu_90(5e4 + 1.0, 80.0);
        assert!(at.is_finite());
        assert_relative_eq!(at, above, max_relative = 0.05);
    }

    #[test]
    fn horizontal_heated_from_above_conducts() {
        assert_relative_eq!(nusselt(1e5, PI, 50.0), 1.0, epsilon = 1e-12);
    }

    fn air_at(temperature: f64) -> RawGasProperties {
        let mut air = GasMixture::pure::<Air>();
        air.set_temperature_and_pressure(
            ThermodynamicTemperature::new::<kelvin>(temperature),
            Pressure::new::<pascal>(101_325.0),
        );
        air.properties().unwrap().raw()
    }

    #[test]
    fn gap_coefficient_complements_tilt_for_reversed_heating() {
        let props = air_at(280.0);
        let tilt = 30.0_f64.to_radians();

        // Heated from the indoor side: unstable, enhanced convection.
        let heated_inside = gap_coefficient(&props, 0.02, 1.0, tilt, 270.0, 290.0);
        // Heated from the outdoor side: looks like a 150° cavity.
        let heated_outside = gap_coefficient(&props, 0.02, 1.0, tilt, 290.0, 270.0);

        assert!(heated_inside > heated_outside);
        assert!(heated_outside >= props.conductivity / 0.02);
    }

    #[test]
    fn isothermal_gap_conducts() {
        let props = air_at(290.0);
        let h = gap_coefficient(&props, 0.012, 1.0, PI / 2.0, 290.0, 290.0);
        assert_relative_eq!(h, props.conductivity / 0.012, max_relative = 1e-9);
    }
}
