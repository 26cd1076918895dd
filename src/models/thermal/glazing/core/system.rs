//! U-value and SHGC from paired solves.

use tracing::debug;
use uom::si::{
    f64::HeatTransfer, heat_flux_density::watt_per_square_meter,
    heat_transfer::watt_per_square_meter_kelvin,
};

use super::{
    environment::Environments,
    igu::Igu,
    results::SolverResult,
    solve::{SolveError, SolverConfig, solve},
};

/// Results of rating an IGU under one pair of environments.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemResults {
    /// Solve with outdoor solar radiation removed.
    pub u_case: SolverResult,
    /// Solve with the given solar radiation, if any was present.
    pub solar_case: Option<SolverResult>,
    /// Outdoor solar irradiance of the solar case, W/m².
    irradiance: f64,
}

impl SystemResults {
    /// U-value from the case without solar radiation.
    #[must_use]
    pub fn u_value(&self) -> HeatTransfer {
        self.u_case.u_value()
    }

    /// Solar heat gain coefficient given the system's total solar transmittance.
    ///
    /// The absorbed and re-emitted inward fraction is the reduction in room
    /// heat loss the sun causes, per unit irradiance. Returns `None` when
    /// there was no solar radiation to rate against.
    #[must_use]
    pub fn shgc(&self, total_solar_transmittance: f64) -> Option<f64> {
        let solar = self.solar_case.as_ref()?;
        let inward = (self.u_case.room_heat_loss_w() - solar.room_heat_loss_w()) / self.irradiance;
        Some(total_solar_transmittance + inward)
    }
}

/// Runs the U-value solve and, when the outdoor irradiance is positive, the
/// solar solve.
///
/// # Errors
///
/// Returns the first [`SolveError`] from either solve.
pub(crate) fn solve_system(
    igu: &Igu,
    environments: &Environments,
    config: &SolverConfig,
) -> Result<SystemResults, SolveError> {
    let irradiance = environments
        .outdoor
        .solar_radiation
        .get::<watt_per_square_meter>();

    let u_case = solve(igu, &environments.without_solar(), config)?;
    let solar_case = if irradiance > 0.0 {
        Some(solve(igu, environments, config)?)
    } else {
        None
    };

    debug!(
        u_value = u_case.u_value().get::<watt_per_square_meter_kelvin>(),
        irradiance,
        solar = solar_case.is_some(),
        "glazing system rated"
    );

    Ok(SystemResults {
        u_case,
        solar_case,
        irradiance,
    })
}
