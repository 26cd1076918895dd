use std::{f64::consts::SQRT_2, sync::OnceLock};

use uom::si::{
    f64::{
        DynamicViscosity, MolarMass, Pressure, SpecificHeatCapacity, ThermalConductivity,
        ThermodynamicTemperature,
    },
    diffusion_coefficient::square_meter_per_second,
    dynamic_viscosity::pascal_second,
    mass_density::kilogram_per_cubic_meter,
    molar_mass::gram_per_mole,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::ThermalDiffusivity;

use super::{
    FillGas, GasData, GasError, GasProperties, GasState, UNIVERSAL_GAS_CONSTANT, density,
    specific_gas_constant,
};

/// One gas in a mixture, with its molar fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasComponent {
    pub data: GasData,
    pub fraction: f64,
}

impl GasComponent {
    /// Creates a component from explicit gas data.
    #[must_use]
    pub fn new(data: GasData, fraction: f64) -> Self {
        Self { data, fraction }
    }

    /// Creates a component from a built-in fill gas.
    #[must_use]
    pub fn of<G: FillGas>(fraction: f64) -> Self {
        Self::new(G::gas_data(), fraction)
    }
}

/// A gas mixture evaluated at a settable temperature and pressure.
///
/// Properties are computed on first request and cached until the state
/// changes through [`GasMixture::set_temperature_and_pressure`].
/// Each instance owns its cache; clones start from a copy of it.
///
/// Invalid mixture definitions are accepted at construction and reported
/// as a [`GasError`] when properties are requested.
#[derive(Debug, Clone)]
pub struct GasMixture {
    components: Vec<GasComponent>,
    state: GasState,
    simple: OnceLock<Result<GasProperties, GasError>>,
    full: OnceLock<Result<GasProperties, GasError>>,
}

impl GasMixture {
    /// Creates a mixture at the default [`GasState`].
    #[must_use]
    pub fn new(components: Vec<GasComponent>) -> Self {
        Self {
            components,
            state: GasState::default(),
            simple: OnceLock::new(),
            full: OnceLock::new(),
        }
    }

    /// Creates a single-component mixture of a built-in fill gas.
    #[must_use]
    pub fn pure<G: FillGas>() -> Self {
        Self::new(vec![GasComponent::of::<G>(1.0)])
    }

    #[must_use]
    pub fn components(&self) -> &[GasComponent] {
        &self.components
    }

    #[must_use]
    pub fn state(&self) -> GasState {
        self.state
    }

    /// Sum of the molar fractions of all components.
    #[must_use]
    pub fn total_fraction(&self) -> f64 {
        self.components.iter().map(|c| c.fraction).sum()
    }

    /// Moves the mixture to a new state, invalidating cached properties.
    pub fn set_temperature_and_pressure(
        &mut self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) {
        let state = GasState::new(temperature, pressure);
        if state != self.state {
            self.state = state;
            self.simple = OnceLock::new();
            self.full = OnceLock::new();
        }
    }

    /// Properties from mole-fraction-weighted linear mixing.
    ///
    /// # Errors
    ///
    /// Returns [`GasError::ZeroGasFraction`] or [`GasError::ZeroMolecularWeight`]
    /// for an invalid mixture definition.
    pub fn simple_properties(&self) -> Result<GasProperties, GasError> {
        self.simple.get_or_init(|| self.compute_simple()).clone()
    }

    /// Properties from full kinetic-theory mixing rules.
    ///
    /// # Errors
    ///
    /// Returns a [`GasError`] for an invalid mixture definition or for gas
    /// data with zero viscosity at the current temperature.
    pub fn properties(&self) -> Result<GasProperties, GasError> {
        self.full.get_or_init(|| self.compute_full()).clone()
    }

    fn check_definition(&self) -> Result<(), GasError> {
        if self.total_fraction() == 0.0 {
            return Err(GasError::ZeroGasFraction);
        }
        if let Some((component, c)) = self
            .components
            .iter()
            .enumerate()
            .find(|(_, c)| c.data.molecular_weight_kg_per_kmol() == 0.0)
        {
            return Err(GasError::ZeroMolecularWeight {
                component,
                name: c.data.name,
            });
        }
        Ok(())
    }

    fn compute_simple(&self) -> Result<GasProperties, GasError> {
        self.check_definition()?;
        let t = self.state.temperature.get::<kelvin>();

        let mut mix = Mix::default();
        for c in &self.components {
            let x = c.fraction;
            mix.molecular_weight += x * c.data.molecular_weight_kg_per_kmol();
            mix.conductivity += x * c.data.conductivity.eval(t);
            mix.viscosity += x * c.data.viscosity.eval(t);
            mix.specific_heat += x * c.data.specific_heat.eval(t);
            mix.specific_heat_ratio += x * c.data.specific_heat_ratio;
        }

        Ok(self.finish(&mix))
    }

    fn compute_full(&self) -> Result<GasProperties, GasError> {
        self.check_definition()?;
        let t = self.state.temperature.get::<kelvin>();

        let species = self
            .components
            .iter()
            .enumerate()
            .map(|(index, c)| {
                let molecular_weight = c.data.molecular_weight_kg_per_kmol();
                let viscosity = c.data.viscosity.eval(t);
                if viscosity == 0.0 {
                    return Err(GasError::ZeroViscosity {
                        component: index,
                        name: c.data.name,
                        temperature: self.state.temperature,
                    });
                }
                let conductivity = c.data.conductivity.eval(t);
                let lambda_prim =
                    15.0 / 4.0 * UNIVERSAL_GAS_CONSTANT / molecular_weight * viscosity;
                Ok(Species {
                    fraction: c.fraction,
                    molecular_weight,
                    viscosity,
                    specific_heat: c.data.specific_heat.eval(t),
                    specific_heat_ratio: c.data.specific_heat_ratio,
                    lambda_prim,
                    lambda_second: conductivity - lambda_prim,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let present: Vec<&Species> = species.iter().filter(|s| s.fraction > 0.0).collect();

        let mut mix = Mix::default();
        for s in &species {
            mix.molecular_weight += s.fraction * s.molecular_weight;
            mix.specific_heat_ratio += s.fraction * s.specific_heat_ratio;
        }

        let mut weighted_cp = 0.0;
        for (i, si) in present.iter().enumerate() {
            let mut viscosity_denom = 1.0;
            let mut prim_denom = 1.0;
            let mut second_denom = 1.0;

            for (j, sj) in present.iter().enumerate() {
                if i == j {
                    continue;
                }
                let ratio = sj.fraction / si.fraction;

                let phi_mu = interaction(
                    si.viscosity / sj.viscosity,
                    (sj.molecular_weight / si.molecular_weight).powf(0.25),
                    si.molecular_weight / sj.molecular_weight,
                );
                viscosity_denom += phi_mu * ratio;

                let phi_lambda = interaction(
                    si.lambda_prim / sj.lambda_prim,
                    (si.molecular_weight / sj.molecular_weight).powf(0.25),
                    si.molecular_weight / sj.molecular_weight,
                );
                let (mi, mj) = (si.molecular_weight, sj.molecular_weight);
                let psi = phi_lambda
                    * (1.0 + 2.41 * (mi - mj) * (mi - 0.142 * mj) / (mi + mj).powi(2));

                prim_denom += psi * ratio;
                second_denom += phi_lambda * ratio;
            }

            mix.viscosity += si.viscosity / viscosity_denom;
            mix.conductivity += si.lambda_prim / prim_denom + si.lambda_second / second_denom;
            weighted_cp += si.fraction * si.molecular_weight * si.specific_heat;
        }
        mix.specific_heat = weighted_cp / mix.molecular_weight;

        Ok(self.finish(&mix))
    }

    fn finish(&self, mix: &Mix) -> GasProperties {
        let molecular_weight = MolarMass::new::<gram_per_mole>(mix.molecular_weight);
        let rho = density(
            self.state.temperature,
            self.state.pressure,
            specific_gas_constant(molecular_weight),
        );
        let rho_raw = rho.get::<kilogram_per_cubic_meter>();

        GasProperties {
            molecular_weight,
            thermal_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(
                mix.conductivity,
            ),
            viscosity: DynamicViscosity::new::<pascal_second>(mix.viscosity),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
                mix.specific_heat,
            ),
            density: rho,
            specific_heat_ratio: mix.specific_heat_ratio,
            prandtl: mix.specific_heat * mix.viscosity / mix.conductivity,
            thermal_diffusivity: ThermalDiffusivity::new::<square_meter_per_second>(
                mix.conductivity / (rho_raw * mix.specific_heat),
            ),
        }
    }
}

/// Accumulated mixture values in SI base units (molecular weight in kg/kmol).
#[derive(Debug, Default)]
struct Mix {
    molecular_weight: f64,
    conductivity: f64,
    viscosity: f64,
    specific_heat: f64,
    specific_heat_ratio: f64,
}

/// Per-component values at the current temperature.
#[derive(Debug)]
struct Species {
    fraction: f64,
    molecular_weight: f64,
    viscosity: f64,
    specific_heat: f64,
    specific_heat_ratio: f64,
    lambda_prim: f64,
    lambda_second: f64,
}

/// Pairwise interaction factor shared by the viscosity and conductivity rules.
fn interaction(property_ratio: f64, weight_factor: f64, weight_ratio: f64) -> f64 {
    (1.0 + property_ratio.sqrt() * weight_factor).powi(2)
        / (2.0 * SQRT_2 * (1.0 + weight_ratio).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use uom::si::pressure::pascal;

    use crate::support::thermo::{
        Coefficients,
        fluid::{Air, Argon, Krypton},
    };

    fn air_argon() -> GasMixture {
        let mut gas = GasMixture::new(vec![
            GasComponent::of::<Air>(0.1),
            GasComponent::of::<Argon>(0.9),
        ]);
        gas.set_temperature_and_pressure(
            ThermodynamicTemperature::new::<kelvin>(300.0),
            Pressure::new::<pascal>(101_325.0),
        );
        gas
    }

    #[test]
    fn air_argon_simple_molecular_weight() {
        let props = air_argon().simple_properties().unwrap();
        assert_abs_diff_eq!(
            props.molecular_weight.get::<gram_per_mole>(),
            38.8502,
            epsilon = 1e-4
        );
    }

    #[test]
    fn air_argon_full_mixing() {
        let props = air_argon().properties().unwrap();
        assert_abs_diff_eq!(
            props.thermal_conductivity.get::<watt_per_meter_kelvin>(),
            1.850941662e-2,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            props.viscosity.get::<pascal_second>(),
            2.235785737e-5,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            props.density.get::<kilogram_per_cubic_meter>(),
            1.578172439,
            epsilon = 1e-4
        );
    }

    #[test]
    fn fraction_total_matches_components() {
        let gas = air_argon();
        let sum: f64 = gas.components().iter().map(|c| c.fraction).sum();
        assert_relative_eq!(gas.total_fraction(), sum);
        assert!(gas.properties().is_ok());
    }

    #[test]
    fn repeated_evaluation_is_bit_identical() {
        let mut gas = air_argon();
        let first = gas.properties().unwrap();
        let second = gas.properties().unwrap();
        assert_eq!(first, second);

        // Moving away and back recomputes from scratch.
        gas.set_temperature_and_pressure(
            ThermodynamicTemperature::new::<kelvin>(280.0),
            Pressure::new::<pascal>(101_325.0),
        );
        gas.set_temperature_and_pressure(
            ThermodynamicTemperature::new::<kelvin>(300.0),
            Pressure::new::<pascal>(101_325.0),
        );
        assert_eq!(gas.properties().unwrap(), first);
    }

    #[test]
    fn pressure_only_changes_density() {
        let mut gas = air_argon();
        let atm = gas.properties().unwrap();

        gas.set_temperature_and_pressure(
            ThermodynamicTemperature::new::<kelvin>(300.0),
            Pressure::new::<pascal>(90_000.0),
        );
        let low = gas.properties().unwrap();

        assert_relative_eq!(
            low.density.get::<kilogram_per_cubic_meter>(),
            atm.density.get::<kilogram_per_cubic_meter>() * 90_000.0 / 101_325.0,
            max_relative = 1e-12
        );
        assert_eq!(low.viscosity, atm.viscosity);
        assert_eq!(low.thermal_conductivity, atm.thermal_conductivity);
        assert_eq!(low.specific_heat, atm.specific_heat);
    }

    #[test]
    fn thermal_diffusivity_in_square_meters_per_second() {
        let props = air_argon().properties().unwrap();

        let expected = props.thermal_conductivity.get::<watt_per_meter_kelvin>()
            / (props.density.get::<kilogram_per_cubic_meter>()
                * props.specific_heat.get::<joule_per_kilogram_kelvin>());
        let diffusivity = props.thermal_diffusivity.get::<square_meter_per_second>();

        assert_relative_eq!(diffusivity, expected, max_relative = 1e-12);
        assert!((1e-5..1e-4).contains(&diffusivity), "alpha = {diffusivity}");
    }

    #[test]
    fn pure_gas_full_mixing_matches_fits() {
        let mut gas = GasMixture::pure::<Krypton>();
        gas.set_temperature_and_pressure(
            ThermodynamicTemperature::new::<kelvin>(290.0),
            Pressure::new::<pascal>(101_325.0),
        );
        let data = Krypton::gas_data();
        let props = gas.properties().unwrap();

        assert_relative_eq!(
            props.thermal_conductivity.get::<watt_per_meter_kelvin>(),
            data.conductivity.eval(290.0),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            props.viscosity.get::<pascal_second>(),
            data.viscosity.eval(290.0),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            props.prandtl,
            data.specific_heat.eval(290.0) * data.viscosity.eval(290.0)
                / data.conductivity.eval(290.0),
            max_relative = 1e-12
        );
    }

    #[test]
    fn zero_fractions_are_rejected() {
        let gas = GasMixture::new(vec![
            GasComponent::of::<Air>(0.0),
            GasComponent::of::<Argon>(0.0),
        ]);
        assert_eq!(gas.simple_properties(), Err(GasError::ZeroGasFraction));
        assert_eq!(gas.properties(), Err(GasError::ZeroGasFraction));
    }

    #[test]
    fn zero_molecular_weight_is_rejected() {
        let mut data = Air::gas_data();
        data.molecular_weight = MolarMass::new::<gram_per_mole>(0.0);
        let gas = GasMixture::new(vec![GasComponent::new(data, 1.0)]);
        assert!(matches!(
            gas.properties(),
            Err(GasError::ZeroMolecularWeight { component: 0, .. })
        ));
    }

    #[test]
    fn zero_viscosity_is_rejected() {
        let mut data = Argon::gas_data();
        data.viscosity = Coefficients::constant(0.0);
        let gas = GasMixture::new(vec![
            GasComponent::of::<Air>(0.5),
            GasComponent::new(data, 0.5),
        ]);
        assert!(matches!(
            gas.properties(),
            Err(GasError::ZeroViscosity { component: 1, .. })
        ));
        // Linear mixing never divides by viscosity.
        assert!(gas.simple_properties().is_ok());
    }
}
