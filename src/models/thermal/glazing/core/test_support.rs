use uom::si::{
    f64::{
        HeatFluxDensity, Length, Pressure, ThermalConductivity, ThermodynamicTemperature,
        Velocity,
    },
    heat_flux_density::watt_per_square_meter,
    length::{meter, millimeter},
    pressure::pascal,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::support::thermo::{GasMixture, fluid::Air};

use super::{
    environment::{Environment, Environments},
    igu::Igu,
    layer::{GapLayer, Layer, Openness, ShadingLayer, SolidLayer, Surface},
    pillar::{CellSpacing, PillarArray, PillarGeometry},
};

/// 3.048 mm clear float glass with no solar absorption.
pub(super) fn clear_glass() -> SolidLayer {
    SolidLayer::new(
        Length::new::<millimeter>(3.048),
        ThermalConductivity::new::<watt_per_meter_kelvin>(1.0),
        Surface::new(0.84, 0.0),
        Surface::new(0.84, 0.0),
    )
    .unwrap()
}

/// Clear glass absorbing the given fraction of incident solar radiation.
pub(super) fn sunlit_glass(absorptance: f64) -> SolidLayer {
    clear_glass().with_solar_absorptance(absorptance).unwrap()
}

/// An air-filled gap at atmospheric pressure.
pub(super) fn air_gap(thickness_mm: f64) -> GapLayer {
    GapLayer::new(
        Length::new::<millimeter>(thickness_mm),
        GasMixture::pure::<Air>(),
    )
    .unwrap()
}

/// A 0.2 mm evacuated gap held open by steel pillars on a 30 mm grid.
pub(super) fn vacuum_gap() -> GapLayer {
    let pillars = PillarArray::new(
        PillarGeometry::Cylindrical {
            radius: Length::new::<millimeter>(0.25),
        },
        ThermalConductivity::new::<watt_per_meter_kelvin>(20.0),
        Length::new::<millimeter>(30.0),
        CellSpacing::Square,
    );
    air_gap(0.2)
        .with_pressure(Pressure::new::<pascal>(0.1))
        .unwrap()
        .with_pillars(pillars)
}

/// A venetian-like shade open at top and bottom.
pub(super) fn open_shade() -> ShadingLayer {
    ShadingLayer::new(
        Length::new::<millimeter>(1.0),
        ThermalConductivity::new::<watt_per_meter_kelvin>(0.15),
        Openness::new(0.05, 0.5, 0.5, 0.0, 0.0).unwrap(),
        Surface::new(0.8, 0.1),
        Surface::new(0.8, 0.1),
    )
    .unwrap()
}

/// A vertical 1 m × 1 m unit.
pub(super) fn unit_igu(layers: Vec<Layer>) -> Igu {
    Igu::vertical(layers, Length::new::<meter>(1.0), Length::new::<meter>(1.0)).unwrap()
}

/// Two clear panes around a 12 mm air gap.
pub(super) fn double_clear() -> Igu {
    unit_igu(vec![
        clear_glass().into(),
        air_gap(12.0).into(),
        clear_glass().into(),
    ])
}

/// Double clear with typical solar absorptances for each pane.
pub(super) fn sunlit_double_clear() -> Igu {
    unit_igu(vec![
        sunlit_glass(0.096).into(),
        air_gap(12.0).into(),
        sunlit_glass(0.072).into(),
    ])
}

/// NFRC 100 winter conditions.
pub(super) fn nfrc_winter() -> Environments {
    Environments::new(
        Environment::outdoor(
            ThermodynamicTemperature::new::<kelvin>(255.15),
            Velocity::new::<meter_per_second>(5.5),
            HeatFluxDensity::new::<watt_per_square_meter>(0.0),
        ),
        Environment::indoor(ThermodynamicTemperature::new::<kelvin>(294.15)),
    )
}

/// NFRC 100 summer conditions.
pub(super) fn nfrc_summer() -> Environments {
    Environments::new(
        Environment::outdoor(
            ThermodynamicTemperature::new::<kelvin>(305.15),
            Velocity::new::<meter_per_second>(2.75),
            HeatFluxDensity::new::<watt_per_square_meter>(783.0),
        ),
        Environment::indoor(ThermodynamicTemperature::new::<kelvin>(297.15)),
    )
}
