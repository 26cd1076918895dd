//! Support pillars and rarefied-gas conduction in low-pressure gaps.
//!
//! A vacuum glazing gap is held open by a regular array of small pillars.
//! Heat crosses the gap through the residual gas and through the pillars.
//! Each pillar is a series of three resistances: constriction into the glass
//! on each side and conduction through the pillar body.

use std::f64::consts::PI;

use uom::si::{
    area::square_meter,
    f64::{Area, HeatTransfer, Length, ThermalConductivity},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::thermo::{RawGasProperties, UNIVERSAL_GAS_CONSTANT};

/// Default thermal accommodation coefficient for glass surfaces.
pub const DEFAULT_ACCOMMODATION: f64 = 0.5;

/// Shape of a single support pillar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PillarGeometry {
    Cylindrical {
        radius: Length,
    },
    AnnulusCylinder {
        inner_radius: Length,
        outer_radius: Length,
    },
    /// An annulus with only `fraction` of its circumference present.
    CShapedCylinder {
        inner_radius: Length,
        outer_radius: Length,
        fraction: f64,
    },
    Hexagon {
        side: Length,
    },
    Pentagon {
        side: Length,
    },
    Triangle {
        side: Length,
    },
    /// A cone frustum; `front_radius` touches the outdoor-side pane.
    TruncatedCone {
        front_radius: Length,
        back_radius: Length,
    },
    Spherical {
        radius: Length,
    },
    Rectangular {
        length: Length,
        width: Length,
    },
    /// A strip contact of the given length and width.
    LinearBearing {
        length: Length,
        width: Length,
    },
}

/// Arrangement of pillars on the pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSpacing {
    Square,
    ShiftedSquare,
    ShiftedRotatedSquare,
    Unknown,
}

/// Area of glass served by one pillar.
///
/// Square grids serve `s²`; the shifted grids serve a regular pentagon of
/// side `s`. An unknown arrangement has no defined cell and yields zero.
#[must_use]
pub fn pillar_cell_area(spacing_type: CellSpacing, spacing: Length) -> Area {
    let s = spacing.get::<meter>();
    let area = match spacing_type {
        CellSpacing::Square => s * s,
        CellSpacing::ShiftedSquare | CellSpacing::ShiftedRotatedSquare => {
            0.25 * (5.0 * (5.0 + 2.0 * 5.0_f64.sqrt())).sqrt() * s * s
        }
        CellSpacing::Unknown => 0.0,
    };
    Area::new::<square_meter>(area)
}

/// A regular array of identical pillars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarArray {
    pub geometry: PillarGeometry,
    pub conductivity: ThermalConductivity,
    pub spacing: Length,
    pub spacing_type: CellSpacing,
    /// Thermal accommodation coefficient of the gas on the glass.
    pub accommodation: f64,
}

impl PillarArray {
    /// Creates an array using the default accommodation coefficient.
    #[must_use]
    pub fn new(
        geometry: PillarGeometry,
        conductivity: ThermalConductivity,
        spacing: Length,
        spacing_type: CellSpacing,
    ) -> Self {
        Self {
            geometry,
            conductivity,
            spacing,
            spacing_type,
            accommodation: DEFAULT_ACCOMMODATION,
        }
    }

    /// Pillar conductance per unit window area.
    ///
    /// `height` is the gap thickness. The glass conductivities are those of the
    /// panes the pillar touches on its front and back ends.
    #[must_use]
    pub fn conductance(
        &self,
        height: Length,
        front_glass: ThermalConductivity,
        back_glass: ThermalConductivity,
    ) -> HeatTransfer {
        let cell = pillar_cell_area(self.spacing_type, self.spacing).get::<square_meter>();
        let resistance = self.resistance(
            height.get::<meter>(),
            front_glass.get::<watt_per_meter_kelvin>(),
            back_glass.get::<watt_per_meter_kelvin>(),
        );

        let conductance = if cell > 0.0 && resistance.is_finite() && resistance > 0.0 {
            1.0 / (cell * resistance)
        } else {
            0.0
        };
        HeatTransfer::new::<watt_per_square_meter_kelvin>(conductance)
    }

    /// Total thermal resistance of one pillar in K/W.
    fn resistance(&self, height: f64, k_front: f64, k_back: f64) -> f64 {
        let k_p = self.conductivity.get::<watt_per_meter_kelvin>();
        let round_contacts = |a: f64| 1.0 / (4.0 * k_front * a) + 1.0 / (4.0 * k_back * a);

        match self.geometry {
            PillarGeometry::Cylindrical { radius } => {
                let r = radius.get::<meter>();
                prism(height, k_p, PI * r * r, round_contacts)
            }
            PillarGeometry::AnnulusCylinder {
                inner_radius,
                outer_radius,
            } => {
                let area = annulus_area(inner_radius, outer_radius);
                prism(height, k_p, area, round_contacts)
            }
            PillarGeometry::CShapedCylinder {
                inner_radius,
                outer_radius,
                fraction,
            } => {
                let area = fraction.clamp(0.0, 1.0) * annulus_area(inner_radius, outer_radius);
                prism(height, k_p, area, round_contacts)
            }
            PillarGeometry::Hexagon { side } => {
                prism(height, k_p, polygon_area(6, side), round_contacts)
            }
            PillarGeometry::Pentagon { side } => {
                prism(height, k_p, polygon_area(5, side), round_contacts)
            }
            PillarGeometry::Triangle { side } => {
                prism(height, k_p, polygon_area(3, side), round_contacts)
            }
            PillarGeometry::Rectangular { length, width } => {
                let area = length.get::<meter>() * width.get::<meter>();
                prism(height, k_p, area, round_contacts)
            }
            PillarGeometry::TruncatedCone {
                front_radius,
                back_radius,
            } => {
                let r1 = front_radius.get::<meter>();
                let r2 = back_radius.get::<meter>();
                1.0 / (4.0 * k_front * r1)
                    + 1.0 / (4.0 * k_back * r2)
                    + height / (PI * k_p * r1 * r2)
            }
            PillarGeometry::Spherical { radius } => {
                let a = radius.get::<meter>();
                round_contacts(a) + 1.0 / (2.0 * k_p * a)
            }
            PillarGeometry::LinearBearing { length, width } => {
                let l = length.get::<meter>();
                let w = width.get::<meter>();
                let spreading = (4.0 * l / w).ln() / (PI * l);
                spreading / k_front + spreading / k_back + height / (k_p * l * w)
            }
        }
    }
}

/// Resistance of a straight-sided pillar with round contacts of equal area.
fn prism(height: f64, k_p: f64, area: f64, contacts: impl Fn(f64) -> f64) -> f64 {
    if area <= 0.0 {
        return f64::INFINITY;
    }
    let equivalent_radius = (area / PI).sqrt();
    contacts(equivalent_radius) + height / (k_p * area)
}

fn annulus_area(inner_radius: Length, outer_radius: Length) -> f64 {
    let ri = inner_radius.get::<meter>();
    let ro = outer_radius.get::<meter>();
    (PI * (ro * ro - ri * ri)).max(0.0)
}

fn polygon_area(sides: u32, side: Length) -> f64 {
    let s = side.get::<meter>();
    let n = f64::from(sides);
    n * s * s / (4.0 * (PI / n).tan())
}

/// Conduction through a rarefied gas between two parallel plates.
///
/// Uses the temperature-jump form `h = k/(d + 2g)`, where the jump distance
/// `g` grows with the molecular mean free path and hence as pressure falls.
/// `temperature` and `pressure` are the gap mean temperature in kelvin and
/// the fill pressure in pascal; `props` must be evaluated at that state.
pub(crate) fn rarefied_gas_coefficient(
    props: &RawGasProperties,
    temperature: f64,
    pressure: f64,
    thickness: f64,
    accommodation: f64,
) -> f64 {
    let gamma = props.specific_heat_ratio;
    let specific_gas_constant = UNIVERSAL_GAS_CONSTANT / props.molecular_weight;
    let mean_free_path =
        props.viscosity / pressure * (PI * specific_gas_constant * temperature / 2.0).sqrt();

    let alpha = accommodation.clamp(f64::EPSILON, 1.0);
    let jump = (2.0 - alpha) / alpha * (2.0 * gamma / (gamma + 1.0)) * mean_free_path
        / props.prandtl;

    props.conductivity / (thickness + 2.0 * jump)
}

/// Combined coefficient of a pillar-supported gap: residual gas plus pillars.
pub(crate) fn pillar_gap_coefficient(
    pillars: &PillarArray,
    props: &RawGasProperties,
    temperature: f64,
    pressure: f64,
    thickness: Length,
    front_glass: ThermalConductivity,
    back_glass: ThermalConductivity,
) -> f64 {
    let gas = rarefied_gas_coefficient(
        props,
        temperature,
        pressure,
        thickness.get::<meter>(),
        pillars.accommodation,
    );
    let solid = pillars
        .conductance(thickness, front_glass, back_glass)
        .get::<watt_per_square_meter_kelvin>();
    gas + solid
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Pressure, ThermodynamicTemperature},
        length::millimeter,
        pressure::pascal,
        thermodynamic_temperature::kelvin,
    };

    use crate::support::thermo::{GasMixture, fluid::Air};

    fn mm(value: f64) -> Length {
        Length::new::<millimeter>(value)
    }

    fn steel() -> ThermalConductivity {
        ThermalConductivity::new::<watt_per_meter_kelvin>(20.0)
    }

    fn glass() -> ThermalConductivity {
        ThermalConductivity::new::<watt_per_meter_kelvin>(1.0)
    }

    fn array(geometry: PillarGeometry) -> PillarArray {
        PillarArray::new(geometry, steel(), mm(20.0), CellSpacing::Square)
    }

    fn conductance(geometry: PillarGeometry) -> f64 {
        array(geometry)
            .conductance(mm(0.2), glass(), glass())
            .get::<watt_per_square_meter_kelvin>()
    }

    fn air_at(pressure: f64) -> RawGasProperties {
        let mut air = GasMixture::pure::<Air>();
        air.set_temperature_and_pressure(
            ThermodynamicTemperature::new::<kelvin>(290.0),
            Pressure::new::<pascal>(pressure),
        );
        air.properties().unwrap().raw()
    }

    #[test]
    fn cell_areas() {
        let s = mm(10.0);
        assert_relative_eq!(
            pillar_cell_area(CellSpacing::Square, s).get::<square_meter>(),
            1e-4,
            epsilon = 1e-15
        );
        assert_relative_eq!(
            pillar_cell_area(CellSpacing::ShiftedSquare, s).get::<square_meter>(),
            1.720_477_400_588_967e-4,
            epsilon = 1e-12
        );
        assert_eq!(
            pillar_cell_area(CellSpacing::ShiftedRotatedSquare, s),
            pillar_cell_area(CellSpacing::ShiftedSquare, s)
        );
        assert_eq!(
            pillar_cell_area(CellSpacing::Unknown, s).get::<square_meter>(),
            0.0
        );
    }

    #[test]
    fn cylinder_matches_closed_form() {
        let r = 0.25e-3;
        let contacts = 2.0 / (4.0 * 1.0 * r);
        let body = 0.2e-3 / (20.0 * PI * r * r);
        let expected = 1.0 / (4e-4 * (contacts + body));

        assert_relative_eq!(
            conductance(PillarGeometry::Cylindrical { radius: mm(0.25) }),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn larger_cylinders_conduct_more() {
        let small = conductance(PillarGeometry::Cylindrical { radius: mm(0.2) });
        let large = conductance(PillarGeometry::Cylindrical { radius: mm(0.3) });
        assert!(large > small);
    }

    #[test]
    fn annulus_conductance_falls_as_bore_grows() {
        let outer = mm(0.3);
        let values: Vec<f64> = [0.0, 0.1, 0.2, 0.29]
            .into_iter()
            .map(|inner| {
                conductance(PillarGeometry::AnnulusCylinder {
                    inner_radius: mm(inner),
                    outer_radius: outer,
                })
            })
            .collect();

        assert!(values.windows(2).all(|pair| pair[1] < pair[0]));
        assert_relative_eq!(
            values[0],
            conductance(PillarGeometry::Cylindrical { radius: outer }),
            max_relative = 1e-12
        );
        assert_eq!(
            conductance(PillarGeometry::AnnulusCylinder {
                inner_radius: outer,
                outer_radius: outer,
            }),
            0.0
        );
    }

    #[test]
    fn c_shape_is_a_partial_annulus() {
        let full = conductance(PillarGeometry::AnnulusCylinder {
            inner_radius: mm(0.1),
            outer_radius: mm(0.3),
        });
        let half = conductance(PillarGeometry::CShapedCylinder {
            inner_radius: mm(0.1),
            outer_radius: mm(0.3),
            fraction: 0.5,
        });
        assert!(half < full && half > 0.0);
    }

    #[test]
    fn polygons_use_equal_area_contacts() {
        let side = mm(0.4);
        let hexagon = conductance(PillarGeometry::Hexagon { side });
        let pentagon = conductance(PillarGeometry::Pentagon { side });
        let triangle = conductance(PillarGeometry::Triangle { side });
        assert!(hexagon > pentagon && pentagon > triangle);

        let area = 6.0 * 0.4e-3 * 0.4e-3 / (4.0 * (PI / 6.0).tan());
        let radius = (area / PI).sqrt();
        assert_relative_eq!(
            hexagon,
            conductance(PillarGeometry::Cylindrical {
                radius: Length::new::<meter>(radius)
            }),
            max_relative = 1e-12
        );
    }

    #[test]
    fn cone_and_sphere_closed_forms() {
        let cone = conductance(PillarGeometry::TruncatedCone {
            front_radius: mm(0.2),
            back_radius: mm(0.3),
        });
        let r1 = 0.2e-3;
        let r2 = 0.3e-3;
        let resistance = 1.0 / (4.0 * r1) + 1.0 / (4.0 * r2) + 0.2e-3 / (PI * 20.0 * r1 * r2);
        assert_relative_eq!(cone, 1.0 / (4e-4 * resistance), max_relative = 1e-12);

        let sphere = conductance(PillarGeometry::Spherical { radius: mm(0.1) });
        let resistance = 2.0 / (4.0 * 0.1e-3) + 1.0 / (2.0 * 20.0 * 0.1e-3);
        assert_relative_eq!(sphere, 1.0 / (4e-4 * resistance), max_relative = 1e-12);
    }

    #[test]
    fn linear_bearing_uses_strip_constriction() {
        let bearing = conductance(PillarGeometry::LinearBearing {
            length: mm(2.0),
            width: mm(0.1),
        });
        let l: f64 = 2e-3;
        let w = 0.1e-3;
        let resistance = 2.0 * (4.0 * l / w).ln() / (PI * l) + 0.2e-3 / (20.0 * l * w);
        assert_relative_eq!(bearing, 1.0 / (4e-4 * resistance), max_relative = 1e-12);
    }

    #[test]
    fn unknown_spacing_has_no_pillar_conductance() {
        let mut pillars = array(PillarGeometry::Cylindrical { radius: mm(0.25) });
        pillars.spacing_type = CellSpacing::Unknown;
        assert_eq!(
            pillars
                .conductance(mm(0.2), glass(), glass())
                .get::<watt_per_square_meter_kelvin>(),
            0.0
        );
    }

    #[test]
    fn rarefied_gas_approaches_continuum_at_high_pressure() {
        let props = air_at(101_325.0);
        let h = rarefied_gas_coefficient(&props, 290.0, 101_325.0, 0.012, 0.5);
        assert_relative_eq!(h, props.conductivity / 0.012, max_relative = 1e-3);
    }

    #[test]
    fn rarefied_gas_scales_with_pressure_when_free_molecular() {
        let low = rarefied_gas_coefficient(&air_at(0.1), 290.0, 0.1, 2e-4, 0.5);
        let lower = rarefied_gas_coefficient(&air_at(0.01), 290.0, 0.01, 2e-4, 0.5);

        assert!(low < 0.1);
        assert_relative_eq!(low / lower, 10.0, max_relative = 1e-2);
    }
}
