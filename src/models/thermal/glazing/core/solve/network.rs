//! Linearised heat-balance network for one iteration.
//!
//! Each pane contributes four unknowns: front temperature, front radiosity,
//! back radiosity and back temperature, in that order. The matching four rows
//! are the front energy balance, the two radiosity definitions and the back
//! energy balance. Emission is linearised about the previous iterate, so the
//! whole stack reduces to one dense linear system.

use nalgebra::{DMatrix, DVector};

use crate::models::thermal::glazing::core::{
    radiation::RadiosityBalance, ventilation::ChannelFlow,
};

use super::SolveError;

/// Surface temperatures (K) and radiosities (W/m²), outdoor surface first.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Field {
    pub(super) temperatures: Vec<f64>,
    pub(super) radiosities: Vec<f64>,
}

impl Field {
    /// Moves `self` a fraction `relaxation` of the way to `target`.
    pub(super) fn relax_towards(&self, target: &Self, relaxation: f64) -> Self {
        let blend = |old: &[f64], new: &[f64]| -> Vec<f64> {
            old.iter()
                .zip(new)
                .map(|(o, n)| o + relaxation * (n - o))
                .collect()
        };
        Self {
            temperatures: blend(&self.temperatures, &target.temperatures),
            radiosities: blend(&self.radiosities, &target.radiosities),
        }
    }

    /// Largest `|T_new − T_old|/T_old` over all surfaces.
    pub(super) fn max_relative_change(&self, next: &Self) -> f64 {
        self.temperatures
            .iter()
            .zip(&next.temperatures)
            .map(|(old, new)| ((new - old) / old).abs())
            .fold(0.0, f64::max)
    }
}

/// Coefficients of one pane at the current iterate.
#[derive(Debug, Clone, Copy)]
pub(super) struct PaneTerms {
    /// Conductance through the pane, W/(m²·K).
    pub(super) conductance: f64,
    pub(super) front: RadiosityBalance,
    pub(super) back: RadiosityBalance,
    /// Solar flux absorbed in the pane, split evenly between its faces.
    pub(super) absorbed_solar: f64,
}

impl PaneTerms {
    /// IR transmittance for radiation arriving on the front face.
    fn front_transmittance(&self) -> f64 {
        self.back.transmittance
    }

    /// IR transmittance for radiation arriving on the back face.
    fn back_transmittance(&self) -> f64 {
        self.front.transmittance
    }
}

/// Convective path across one gap.
#[derive(Debug, Clone, Copy)]
pub(super) enum GapTerms {
    /// Surfaces exchange heat directly through still gas.
    Sealed { coefficient: f64 },
    /// Both surfaces exchange heat with moving air.
    Ventilated { flow: ChannelFlow },
}

/// Exchange with one environment.
#[derive(Debug, Clone, Copy)]
pub(super) struct BoundaryTerms {
    /// Convective coefficient, W/(m²·K).
    pub(super) coefficient: f64,
    /// Air temperature, K.
    pub(super) air_temperature: f64,
    /// Longwave radiosity incident on the glazing, W/m².
    pub(super) radiosity: f64,
}

/// The assembled heat-balance network of one iteration.
#[derive(Debug, Clone)]
pub(super) struct Network {
    pub(super) panes: Vec<PaneTerms>,
    pub(super) gaps: Vec<GapTerms>,
    pub(super) outdoor: BoundaryTerms,
    pub(super) indoor: BoundaryTerms,
}

/// Radiosity falling on a face: fixed, or another face's unknown.
#[derive(Debug, Clone, Copy)]
enum Incident {
    Known(f64),
    Unknown(usize),
}

/// Convective partner of a face.
#[derive(Debug, Clone, Copy)]
enum Convection {
    Air { coefficient: f64, temperature: f64 },
    Surface { coefficient: f64, index: usize },
}

impl Convection {
    fn coefficient(self) -> f64 {
        match self {
            Self::Air { coefficient, .. } | Self::Surface { coefficient, .. } => coefficient,
        }
    }
}

const fn front_temperature(k: usize) -> usize {
    4 * k
}

const fn front_radiosity(k: usize) -> usize {
    4 * k + 1
}

const fn back_radiosity(k: usize) -> usize {
    4 * k + 2
}

const fn back_temperature(k: usize) -> usize {
    4 * k + 3
}

struct System {
    a: DMatrix<f64>,
    b: DVector<f64>,
}

impl System {
    fn add_incident(&mut self, row: usize, incident: Incident, coefficient: f64) {
        match incident {
            Incident::Unknown(col) => self.a[(row, col)] += coefficient,
            Incident::Known(radiosity) => self.b[row] -= coefficient * radiosity,
        }
    }

    fn add_convection(&mut self, row: usize, own: usize, convection: Convection) {
        self.a[(row, own)] += convection.coefficient();
        match convection {
            Convection::Air {
                coefficient,
                temperature,
            } => self.b[row] += coefficient * temperature,
            Convection::Surface { coefficient, index } => self.a[(row, index)] -= coefficient,
        }
    }
}

impl Network {
    fn front_incident(&self, k: usize) -> Incident {
        match k.checked_sub(1) {
            None => Incident::Known(self.outdoor.radiosity),
            Some(prev) => Incident::Unknown(back_radiosity(prev)),
        }
    }

    fn back_incident(&self, k: usize) -> Incident {
        if k + 1 == self.panes.len() {
            Incident::Known(self.indoor.radiosity)
        } else {
            Incident::Unknown(front_radiosity(k + 1))
        }
    }

    fn front_convection(&self, k: usize) -> Convection {
        match k.checked_sub(1) {
            None => Convection::Air {
                coefficient: self.outdoor.coefficient,
                temperature: self.outdoor.air_temperature,
            },
            Some(g) => self.gap_convection(g, back_temperature(g)),
        }
    }

    fn back_convection(&self, k: usize) -> Convection {
        if k + 1 == self.panes.len() {
            Convection::Air {
                coefficient: self.indoor.coefficient,
                temperature: self.indoor.air_temperature,
            }
        } else {
            self.gap_convection(k, front_temperature(k + 1))
        }
    }

    fn gap_convection(&self, g: usize, opposite: usize) -> Convection {
        match self.gaps[g] {
            GapTerms::Sealed { coefficient } => Convection::Surface {
                coefficient,
                index: opposite,
            },
            GapTerms::Ventilated { flow } => Convection::Air {
                coefficient: flow.coefficient,
                temperature: flow.mean_air_temperature,
            },
        }
    }

    /// Assembles and solves the linear system.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::SingularSystem`] if the matrix cannot be
    /// factorised and [`SolveError::NonPhysical`] if the solution contains
    /// non-finite values or non-positive temperatures.
    pub(super) fn solve(&self, iteration: usize) -> Result<Field, SolveError> {
        let size = 4 * self.panes.len();
        let mut system = System {
            a: DMatrix::zeros(size, size),
            b: DVector::zeros(size),
        };

        for (k, pane) in self.panes.iter().enumerate() {
            let (tf, jf, jb, tb) = (
                front_temperature(k),
                front_radiosity(k),
                back_radiosity(k),
                back_temperature(k),
            );
            let g_front = self.front_incident(k);
            let g_back = self.back_incident(k);
            let tau_f = pane.front_transmittance();
            let tau_b = pane.back_transmittance();
            let c = pane.conductance;

            // Front energy balance.
            system.a[(tf, tf)] += c;
            system.a[(tf, tb)] -= c;
            system.a[(tf, jf)] += 1.0;
            system.add_incident(tf, g_front, -(1.0 - tau_f));
            system.add_incident(tf, g_back, -tau_b);
            system.add_convection(tf, tf, self.front_convection(k));
            system.b[tf] += pane.absorbed_solar / 2.0;

            // Front radiosity.
            system.a[(jf, jf)] += 1.0;
            system.a[(jf, tf)] -= pane.front.emission;
            system.add_incident(jf, g_front, -pane.front.reflectance);
            system.add_incident(jf, g_back, -pane.front.transmittance);

            // Back radiosity.
            system.a[(jb, jb)] += 1.0;
            system.a[(jb, tb)] -= pane.back.emission;
            system.add_incident(jb, g_back, -pane.back.reflectance);
            system.add_incident(jb, g_front, -pane.back.transmittance);

            // Back energy balance.
            system.a[(tb, tb)] += c;
            system.a[(tb, tf)] -= c;
            system.a[(tb, jb)] += 1.0;
            system.add_incident(tb, g_back, -(1.0 - tau_b));
            system.add_incident(tb, g_front, -tau_f);
            system.add_convection(tb, tb, self.back_convection(k));
            system.b[tb] += pane.absorbed_solar / 2.0;
        }

        let x = system
            .a
            .lu()
            .solve(&system.b)
            .ok_or(SolveError::SingularSystem { iteration })?;

        if x.iter().any(|v| !v.is_finite()) {
            return Err(SolveError::non_physical(format!(
                "non-finite heat balance solution at iteration {iteration}"
            )));
        }

        let mut temperatures = Vec::with_capacity(2 * self.panes.len());
        let mut radiosities = Vec::with_capacity(2 * self.panes.len());
        for k in 0..self.panes.len() {
            temperatures.extend([x[front_temperature(k)], x[back_temperature(k)]]);
            radiosities.extend([x[front_radiosity(k)], x[back_radiosity(k)]]);
        }

        if let Some(t) = temperatures.iter().find(|t| **t <= 0.0) {
            return Err(SolveError::non_physical(format!(
                "surface temperature {t} K at iteration {iteration}"
            )));
        }

        Ok(Field {
            temperatures,
            radiosities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::thermal::glazing::core::{layer::SurfaceOptics, radiation::emissive_power};

    fn opaque_pane(conductance: f64, t_old: f64) -> PaneTerms {
        let optics = SurfaceOptics {
            emissivity: 1.0,
            transmittance: 0.0,
        };
        PaneTerms {
            conductance,
            front: RadiosityBalance::new(optics, 0.0, t_old),
            back: RadiosityBalance::new(optics, 0.0, t_old),
            absorbed_solar: 0.0,
        }
    }

    fn boundary(coefficient: f64, t: f64) -> BoundaryTerms {
        BoundaryTerms {
            coefficient,
            air_temperature: t,
            radiosity: emissive_power(t),
        }
    }

    #[test]
    fn isothermal_surroundings_give_isothermal_pane() {
        let network = Network {
            panes: vec![opaque_pane(300.0, 290.0)],
            gaps: vec![],
            outdoor: boundary(20.0, 290.0),
            indoor: boundary(3.0, 290.0),
        };

        let field = network.solve(1).unwrap();
        for t in &field.temperatures {
            assert_relative_eq!(*t, 290.0, epsilon = 1e-9);
        }
        for j in &field.radiosities {
            assert_relative_eq!(*j, emissive_power(290.0), max_relative = 1e-12);
        }
    }

    #[test]
    fn pane_sits_between_boundaries() {
        let network = Network {
            panes: vec![opaque_pane(300.0, 280.0)],
            gaps: vec![],
            outdoor: boundary(20.0, 260.0),
            indoor: boundary(3.0, 295.0),
        };

        let field = network.solve(1).unwrap();
        let [front, back] = field.temperatures[..] else {
            panic!("expected two surfaces");
        };
        assert!(260.0 < front && front < back && back < 295.0);
    }

    #[test]
    fn absorbed_solar_warms_the_pane() {
        let mut pane = opaque_pane(300.0, 290.0);
        pane.absorbed_solar = 100.0;
        let network = Network {
            panes: vec![pane],
            gaps: vec![],
            outdoor: boundary(20.0, 290.0),
            indoor: boundary(3.0, 290.0),
        };

        let field = network.solve(1).unwrap();
        assert!(field.temperatures.iter().all(|t| *t > 290.0));
    }

    #[test]
    fn zero_coefficients_make_temperatures_indeterminate() {
        let pane = PaneTerms {
            conductance: 0.0,
            front: RadiosityBalance::new(
                SurfaceOptics {
                    emissivity: 1.0,
                    transmittance: 0.0,
                },
                0.0,
                0.0,
            ),
            back: RadiosityBalance::new(
                SurfaceOptics {
                    emissivity: 1.0,
                    transmittance: 0.0,
                },
                0.0,
                0.0,
            ),
            absorbed_solar: 0.0,
        };
        let network = Network {
            panes: vec![pane],
            gaps: vec![],
            outdoor: boundary(0.0, 290.0),
            indoor: boundary(0.0, 290.0),
        };

        assert!(matches!(
            network.solve(3),
            Err(SolveError::SingularSystem { iteration: 3 })
        ));
    }

    #[test]
    fn relaxation_and_change() {
        let old = Field {
            temperatures: vec![300.0, 300.0],
            radiosities: vec![400.0, 400.0],
        };
        let new = Field {
            temperatures: vec![330.0, 300.0],
            radiosities: vec![500.0, 400.0],
        };

        assert_relative_eq!(old.max_relative_change(&new), 0.1);
        let relaxed = old.relax_towards(&new, 0.5);
        assert_relative_eq!(relaxed.temperatures[0], 315.0);
        assert_relative_eq!(relaxed.radiosities[0], 450.0);
    }
}
