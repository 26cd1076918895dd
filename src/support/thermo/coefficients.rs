/// Quadratic temperature fit `a + b·T + c·T²`, with `T` in kelvin.
///
/// Property fits for fill gases are expressed in SI base units: W/(m·K) for
/// conductivity, Pa·s for viscosity and J/(kg·K) for specific heat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Coefficients {
    /// Creates a quadratic fit.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Creates a fit that is linear in temperature.
    #[must_use]
    pub const fn linear(a: f64, b: f64) -> Self {
        Self { a, b, c: 0.0 }
    }

    /// Creates a temperature-independent fit.
    #[must_use]
    pub const fn constant(a: f64) -> Self {
        Self { a, b: 0.0, c: 0.0 }
    }

    /// Evaluates the fit at `temperature` kelvin.
    #[must_use]
    pub fn eval(&self, temperature: f64) -> f64 {
        self.a + self.b * temperature + self.c * temperature * temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn quadratic() {
        let fit = Coefficients::new(1.0, 2.0, 3.0);
        assert_relative_eq!(fit.eval(2.0), 17.0);
    }

    #[test]
    fn constant_ignores_temperature() {
        let fit = Coefficients::constant(521.9285);
        assert_relative_eq!(fit.eval(250.0), fit.eval(350.0));
    }
}
