use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly greater than zero.
///
/// Thicknesses, conductivities, window dimensions and gap pressures all
/// carry this constraint.
///
/// # Examples
///
/// ```
/// use twine_glazing::support::constraint::{Constrained, StrictlyPositive};
///
/// let k = Constrained::<_, StrictlyPositive>::new(1.0).unwrap();
/// assert_eq!(k.into_inner(), 1.0);
///
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(-1.0).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{Length, Pressure},
        length::millimeter,
        pressure::pascal,
    };

    #[test]
    fn thicknesses() {
        assert!(StrictlyPositive::new(Length::new::<millimeter>(12.0)).is_ok());
        assert_eq!(
            StrictlyPositive::new(Length::new::<millimeter>(0.0)),
            Err(ConstraintError::Zero)
        );
        assert_eq!(
            StrictlyPositive::new(Length::new::<millimeter>(-3.0)),
            Err(ConstraintError::Negative)
        );
    }

    #[test]
    fn vacuum_pressures_are_still_positive() {
        assert!(StrictlyPositive::new(Pressure::new::<pascal>(0.1)).is_ok());
        assert!(StrictlyPositive::new(Pressure::new::<pascal>(f64::NAN)).is_err());
    }
}
