//! Crate-level utilities shared by models.
//!
//! - [`constraint`]: Type-level numeric constraints used to validate inputs.
//! - [`thermo`]: Gas thermophysical properties for fill gases and air.
//! - [`units`]: Extensions to [`uom`].

pub mod constraint;
pub mod thermo;
pub mod units;
