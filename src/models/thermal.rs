//! Thermal systems models.
//!
//! This module contains models of building envelope components, currently
//! insulating glazing units.

pub mod glazing;
