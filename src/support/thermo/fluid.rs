//! Built-in fill gases.
//!
//! Each marker type implements [`FillGas`](super::FillGas) with the
//! ISO 15099 Annex B property fits (temperatures in kelvin).

mod air;
mod argon;
mod krypton;
mod xenon;

pub use air::Air;
pub use argon::Argon;
pub use krypton::Krypton;
pub use xenon::Xenon;
