//! Photometry
//!
//! Luminous intensity of the light fixtures and the floor reflection kernel
//! of a sensor-fixture pair.

#[macro_use]
extern crate log;

mod intensity;
mod pchip;
mod reflection;

// Re-export.
pub use intensity::*;
pub use pchip::*;
pub use reflection::*;
