//! Blockage model
//!
//! Every (sensor, fixture) pair defines a light path. The attenuation caused by
//! an occupant is spread over the voxels of the room with a Gaussian falloff
//! around the line through the path's endpoints. The falloff weights are
//! precomputed once per geometry (the hash tensor) and reused to turn
//! per-path losses into a reconstructed volume.

#[macro_use]
extern crate log;

mod distance;
mod field;
mod hash;
mod observation;
mod room;
mod volume;

// Re-export.
pub use distance::*;
pub use field::*;
pub use hash::*;
pub use observation::*;
pub use room::*;
pub use volume::*;
