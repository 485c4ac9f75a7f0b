//! Light Transport Matrix
//!
//! Recovers the mixing matrix `A` of a linear light transport model
//! `Y = A X` from paired measurements: column `k` of `X` holds the fixture
//! settings of trial `k` and column `k` of `Y` the sensor responses.

#[macro_use]
extern crate log;

mod irls;
mod method;
mod omp;
mod pinv;

// Re-export.
pub use irls::*;
pub use method::*;
pub use omp::*;
pub use pinv::*;
