//! Core types shared by the COSBOS crates: scalar type, geometry, voxel grid,
//! flattening conventions, errors, parallel execution and file formats.

#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod array_file;
pub mod cosbos;
pub mod error;
pub mod fileutil;
pub mod float_file;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod parallel;
