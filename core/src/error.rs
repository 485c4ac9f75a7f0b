//! Errors

use crate::layout::Flattening;
use thiserror::Error;

/// Errors reported by the hashing, reconstruction and solver routines.
#[derive(Error, Debug)]
pub enum Error {
    /// An argument is outside its valid domain (non-positive sigma, zero grid
    /// extent, empty sensor or fixture list, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An array length disagrees with the length implied by the geometry.
    #[error("shape mismatch for {what}: expected {expected} values, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Array extents or path counts disagree with the geometry, even though
    /// the element counts may match.
    #[error("extents mismatch for {what}: expected {expected:?}, found {found:?}")]
    ExtentsMismatch {
        what: &'static str,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// An array was flattened in a different order than the consumer expects.
    #[error("layout mismatch for {what}: expected {expected} flattening, found {found}")]
    Layout {
        what: &'static str,
        expected: Flattening,
        found: Flattening,
    },

    /// Failure reading or writing a file.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed file contents.
    #[error("parse error: {0}")]
    Parse(String),

    /// Numerical failure inside a linear solver.
    #[error("solver error: {0}")]
    Solver(String),
}

/// Result type used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns an `Error::ShapeMismatch` unless `found == expected`.
///
/// * `what`     - Name of the checked array.
/// * `expected` - Length implied by the geometry.
/// * `found`    - Actual length.
pub fn check_len(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            what,
            expected,
            found,
        })
    }
}

/// Returns an `Error::ExtentsMismatch` unless `found == expected`.
///
/// * `what`     - Name of the checked array.
/// * `expected` - Extents implied by the geometry.
/// * `found`    - Actual extents.
pub fn check_extents(what: &'static str, expected: &[usize], found: &[usize]) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::ExtentsMismatch {
            what,
            expected: expected.to_vec(),
            found: found.to_vec(),
        })
    }
}

/// Returns an `Error::Layout` unless `found == expected`.
///
/// * `what`     - Name of the checked array.
/// * `expected` - Flattening the consumer relies on.
/// * `found`    - Flattening declared by the producer.
pub fn check_layout(what: &'static str, expected: Flattening, found: Flattening) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::Layout {
            what,
            expected,
            found,
        })
    }
}
