//! Pseudo-inverse Solvers

use cosbos_core::cosbos::Float;
use cosbos_core::error::*;
use nalgebra::DMatrix;

/// Returns the SVD cut-off used for a minimum norm least squares solution:
/// machine epsilon scaled by the larger dimension and the largest singular
/// value.
///
/// * `x` - The matrix.
pub fn default_rank_tolerance(x: &DMatrix<Float>) -> Float {
    let largest = x.singular_values().max();
    Float::EPSILON * x.nrows().max(x.ncols()) as Float * largest
}

/// Returns the pseudo-inverse of `x` computed from its SVD, treating singular
/// values at or below `threshold` as zero.
///
/// * `x`         - The matrix.
/// * `threshold` - Singular value cut-off.
pub fn truncated_pseudo_inverse(x: &DMatrix<Float>, threshold: Float) -> Result<DMatrix<Float>> {
    let svd = x.clone().svd(true, true);
    debug!(
        "SVD of {}x{} matrix keeps {} of {} singular values",
        x.nrows(),
        x.ncols(),
        svd.rank(threshold),
        svd.singular_values.len()
    );
    svd.pseudo_inverse(threshold)
        .map_err(|e| Error::Solver(e.to_string()))
}

/// Solves `Y = A X` for `A` in the minimum norm least squares sense.
///
/// * `x` - Inputs, `m x n`.
/// * `y` - Outputs, `l x n`.
pub fn solve_full_rank(x: &DMatrix<Float>, y: &DMatrix<Float>) -> Result<DMatrix<Float>> {
    let pinv = truncated_pseudo_inverse(x, default_rank_tolerance(x))?;
    Ok(y * pinv)
}

/// Solves `Y = A X` for `A` through a truncated SVD of `X`, dropping the
/// directions whose singular values are at or below `threshold`.
///
/// * `x`         - Inputs, `m x n`.
/// * `y`         - Outputs, `l x n`.
/// * `threshold` - Singular value cut-off.
pub fn solve_frobenius_norm(x: &DMatrix<Float>, y: &DMatrix<Float>, threshold: Float) -> Result<DMatrix<Float>> {
    let pinv = truncated_pseudo_inverse(x, threshold)?;
    Ok(y * pinv)
}
