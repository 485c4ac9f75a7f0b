//! Solve Methods

use super::irls::basis_pursuit;
use super::omp::{orthogonal_matching_pursuit, unvectorize, vectorized_system};
use super::pinv::{solve_frobenius_norm, solve_full_rank};
use cosbos_core::cosbos::Float;
use cosbos_core::error::*;
use nalgebra::DMatrix;
use std::fmt;

/// Default singular value cut-off of the truncated SVD solver.
pub const DEFAULT_SVD_THRESHOLD: Float = 0.01;

/// Default squared residual norm at which matching pursuit stops.
pub const DEFAULT_PURSUIT_TOLERANCE: Float = 1e-6;

/// How the mixing matrix is recovered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SolveMethod {
    /// Minimum norm least squares.
    FullRank,

    /// Least squares restricted to the directions of `X` whose singular
    /// values exceed `threshold`.
    FrobeniusNorm { threshold: Float },

    /// Sparse solution by orthogonal matching pursuit.
    Sparse { tolerance: Float },

    /// Minimum L1 norm solution.
    L1 { iterations: usize, tolerance: Float },
}

impl SolveMethod {
    /// Returns the truncated SVD solver with the default cut-off.
    pub fn frobenius_norm() -> Self {
        Self::FrobeniusNorm {
            threshold: DEFAULT_SVD_THRESHOLD,
        }
    }

    /// Returns the matching pursuit solver with the default tolerance.
    pub fn sparse() -> Self {
        Self::Sparse {
            tolerance: DEFAULT_PURSUIT_TOLERANCE,
        }
    }

    /// Returns the L1 solver with default iteration limits.
    pub fn l1() -> Self {
        Self::L1 {
            iterations: 100,
            tolerance: 1e-10,
        }
    }
}

impl Default for SolveMethod {
    fn default() -> Self {
        Self::FullRank
    }
}

impl fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::FullRank => write!(f, "full rank"),
            Self::FrobeniusNorm { threshold } => write!(f, "Frobenius norm (threshold {threshold})"),
            Self::Sparse { tolerance } => write!(f, "L0 norm (tolerance {tolerance})"),
            Self::L1 { iterations, tolerance } => {
                write!(f, "L1 norm ({iterations} iterations, tolerance {tolerance})")
            }
        }
    }
}

/// Recovers `A` from `Y = A X`.
///
/// * `x`      - Fixture settings, `m x n` (one trial per column).
/// * `y`      - Sensor responses, `l x n`.
/// * `method` - Solver.
pub fn recover_mixing_matrix(x: &DMatrix<Float>, y: &DMatrix<Float>, method: SolveMethod) -> Result<DMatrix<Float>> {
    check_len("response columns", x.ncols(), y.ncols())?;
    if x.is_empty() || y.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "empty system: inputs {}x{}, outputs {}x{}",
            x.nrows(),
            x.ncols(),
            y.nrows(),
            y.ncols()
        )));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(Error::InvalidArgument("system contains non-finite values".to_string()));
    }

    info!(
        "Recovering {}x{} mixing matrix from {} trials ({method}) ...",
        y.nrows(),
        x.nrows(),
        x.ncols()
    );

    let (l, m) = (y.nrows(), x.nrows());
    match method {
        SolveMethod::FullRank => solve_full_rank(x, y),
        SolveMethod::FrobeniusNorm { threshold } => solve_frobenius_norm(x, y, threshold),
        SolveMethod::Sparse { tolerance } => {
            let (phi, b) = vectorized_system(x, y);
            let a = orthogonal_matching_pursuit(&phi, &b, tolerance)?;
            Ok(unvectorize(&a, l, m))
        }
        SolveMethod::L1 { iterations, tolerance } => {
            let (phi, b) = vectorized_system(x, y);
            let a = basis_pursuit(&phi, &b, iterations, tolerance)?;
            Ok(unvectorize(&a, l, m))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn assert_matrix_eq(a: &DMatrix<Float>, b: &DMatrix<Float>, epsilon: Float) {
        assert_eq!(a.shape(), b.shape());
        for (u, v) in a.iter().zip(b.iter()) {
            assert!(approx_eq!(f64, *u, *v, epsilon = epsilon), "{a} != {b}");
        }
    }

    /// Three fixtures, four trials, full row rank.
    fn inputs() -> DMatrix<Float> {
        DMatrix::from_row_slice(
            3,
            4,
            &[1.0, 0.0, 2.0, 1.0, 0.5, 1.0, 0.0, 2.0, 0.0, 3.0, 1.0, 1.0],
        )
    }

    fn mixing() -> DMatrix<Float> {
        DMatrix::from_row_slice(2, 3, &[0.0, 2.5, 0.0, -1.0, 0.0, 0.0])
    }

    #[test]
    fn every_method_recovers_consistent_system() {
        let x = inputs();
        let a = mixing();
        let y = &a * &x;
        for method in [
            SolveMethod::FullRank,
            SolveMethod::frobenius_norm(),
            SolveMethod::sparse(),
            SolveMethod::l1(),
        ] {
            let recovered = recover_mixing_matrix(&x, &y, method).unwrap();
            assert_matrix_eq(&recovered, &a, 1e-5);
        }
    }

    #[test]
    fn sparse_recovery_on_orthonormal_inputs_is_exactly_sparse() {
        let x = DMatrix::from_row_slice(3, 4, &[1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        let a = mixing();
        let y = &a * &x;
        let recovered = recover_mixing_matrix(&x, &y, SolveMethod::sparse()).unwrap();
        assert_matrix_eq(&recovered, &a, 1e-12);
        assert_eq!(recovered.iter().filter(|v| **v != 0.0).count(), 2);
    }

    #[test]
    fn rejects_mismatched_trials() {
        let x = inputs();
        let y = DMatrix::zeros(2, 3);
        match recover_mixing_matrix(&x, &y, SolveMethod::FullRank) {
            Err(Error::ShapeMismatch { expected, found, .. }) => {
                assert_eq!((expected, found), (4, 3));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_and_non_finite_systems() {
        let empty = DMatrix::<Float>::zeros(0, 4);
        assert!(recover_mixing_matrix(&empty, &DMatrix::zeros(2, 4), SolveMethod::FullRank).is_err());
        let mut y = DMatrix::zeros(2, 4);
        y[(0, 0)] = Float::NAN;
        assert!(recover_mixing_matrix(&inputs(), &y, SolveMethod::FullRank).is_err());
    }
}
