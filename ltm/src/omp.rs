//! Orthogonal Matching Pursuit

use cosbos_core::cosbos::Float;
use cosbos_core::error::*;
use nalgebra::{DMatrix, DVector};

/// Rewrites `Y = A X` as the linear system `vec(Y) = (Xᵀ ⊗ I) vec(A)` with
/// column-major vectorisation. Returns the system matrix and right hand side.
///
/// * `x` - Inputs, `m x n`.
/// * `y` - Outputs, `l x n`.
pub fn vectorized_system(x: &DMatrix<Float>, y: &DMatrix<Float>) -> (DMatrix<Float>, DVector<Float>) {
    let l = y.nrows();
    let system = x.transpose().kronecker(&DMatrix::identity(l, l));
    let rhs = DVector::from_column_slice(y.as_slice());
    (system, rhs)
}

/// Reshapes a column-major `vec(A)` back into an `l x m` matrix.
///
/// * `a` - The vectorised matrix.
/// * `l` - Number of rows.
/// * `m` - Number of columns.
pub fn unvectorize(a: &DVector<Float>, l: usize, m: usize) -> DMatrix<Float> {
    DMatrix::from_column_slice(l, m, a.as_slice())
}

/// Greedy sparse solution of `phi · a = b`: atoms are added one at a time,
/// always the column most correlated with the residual, and the coefficients
/// of the selected atoms are refit by least squares after every step. Stops
/// when the squared residual norm is at or below `tolerance`, every atom is
/// selected, or no remaining atom correlates with the residual.
///
/// * `phi`       - Dictionary, one atom per column.
/// * `b`         - Right hand side.
/// * `tolerance` - Squared residual norm to reach.
pub fn orthogonal_matching_pursuit(
    phi: &DMatrix<Float>,
    b: &DVector<Float>,
    tolerance: Float,
) -> Result<DVector<Float>> {
    let n_atoms = phi.ncols();
    let max_support = n_atoms.min(phi.nrows());
    let mut support: Vec<usize> = Vec::with_capacity(max_support);
    let mut selected = vec![false; n_atoms];
    let mut coefficients = DVector::zeros(0);
    let mut residual = b.clone();

    while residual.norm_squared() > tolerance && support.len() < max_support {
        let correlations = phi.tr_mul(&residual);
        let best = (0..n_atoms)
            .filter(|&k| !selected[k])
            .map(|k| (k, correlations[k].abs()))
            .fold(None, |best: Option<(usize, Float)>, (k, c)| match best {
                Some((_, bc)) if bc >= c => best,
                _ => Some((k, c)),
            });
        let k = match best {
            Some((k, c)) if c > 0.0 => k,
            _ => break,
        };
        selected[k] = true;
        support.push(k);

        let sub = phi.select_columns(support.iter());
        coefficients = sub
            .clone()
            .svd(true, true)
            .solve(b, Float::EPSILON)
            .map_err(|e| Error::Solver(e.to_string()))?;
        residual = b - sub * &coefficients;
    }

    debug!(
        "Matching pursuit selected {} of {} atoms, residual {:e}",
        support.len(),
        n_atoms,
        residual.norm_squared()
    );

    let mut a = DVector::zeros(n_atoms);
    for (&k, &c) in support.iter().zip(coefficients.iter()) {
        a[k] = c;
    }
    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn assert_vector_eq(a: &DVector<Float>, b: &DVector<Float>) {
        assert_eq!(a.len(), b.len());
        for (u, v) in a.iter().zip(b.iter()) {
            assert!(approx_eq!(f64, *u, *v, epsilon = 1e-12), "{a} != {b}");
        }
    }

    #[test]
    fn vectorization_is_column_major() {
        let x = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let a = DMatrix::from_row_slice(2, 2, &[1.0, -1.0, 0.5, 2.0]);
        let y = &a * &x;
        let (phi, b) = vectorized_system(&x, &y);
        assert_eq!(phi.shape(), (6, 4));
        let vec_a = DVector::from_column_slice(a.as_slice());
        let lhs = &phi * &vec_a;
        for (u, v) in lhs.iter().zip(b.iter()) {
            assert!(approx_eq!(f64, *u, *v, epsilon = 1e-12));
        }
        assert_eq!(unvectorize(&vec_a, 2, 2), a);
    }

    #[test]
    fn orthonormal_dictionary_picks_exact_support() {
        let phi = DMatrix::<Float>::identity(4, 4);
        let b = DVector::from_column_slice(&[0.0, 3.0, 0.0, -1.0]);
        let a = orthogonal_matching_pursuit(&phi, &b, 1e-6).unwrap();
        assert_vector_eq(&a, &b);
        assert_eq!(a[0], 0.0);
        assert_eq!(a[2], 0.0);
    }

    #[test]
    fn stops_at_tolerance() {
        let phi = DMatrix::<Float>::identity(3, 3);
        let b = DVector::from_column_slice(&[5.0, 0.001, 0.0]);
        // The second coefficient is below the residual tolerance.
        let a = orthogonal_matching_pursuit(&phi, &b, 1e-5).unwrap();
        assert_vector_eq(&a, &DVector::from_column_slice(&[5.0, 0.0, 0.0]));
        assert_eq!(a[1], 0.0);
    }

    #[test]
    fn zero_right_hand_side() {
        let phi = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let a = orthogonal_matching_pursuit(&phi, &DVector::zeros(2), 1e-6).unwrap();
        assert_eq!(a, DVector::zeros(2));
    }
}
