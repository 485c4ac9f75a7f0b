//! Basis Pursuit

use super::pinv::{default_rank_tolerance, truncated_pseudo_inverse};
use cosbos_core::cosbos::Float;
use cosbos_core::error::*;
use nalgebra::{DMatrix, DVector};

/// Floor added to the reweighting magnitudes so coefficients that reach zero
/// stay representable.
const WEIGHT_FLOOR: Float = 1e-12;

/// Minimum L1 norm solution of `phi · a = b` by iteratively reweighted least
/// squares. Starting from the minimum L2 norm solution, every iteration
/// solves the weighted problem `a = D (phi D)⁺ b` with
/// `D = diag(sqrt(|a| + floor))`, followed by one refinement of the residual
/// so that `phi · a = b` holds to working precision. Stops when the largest
/// coefficient change is at or below `tolerance` relative to the largest
/// coefficient, or after `iterations` rounds.
///
/// * `phi`        - System matrix.
/// * `b`          - Right hand side.
/// * `iterations` - Maximum number of reweighting rounds.
/// * `tolerance`  - Relative convergence threshold.
pub fn basis_pursuit(
    phi: &DMatrix<Float>,
    b: &DVector<Float>,
    iterations: usize,
    tolerance: Float,
) -> Result<DVector<Float>> {
    let mut a = truncated_pseudo_inverse(phi, default_rank_tolerance(phi))? * b;

    for iteration in 0..iterations {
        let next = reweighted_solution(phi, b, &a)?;

        let change = (&next - &a).amax();
        let scale = next.amax().max(1.0);
        a = next;
        if change <= tolerance * scale {
            debug!("Basis pursuit converged after {} iterations", iteration + 1);
            return Ok(a);
        }
    }

    warn!("Basis pursuit did not converge in {iterations} iterations");
    Ok(a)
}

/// One reweighting round. The weights enter as `phi D` rather than through
/// the gram matrix `phi D² phiᵀ`, whose condition number is the square and
/// loses the directions of near-zero coefficients to rank truncation.
///
/// * `phi` - System matrix.
/// * `b`   - Right hand side.
/// * `a`   - Current estimate.
fn reweighted_solution(phi: &DMatrix<Float>, b: &DVector<Float>, a: &DVector<Float>) -> Result<DVector<Float>> {
    let d = a.map(|v| (v.abs() + WEIGHT_FLOOR).sqrt());
    // phi D, scaling column k by d_k.
    let mut phi_d = phi.clone();
    for (mut column, &dk) in phi_d.column_iter_mut().zip(d.iter()) {
        column *= dk;
    }
    let pinv = truncated_pseudo_inverse(&phi_d, default_rank_tolerance(&phi_d))?;

    let mut y = &pinv * b;
    let residual = b - &phi_d * &y;
    y += pinv * residual;
    Ok(d.component_mul(&y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn prefers_sparse_solution() {
        // a1 + 2 a2 = 2: minimum L2 norm is (0.4, 0.8), minimum L1 norm (0, 1).
        let phi = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        let b = DVector::from_column_slice(&[2.0]);
        let a = basis_pursuit(&phi, &b, 200, 1e-12).unwrap();
        assert!(approx_eq!(f64, a[0], 0.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, a[1], 1.0, epsilon = 1e-6));
    }

    fn residual(phi: &DMatrix<Float>, a: &DVector<Float>, b: &DVector<Float>) -> Float {
        (phi * a - b).norm()
    }

    #[test]
    fn solution_satisfies_constraints() {
        // Overdetermined: the vectorised system of a 2 x 3 mixing matrix with
        // four zero entries observed over four trials.
        let x = DMatrix::from_row_slice(3, 4, &[1.0, 0.0, 2.0, 1.0, 0.5, 1.0, 0.0, 2.0, 0.0, 3.0, 1.0, 1.0]);
        let mixing = DMatrix::from_row_slice(2, 3, &[0.0, 2.5, 0.0, -1.0, 0.0, 0.0]);
        let (phi, b) = crate::vectorized_system(&x, &(&mixing * &x));
        let a = basis_pursuit(&phi, &b, 100, 1e-10).unwrap();
        assert!(residual(&phi, &a, &b) <= 1e-9 * (1.0 + b.norm()));
        for (u, v) in a.iter().zip(mixing.iter()) {
            assert!(approx_eq!(f64, *u, *v, epsilon = 1e-9));
        }

        // Underdetermined, checked whether or not the iterations converge.
        let phi = DMatrix::from_row_slice(
            3,
            5,
            &[1.0, 0.0, 1.0, 2.0, 0.5, 0.0, 1.0, 1.0, -1.0, 1.5, 1.0, 1.0, 0.0, 0.5, -1.0],
        );
        let b = &phi * DVector::from_column_slice(&[0.0, 0.0, 3.0, 0.0, -1.0]);
        for iterations in [0, 1, 5, 50] {
            let a = basis_pursuit(&phi, &b, iterations, 1e-12).unwrap();
            assert!(
                residual(&phi, &a, &b) <= 1e-9 * (1.0 + b.norm()),
                "{iterations} iterations: {}",
                residual(&phi, &a, &b)
            );
        }
    }

    #[test]
    fn keeps_exact_solution_of_square_system() {
        let phi = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let expected = DVector::from_column_slice(&[1.0, -2.0]);
        let b = &phi * &expected;
        let a = basis_pursuit(&phi, &b, 50, 1e-10).unwrap();
        for (u, v) in a.iter().zip(expected.iter()) {
            assert!(approx_eq!(f64, *u, *v, epsilon = 1e-6));
        }
    }
}
