//! Monotone Cubic Interpolation

use cosbos_core::cosbos::{find_interval, Float};
use cosbos_core::error::*;

/// Piecewise cubic Hermite interpolant whose node derivatives are chosen so
/// the curve does not overshoot monotone data (Fritsch-Butland weighted
/// harmonic mean in the interior, one-sided three-point estimates at the
/// ends). Values outside the nodes are extrapolated with the end polynomials.
#[derive(Clone, Debug, PartialEq)]
pub struct Pchip {
    /// Interpolation nodes, strictly increasing.
    nodes: Vec<Float>,

    /// Function values at the nodes.
    values: Vec<Float>,

    /// Derivatives at the nodes.
    derivatives: Vec<Float>,
}

impl Pchip {
    /// Returns a new `Pchip`.
    ///
    /// * `nodes`  - Interpolation nodes; at least two, finite and strictly
    ///              increasing.
    /// * `values` - Function values, one per node.
    pub fn new(nodes: Vec<Float>, values: Vec<Float>) -> Result<Self> {
        check_len("interpolation values", nodes.len(), values.len())?;
        if nodes.len() < 2 {
            return Err(Error::InvalidArgument(format!(
                "interpolation needs at least 2 nodes, found {}",
                nodes.len()
            )));
        }
        if nodes.iter().chain(values.iter()).any(|v| !v.is_finite()) {
            return Err(Error::InvalidArgument(
                "interpolation nodes and values must be finite".to_string(),
            ));
        }
        if nodes.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::InvalidArgument(
                "interpolation nodes must be strictly increasing".to_string(),
            ));
        }

        Ok(Self::from_valid_table(nodes, values))
    }

    /// Returns a new `Pchip` for a table already known to be valid.
    ///
    /// * `nodes`  - Interpolation nodes.
    /// * `values` - Function values, one per node.
    pub(crate) fn from_valid_table(nodes: Vec<Float>, values: Vec<Float>) -> Self {
        debug_assert!(nodes.len() >= 2 && nodes.len() == values.len());
        let derivatives = derivatives(&nodes, &values);
        Self {
            nodes,
            values,
            derivatives,
        }
    }

    /// Returns the interpolation nodes.
    pub fn nodes(&self) -> &[Float] {
        &self.nodes
    }

    /// Returns the function values at the nodes.
    pub fn values(&self) -> &[Float] {
        &self.values
    }

    /// Returns the derivatives at the nodes.
    pub fn derivatives(&self) -> &[Float] {
        &self.derivatives
    }

    /// Evaluates the interpolant.
    ///
    /// * `x` - Variable to interpolate.
    pub fn eval(&self, x: Float) -> Float {
        let nodes = &self.nodes;
        let idx = find_interval(nodes.len(), |i| nodes[i] <= x);
        let x0 = nodes[idx];
        let x1 = nodes[idx + 1];
        let f0 = self.values[idx];
        let f1 = self.values[idx + 1];
        let width = x1 - x0;
        let d0 = width * self.derivatives[idx];
        let d1 = width * self.derivatives[idx + 1];

        let t = (x - x0) / width;
        let t2 = t * t;
        let t3 = t2 * t;
        (2.0 * t3 - 3.0 * t2 + 1.0) * f0
            + (-2.0 * t3 + 3.0 * t2) * f1
            + (t3 - 2.0 * t2 + t) * d0
            + (t3 - t2) * d1
    }
}

/// Computes the node derivatives.
///
/// * `nodes`  - Interpolation nodes.
/// * `values` - Function values.
fn derivatives(nodes: &[Float], values: &[Float]) -> Vec<Float> {
    let n = nodes.len();
    let h: Vec<Float> = nodes.windows(2).map(|w| w[1] - w[0]).collect();
    let m: Vec<Float> = values
        .windows(2)
        .zip(h.iter())
        .map(|(w, &hk)| (w[1] - w[0]) / hk)
        .collect();

    // Two nodes give a straight line.
    if n == 2 {
        return vec![m[0]; 2];
    }

    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        let (m0, m1) = (m[k - 1], m[k]);
        if m0 == 0.0 || m1 == 0.0 || m0.signum() != m1.signum() {
            continue;
        }
        let w1 = 2.0 * h[k] + h[k - 1];
        let w2 = h[k] + 2.0 * h[k - 1];
        d[k] = (w1 + w2) / (w1 / m0 + w2 / m1);
    }
    d[0] = end_derivative(h[0], h[1], m[0], m[1]);
    d[n - 1] = end_derivative(h[n - 2], h[n - 3], m[n - 2], m[n - 3]);
    d
}

/// One-sided three-point derivative at an end node, limited to keep the end
/// interval monotone.
///
/// * `h0` - Width of the end interval.
/// * `h1` - Width of its neighbour.
/// * `m0` - Slope of the end interval.
/// * `m1` - Slope of its neighbour.
fn end_derivative(h0: Float, h1: Float, m0: Float, m1: Float) -> Float {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if sign(d) != sign(m0) {
        0.0
    } else if sign(m0) != sign(m1) && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}

/// Returns -1, 0 or 1.
#[inline]
fn sign(x: Float) -> Float {
    if x == 0.0 {
        0.0
    } else {
        x.signum()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn reproduces_nodes() {
        let p = Pchip::new(vec![0.0, 1.0, 3.0, 4.0], vec![1.0, 3.0, 2.0, 5.0]).unwrap();
        for (&x, &y) in p.nodes().iter().zip(p.values().iter()) {
            assert!(approx_eq!(f64, p.eval(x), y, epsilon = 1e-12));
        }
    }

    #[test]
    fn derivatives_by_hand() {
        // h = [1, 1, 1], m = [2, 1, -1].
        let p = Pchip::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 2.0, 3.0, 2.0]).unwrap();
        let d = p.derivatives();
        // Interior: harmonic mean 2 / (1/2 + 1/1) = 4/3; sign change gives 0.
        assert!(approx_eq!(f64, d[1], 4.0 / 3.0, epsilon = 1e-12));
        assert_eq!(d[2], 0.0);
        // Left end: (3 * 2 - 1) / 2 = 2.5.
        assert!(approx_eq!(f64, d[0], 2.5, epsilon = 1e-12));
        // Right end: (3 * -1 - 1) / 2 = -2, slopes differ in sign but |d| <= 3.
        assert!(approx_eq!(f64, d[3], -2.0, epsilon = 1e-12));
    }

    #[test]
    fn end_derivative_limits() {
        // Sign flip against the end slope.
        assert_eq!(end_derivative(1.0, 1.0, 1.0, 5.0), 0.0);
        // Overshoot clipped to three times the end slope.
        assert_eq!(end_derivative(1.0, 0.1, 1.0, -10.0), 3.0);
    }

    #[test]
    fn two_nodes_are_linear() {
        let p = Pchip::new(vec![1.0, 3.0], vec![2.0, 6.0]).unwrap();
        assert!(approx_eq!(f64, p.eval(2.0), 4.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, p.eval(5.0), 10.0, epsilon = 1e-12));
    }

    #[test]
    fn extrapolates_with_end_polynomial() {
        let p = Pchip::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]).unwrap();
        assert!(approx_eq!(f64, p.eval(-1.0), -1.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, p.eval(3.5), 3.5, epsilon = 1e-12));
    }

    #[test]
    fn rejects_bad_tables() {
        assert!(Pchip::new(vec![0.0], vec![1.0]).is_err());
        assert!(Pchip::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(Pchip::new(vec![0.0, 0.0, 1.0], vec![1.0, 2.0, 3.0]).is_err());
        assert!(Pchip::new(vec![0.0, Float::NAN], vec![1.0, 2.0]).is_err());
    }

    proptest! {
        #[test]
        fn monotone_data_stays_monotone(
            steps in prop::collection::vec(0.0..10.0f64, 3..8),
            widths in prop::collection::vec(0.5..3.0f64, 8),
        ) {
            let mut nodes = vec![0.0];
            let mut values = vec![0.0];
            for (k, s) in steps.iter().enumerate() {
                nodes.push(nodes[k] + widths[k]);
                values.push(values[k] + s);
            }
            let last = *nodes.last().unwrap();
            let p = Pchip::new(nodes, values).unwrap();

            let mut prev = p.eval(0.0);
            for i in 1..=200 {
                let y = p.eval(last * i as Float / 200.0);
                prop_assert!(y >= prev - 1e-9);
                prev = y;
            }
        }
    }
}
