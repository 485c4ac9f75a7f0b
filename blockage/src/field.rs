//! Gaussian falloff around the line of every path.

use super::distance::Line;
use super::room::{PathSet, Room};
use cosbos_core::cosbos::Float;
use cosbos_core::error::*;
use cosbos_core::geometry::Point3f;
use cosbos_core::grid::VoxelGrid;

/// Gaussian falloff `exp(-d^2 / (2 sigma^2))` of a squared distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    /// Standard deviation.
    sigma: Float,

    /// Stores 1 / (2 sigma^2).
    inv_two_sigma_sq: Float,
}

impl GaussianKernel {
    /// Returns a new `GaussianKernel`.
    ///
    /// * `sigma` - Standard deviation; must be positive and finite.
    pub fn new(sigma: Float) -> Result<Self> {
        if !(sigma > 0.0 && sigma.is_finite()) {
            return Err(Error::InvalidArgument(format!(
                "sigma must be positive and finite, got {sigma}"
            )));
        }
        Ok(Self {
            sigma,
            inv_two_sigma_sq: 1.0 / (2.0 * sigma * sigma),
        })
    }

    /// Returns the standard deviation.
    pub fn sigma(&self) -> Float {
        self.sigma
    }

    /// Returns the weight for a squared distance.
    ///
    /// * `distance_squared` - Squared distance to the path's line.
    #[inline(always)]
    pub fn weight(&self, distance_squared: Float) -> Float {
        (-distance_squared * self.inv_two_sigma_sq).exp()
    }
}

/// Evaluates Gaussian weights between voxels and paths on demand. Both the
/// materialised hash tensor and the streamed reconstruction are computed from
/// here, so they agree bit for bit.
#[derive(Clone, Debug)]
pub struct GaussianField {
    /// Voxel grid.
    grid: VoxelGrid,

    /// Paths.
    paths: PathSet,

    /// Voxel positions in linear index order.
    centers: Vec<Point3f>,

    /// Line of each path in linear index order.
    lines: Vec<Line>,

    /// The falloff.
    kernel: GaussianKernel,
}

impl GaussianField {
    /// Returns a new `GaussianField`.
    ///
    /// * `room`  - Room geometry.
    /// * `sigma` - Standard deviation of the falloff.
    pub fn new(room: &Room, sigma: Float) -> Result<Self> {
        let kernel = GaussianKernel::new(sigma)?;
        let paths = *room.paths();

        let lines: Vec<Line> = paths
            .iter()
            .map(|path| {
                let (sensor, fixture) = room.endpoints(path);
                let line = Line::new(sensor, fixture);
                if line.is_degenerate() {
                    debug!(
                        "Sensor {} and fixture {} coincide at {}",
                        path.sensor, path.fixture, sensor
                    );
                }
                line
            })
            .collect();

        Ok(Self {
            grid: *room.grid(),
            paths,
            centers: room.grid().centers(),
            lines,
            kernel,
        })
    }

    /// Returns the voxel grid.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Returns the paths.
    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    /// Returns the falloff.
    pub fn kernel(&self) -> &GaussianKernel {
        &self.kernel
    }

    /// Returns the weight of a voxel for a path.
    ///
    /// * `voxel` - Linear voxel index.
    /// * `path`  - Linear path index.
    #[inline]
    pub fn weight(&self, voxel: usize, path: usize) -> Float {
        self.kernel
            .weight(self.lines[path].distance_squared(&self.centers[voxel]))
    }

    /// Computes the weights of consecutive voxels for one path.
    ///
    /// * `path`        - Linear path index.
    /// * `first_voxel` - Linear index of the voxel written to `out[0]`.
    /// * `out`         - Receives one weight per voxel.
    pub fn fill_path(&self, path: usize, first_voxel: usize, out: &mut [Float]) {
        let line = &self.lines[path];
        let centers = &self.centers[first_voxel..first_voxel + out.len()];
        line.distances_squared(centers, out);
        for w in out.iter_mut() {
            *w = self.kernel.weight(*w);
        }
    }

    /// Computes the weighted average of per-path values for consecutive
    /// voxels without materialising the weights of other voxels.
    ///
    /// * `values`      - One value per path.
    /// * `first_voxel` - Linear index of the voxel written to `out[0]`.
    /// * `out`         - Receives one average per voxel.
    pub fn weighted_average(&self, values: &[Float], first_voxel: usize, out: &mut [Float]) {
        debug_assert_eq!(values.len(), self.paths.count());
        let mut weights = vec![0.0; out.len()];
        let mut accumulator = Accumulator::new(out.len());
        for (j, &value) in values.iter().enumerate() {
            self.fill_path(j, first_voxel, &mut weights);
            accumulator.add(value, &weights);
        }
        accumulator.finish(out);
    }
}

/// Running numerator and denominator of a weighted average over paths for a
/// block of voxels. Paths must be added in linear index order so every
/// evaluation of the average sums in the same order.
#[derive(Clone, Debug)]
pub struct Accumulator {
    /// Sum of weight * value per voxel.
    numerator: Vec<Float>,

    /// Sum of weights per voxel.
    denominator: Vec<Float>,
}

impl Accumulator {
    /// Returns a new `Accumulator` for a block of voxels.
    ///
    /// * `len` - Number of voxels.
    pub fn new(len: usize) -> Self {
        Self {
            numerator: vec![0.0; len],
            denominator: vec![0.0; len],
        }
    }

    /// Adds one path.
    ///
    /// * `value`   - Value of the path.
    /// * `weights` - Weight of the path for each voxel of the block.
    #[inline]
    pub fn add(&mut self, value: Float, weights: &[Float]) {
        debug_assert_eq!(weights.len(), self.numerator.len());
        for ((n, d), &w) in self
            .numerator
            .iter_mut()
            .zip(self.denominator.iter_mut())
            .zip(weights.iter())
        {
            *n += value * w;
            *d += w;
        }
    }

    /// Writes the averages. A voxel whose weights sum to zero gets zero.
    ///
    /// * `out` - Receives one average per voxel.
    pub fn finish(&self, out: &mut [Float]) {
        debug_assert_eq!(out.len(), self.numerator.len());
        for ((v, &n), &d) in out
            .iter_mut()
            .zip(self.numerator.iter())
            .zip(self.denominator.iter())
        {
            *v = if d == 0.0 { 0.0 } else { n / d };
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn axis_room() -> Room {
        Room::from_rows(&[[0.0, 0.0, 0.0]], &[[0.0, 0.0, 10.0]], [3, 3, 3]).unwrap()
    }

    #[test]
    fn kernel_rejects_bad_sigma() {
        for sigma in [0.0, -1.0, Float::NAN, Float::INFINITY] {
            assert!(matches!(GaussianKernel::new(sigma), Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn kernel_values() {
        let kernel = GaussianKernel::new(2.0).unwrap();
        assert_eq!(kernel.sigma(), 2.0);
        assert_eq!(kernel.weight(0.0), 1.0);
        assert!(approx_eq!(f64, kernel.weight(8.0), (-1.0_f64).exp(), ulps = 2));
    }

    #[test]
    fn weights_along_axis() {
        let field = GaussianField::new(&axis_room(), 1.0).unwrap();
        // (0, 0, z) lies on the line for every z.
        for z in 0..3 {
            assert_eq!(field.weight(9 * z, 0), 1.0);
        }
        // Voxel 26 is (2, 2, 2), 8 units^2 away.
        assert!(approx_eq!(f64, field.weight(26, 0), (-4.0_f64).exp(), epsilon = 1e-15));
    }

    #[test]
    fn fill_path_matches_weight() {
        let room = Room::from_rows(
            &[[0.0, 0.0, 0.0], [2.0, 1.0, 0.5]],
            &[[1.0, 1.0, 3.0], [0.0, 2.0, 2.0]],
            [3, 2, 2],
        )
        .unwrap();
        let field = GaussianField::new(&room, 0.75).unwrap();
        let mut out = vec![0.0; 5];
        for j in 0..room.paths().count() {
            field.fill_path(j, 4, &mut out);
            for (k, w) in out.iter().enumerate() {
                assert_eq!(*w, field.weight(4 + k, j));
            }
        }
    }

    #[test]
    fn accumulator_zero_weight_gives_zero() {
        let mut acc = Accumulator::new(3);
        acc.add(5.0, &[0.0, 1.0, 0.5]);
        acc.add(1.0, &[0.0, 1.0, 1.5]);
        let mut out = vec![Float::NAN; 3];
        acc.finish(&mut out);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 3.0);
        assert!(approx_eq!(f64, out[2], (2.5 + 1.5) / 2.0, ulps = 2));
    }
}
