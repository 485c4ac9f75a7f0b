//! Gaussian hash tensor.

use super::field::GaussianField;
use super::room::{PathSet, Room};
use cosbos_core::array_file::ArrayFile;
use cosbos_core::cosbos::Float;
use cosbos_core::error::*;
use cosbos_core::grid::VoxelGrid;
use cosbos_core::layout::HASH_ORDER;
use cosbos_core::parallel::{for_each_chunk_mut, Parallelism};

/// Precomputed Gaussian weights relating every voxel to every path.
///
/// Logically a `voxel_count x path_count` matrix `H[i, j]`, stored flat with
/// the voxel index varying fastest: `weights[i + voxel_count * j]`. The weights
/// of one path are therefore contiguous.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianHash {
    /// Voxel grid.
    grid: VoxelGrid,

    /// Paths.
    paths: PathSet,

    /// The weights.
    weights: Vec<Float>,
}

impl GaussianHash {
    /// Computes the hash tensor for a room.
    ///
    /// * `room`        - Room geometry.
    /// * `sigma`       - Standard deviation of the Gaussian falloff.
    /// * `parallelism` - Execution configuration.
    pub fn build(room: &Room, sigma: Float, parallelism: &Parallelism) -> Result<Self> {
        let field = GaussianField::new(room, sigma)?;
        Self::from_field(&field, parallelism)
    }

    /// Materialises the weights of a `GaussianField`.
    ///
    /// * `field`       - The field.
    /// * `parallelism` - Execution configuration.
    pub fn from_field(field: &GaussianField, parallelism: &Parallelism) -> Result<Self> {
        let grid = *field.grid();
        let paths = *field.paths();
        let voxel_count = grid.count();
        let len = tensor_len(&grid, &paths)?;

        info!(
            "Rendering volume H ({} sensors, {} fixtures) ...",
            paths.n_sensors(),
            paths.n_fixtures()
        );

        // Each chunk is the contiguous column of one path.
        let mut weights = vec![0.0; len];
        for_each_chunk_mut(&mut weights, voxel_count, parallelism, |path, column| {
            field.fill_path(path, 0, column);
        });

        Ok(Self { grid, paths, weights })
    }

    /// Wraps externally supplied weights after checking their length against
    /// the room.
    ///
    /// * `room`    - Room geometry the weights were computed for.
    /// * `weights` - Flat weights, voxel index fastest.
    pub fn from_weights(room: &Room, weights: Vec<Float>) -> Result<Self> {
        let grid = *room.grid();
        let paths = *room.paths();
        check_len("hash tensor", tensor_len(&grid, &paths)?, weights.len())?;
        Ok(Self { grid, paths, weights })
    }

    /// Wraps a hash tensor read from an array file. The file must hold a
    /// `voxel_count x path_count` array flattened voxel fastest.
    ///
    /// * `room`  - Room geometry the weights were computed for.
    /// * `array` - The array.
    pub fn from_array(room: &Room, array: ArrayFile) -> Result<Self> {
        check_layout("hash tensor", HASH_ORDER, array.order)?;
        let expected = [room.grid().count(), room.paths().count()];
        check_extents("hash tensor", &expected, &array.extents)?;
        Self::from_weights(room, array.data)
    }

    /// Returns the hash tensor as an array file.
    pub fn to_array(&self) -> ArrayFile {
        ArrayFile {
            order: HASH_ORDER,
            extents: vec![self.voxel_count(), self.path_count()],
            data: self.weights.clone(),
        }
    }

    /// Returns the voxel grid.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Returns the paths.
    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    /// Returns the number of voxels.
    pub fn voxel_count(&self) -> usize {
        self.grid.count()
    }

    /// Returns the number of paths.
    pub fn path_count(&self) -> usize {
        self.paths.count()
    }

    /// Returns `H[voxel, path]`.
    ///
    /// * `voxel` - Linear voxel index.
    /// * `path`  - Linear path index.
    pub fn weight(&self, voxel: usize, path: usize) -> Float {
        self.weights[HASH_ORDER.offset2((voxel, path), (self.voxel_count(), self.path_count()))]
    }

    /// Returns the weights of every voxel for one path.
    ///
    /// * `path` - Linear path index.
    pub fn column(&self, path: usize) -> &[Float] {
        let n = self.voxel_count();
        &self.weights[path * n..(path + 1) * n]
    }

    /// Returns the flat weights.
    pub fn as_slice(&self) -> &[Float] {
        &self.weights
    }

    /// Returns a borrowed view of the weights.
    pub fn view(&self) -> HashView<'_> {
        HashView {
            grid: self.grid,
            paths: self.paths,
            weights: &self.weights,
        }
    }
}

/// A hash tensor borrowed from caller owned storage, laid out like
/// `GaussianHash`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HashView<'a> {
    /// Voxel grid.
    grid: VoxelGrid,

    /// Paths.
    paths: PathSet,

    /// The weights.
    weights: &'a [Float],
}

impl<'a> HashView<'a> {
    /// Wraps externally owned weights after checking their length against the
    /// room.
    ///
    /// * `room`    - Room geometry the weights were computed for.
    /// * `weights` - Flat weights, voxel index fastest.
    pub fn new(room: &Room, weights: &'a [Float]) -> Result<Self> {
        let grid = *room.grid();
        let paths = *room.paths();
        check_len("hash tensor", tensor_len(&grid, &paths)?, weights.len())?;
        Ok(Self { grid, paths, weights })
    }

    /// Returns the voxel grid.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Returns the paths.
    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    /// Returns the weights of every voxel for one path.
    ///
    /// * `path` - Linear path index.
    pub fn column(&self, path: usize) -> &'a [Float] {
        let n = self.grid.count();
        &self.weights[path * n..(path + 1) * n]
    }

    /// Returns the flat weights.
    pub fn as_slice(&self) -> &'a [Float] {
        self.weights
    }
}

/// Returns `voxel_count * path_count`, failing if it overflows.
///
/// * `grid`  - Voxel grid.
/// * `paths` - Paths.
fn tensor_len(grid: &VoxelGrid, paths: &PathSet) -> Result<usize> {
    grid.count().checked_mul(paths.count()).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "hash tensor for {} voxels x {} paths is too large",
            grid.count(),
            paths.count()
        ))
    })
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
