//! Volume reconstruction.

use super::field::{Accumulator, GaussianField};
use super::hash::{GaussianHash, HashView};
use super::observation::ObservationMatrix;
use super::room::Room;
use cosbos_core::array_file::ArrayFile;
use cosbos_core::cosbos::Float;
use cosbos_core::error::*;
use cosbos_core::geometry::Point3u;
use cosbos_core::grid::VoxelGrid;
use cosbos_core::layout::VOLUME_ORDER;
use cosbos_core::parallel::{for_each_chunk_mut, Parallelism};

/// One reconstructed attenuation value per voxel, stored in voxel order
/// (x fastest, then y, then z).
#[derive(Clone, Debug, PartialEq)]
pub struct Volume {
    /// Voxel grid.
    grid: VoxelGrid,

    /// The values.
    values: Vec<Float>,
}

impl Volume {
    /// Returns the voxel grid.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Returns the extents along x, y and z.
    pub fn dim(&self) -> [usize; 3] {
        self.grid.dim()
    }

    /// Returns the value of a voxel.
    ///
    /// * `p` - Lattice coordinates of the voxel.
    pub fn at(&self, p: &Point3u) -> Float {
        self.values[self.grid.index(p)]
    }

    /// Returns the values in voxel order.
    pub fn as_slice(&self) -> &[Float] {
        &self.values
    }

    /// Returns the values, consuming the volume.
    pub fn into_values(self) -> Vec<Float> {
        self.values
    }

    /// Returns the volume as an `nx x ny x nz` array file.
    pub fn to_array(&self) -> ArrayFile {
        ArrayFile {
            order: VOLUME_ORDER,
            extents: self.dim().to_vec(),
            data: self.values.clone(),
        }
    }
}

/// Reconstructs a volume from a precomputed hash tensor. Every voxel gets the
/// average of the per-path losses weighted by its hash weights, or zero if its
/// weights sum to zero.
///
/// * `hash`        - The hash tensor.
/// * `observation` - The observation matrix.
/// * `parallelism` - Execution configuration.
pub fn reconstruct_volume(
    hash: &GaussianHash,
    observation: &ObservationMatrix,
    parallelism: &Parallelism,
) -> Result<Volume> {
    reconstruct_volume_from_view(&hash.view(), observation, parallelism)
}

/// Reconstructs a volume from a borrowed hash tensor.
///
/// * `hash`        - The hash tensor.
/// * `observation` - The observation matrix.
/// * `parallelism` - Execution configuration.
pub fn reconstruct_volume_from_view(
    hash: &HashView<'_>,
    observation: &ObservationMatrix,
    parallelism: &Parallelism,
) -> Result<Volume> {
    hash.paths().check_matches("observation matrix paths", observation.paths())?;
    let losses = observation.path_losses();

    info!("Rendering volume V ...");
    let grid = *hash.grid();
    let block_size = parallelism.block_size();
    let mut values = vec![0.0; grid.count()];
    for_each_chunk_mut(&mut values, block_size, parallelism, |block, out| {
        let first = block * block_size;
        let mut accumulator = Accumulator::new(out.len());
        for (j, &loss) in losses.iter().enumerate() {
            accumulator.add(loss, &hash.column(j)[first..first + out.len()]);
        }
        accumulator.finish(out);
    });

    Ok(Volume { grid, values })
}

/// Reconstructs a volume from flat arrays. Both array lengths are checked
/// against the room before anything is computed. The hash tensor is read in
/// place.
///
/// * `room`        - Room geometry.
/// * `hash`        - Flat hash tensor, voxel index fastest.
/// * `observation` - Flat `4N x 3M` observation matrix, row index fastest.
/// * `parallelism` - Execution configuration.
pub fn reconstruct_volume_from_slices(
    room: &Room,
    hash: &[Float],
    observation: &[Float],
    parallelism: &Parallelism,
) -> Result<Volume> {
    let hash = HashView::new(room, hash)?;
    let observation = ObservationMatrix::new(*room.paths(), observation.to_vec())?;
    reconstruct_volume_from_view(&hash, &observation, parallelism)
}

/// Reconstructs a volume without materialising the hash tensor. Weights are
/// computed block by block and folded into the averages immediately; the
/// result is identical to `reconstruct_volume` on a hash built with the same
/// sigma.
///
/// * `room`        - Room geometry.
/// * `sigma`       - Standard deviation of the Gaussian falloff.
/// * `observation` - The observation matrix.
/// * `parallelism` - Execution configuration.
pub fn reconstruct_volume_streamed(
    room: &Room,
    sigma: Float,
    observation: &ObservationMatrix,
    parallelism: &Parallelism,
) -> Result<Volume> {
    room.paths().check_matches("observation matrix paths", observation.paths())?;
    let field = GaussianField::new(room, sigma)?;
    let losses = observation.path_losses();

    info!(
        "Rendering volume V from streamed weights ({} sensors, {} fixtures) ...",
        room.paths().n_sensors(),
        room.paths().n_fixtures()
    );
    let grid = *room.grid();
    let block_size = parallelism.block_size();
    let mut values = vec![0.0; grid.count()];
    for_each_chunk_mut(&mut values, block_size, parallelism, |block, out| {
        field.weighted_average(&losses, block * block_size, out);
    });

    Ok(Volume { grid, values })
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
