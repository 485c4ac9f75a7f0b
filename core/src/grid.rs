//! Voxel Grid

use crate::cosbos::Axis;
use crate::error::*;
use crate::geometry::*;
use crate::layout::VOXEL_ORDER;
use std::ops::Index;

/// A 3-D lattice of voxels with integer coordinates `0..nx`, `0..ny`, `0..nz`.
/// Voxels are numbered with x varying fastest, then y, then z.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    /// Extents along x, y and z.
    dim: [usize; 3],
}

impl VoxelGrid {
    /// Returns a new `VoxelGrid`.
    ///
    /// * `dim` - Extents along x, y and z; each must be at least 1.
    pub fn new(dim: [usize; 3]) -> Result<Self> {
        for axis in Axis::ALL {
            if dim[axis as usize] == 0 {
                return Err(Error::InvalidArgument(format!(
                    "grid extent along {axis} must be positive, got {dim:?}"
                )));
            }
        }
        dim[0]
            .checked_mul(dim[1])
            .and_then(|n| n.checked_mul(dim[2]))
            .ok_or_else(|| Error::InvalidArgument(format!("grid {dim:?} is too large")))?;
        Ok(Self { dim })
    }

    /// Returns the extents along x, y and z.
    pub fn dim(&self) -> [usize; 3] {
        self.dim
    }

    /// Returns the number of voxels.
    pub fn count(&self) -> usize {
        self.dim[0] * self.dim[1] * self.dim[2]
    }

    /// Returns the linear index of a voxel.
    ///
    /// * `p` - Lattice coordinates of the voxel.
    pub fn index(&self, p: &Point3u) -> usize {
        VOXEL_ORDER.offset3([p.x, p.y, p.z], self.dim)
    }

    /// Returns the lattice coordinates of a voxel.
    ///
    /// * `i` - Linear index of the voxel.
    pub fn coord(&self, i: usize) -> Point3u {
        let [x, y, z] = VOXEL_ORDER.split3(i, self.dim);
        point3(x, y, z)
    }

    /// Returns the position of a voxel in room coordinates. Voxels are
    /// sampled at their integer lattice coordinate.
    ///
    /// * `i` - Linear index of the voxel.
    pub fn center(&self, i: usize) -> Point3f {
        Point3f::from(self.coord(i))
    }

    /// Returns the positions of all voxels in linear index order.
    pub fn centers(&self) -> Vec<Point3f> {
        (0..self.count()).map(|i| self.center(i)).collect()
    }

    /// Returns an iterator over linear indices and lattice coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Point3u)> + '_ {
        (0..self.count()).map(move |i| (i, self.coord(i)))
    }
}

impl Index<Axis> for VoxelGrid {
    type Output = usize;

    /// Returns the extent along an axis.
    ///
    /// * `axis` - The axis.
    fn index(&self, axis: Axis) -> &Self::Output {
        &self.dim[axis as usize]
    }
}

impl TryFrom<&[usize]> for VoxelGrid {
    type Error = Error;

    /// Creates a grid from a slice of exactly 3 extents.
    ///
    /// * `dim` - The extents.
    fn try_from(dim: &[usize]) -> Result<Self> {
        match *dim {
            [nx, ny, nz] => VoxelGrid::new([nx, ny, nz]),
            _ => Err(Error::InvalidArgument(format!(
                "grid needs 3 extents, got {}",
                dim.len()
            ))),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::iproduct;
    use proptest::prelude::*;

    #[test]
    fn rejects_zero_extent() {
        assert!(matches!(VoxelGrid::new([3, 0, 2]), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            VoxelGrid::try_from(&[3_usize, 2][..]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn x_varies_fastest() {
        let grid = VoxelGrid::new([3, 4, 2]).unwrap();
        assert_eq!(grid.count(), 24);
        assert_eq!(grid.coord(0), point3(0, 0, 0));
        assert_eq!(grid.coord(1), point3(1, 0, 0));
        assert_eq!(grid.coord(3), point3(0, 1, 0));
        assert_eq!(grid.coord(12), point3(0, 0, 1));
        assert_eq!(grid.coord(23), point3(2, 3, 1));
        assert_eq!(grid.center(5), point3(2.0, 1.0, 0.0));
        assert_eq!(grid[Axis::Y], 4);
    }

    #[test]
    fn iteration_follows_nested_loops() {
        let grid = VoxelGrid::new([2, 3, 2]).unwrap();
        let expected: Vec<Point3u> = iproduct!(0..2, 0..3, 0..2)
            .map(|(z, y, x)| point3(x, y, z))
            .collect();
        let coords: Vec<Point3u> = grid.iter().map(|(_, p)| p).collect();
        assert_eq!(coords, expected);
    }

    proptest! {
        #[test]
        fn index_coord_bijection(nx in 1..8usize, ny in 1..8usize, nz in 1..8usize) {
            let grid = VoxelGrid::new([nx, ny, nz]).unwrap();
            let mut seen = vec![false; grid.count()];
            for (i, p) in grid.iter() {
                prop_assert!(p.x < nx && p.y < ny && p.z < nz);
                prop_assert_eq!(grid.index(&p), i);
                prop_assert!(!seen[i]);
                seen[i] = true;
            }
            prop_assert!(seen.into_iter().all(|s| s));
        }
    }
}
