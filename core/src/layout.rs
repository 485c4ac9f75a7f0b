//! Flattening conventions
//!
//! Every multi-dimensional array exchanged between the hash builder, the
//! reconstructor and external producers is stored flat. The order in which
//! indices are folded into a flat offset is part of the contract, so it is
//! named here instead of being left to an implicit reshape default.

use std::fmt;

/// Order in which a multi-dimensional index is folded into a flat offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Flattening {
    /// The first index varies fastest (column-major, Fortran order).
    FirstFastest,

    /// The last index varies fastest (row-major, C order).
    LastFastest,
}

/// Voxel linear index: x fastest, then y, then z.
pub const VOXEL_ORDER: Flattening = Flattening::FirstFastest;

/// Path linear index `j = s + l * N`: sensor fastest, then fixture.
pub const PATH_ORDER: Flattening = Flattening::FirstFastest;

/// Hash tensor offset `i + voxel_count * j`: voxel fastest, then path.
pub const HASH_ORDER: Flattening = Flattening::FirstFastest;

/// Observation matrix offset `sc + 4N * lc`: row fastest, then column.
pub const OBSERVATION_ORDER: Flattening = Flattening::FirstFastest;

/// Reconstructed volume: same axis order as the voxel grid.
pub const VOLUME_ORDER: Flattening = VOXEL_ORDER;

impl Flattening {
    /// Returns the flat offset of a 2-D index.
    ///
    /// * `index`   - The (first, second) index.
    /// * `extents` - The (first, second) extents.
    #[inline(always)]
    pub fn offset2(self, index: (usize, usize), extents: (usize, usize)) -> usize {
        debug_assert!(index.0 < extents.0 && index.1 < extents.1);
        match self {
            Flattening::FirstFastest => index.0 + extents.0 * index.1,
            Flattening::LastFastest => index.0 * extents.1 + index.1,
        }
    }

    /// Returns the 2-D index of a flat offset.
    ///
    /// * `offset`  - The flat offset.
    /// * `extents` - The (first, second) extents.
    #[inline(always)]
    pub fn split2(self, offset: usize, extents: (usize, usize)) -> (usize, usize) {
        debug_assert!(offset < extents.0 * extents.1);
        match self {
            Flattening::FirstFastest => (offset % extents.0, offset / extents.0),
            Flattening::LastFastest => (offset / extents.1, offset % extents.1),
        }
    }

    /// Returns the flat offset of a 3-D index.
    ///
    /// * `index`   - The (first, second, third) index.
    /// * `extents` - The extents along each axis.
    #[inline(always)]
    pub fn offset3(self, index: [usize; 3], extents: [usize; 3]) -> usize {
        debug_assert!((0..3).all(|a| index[a] < extents[a]));
        match self {
            Flattening::FirstFastest => index[0] + extents[0] * (index[1] + extents[1] * index[2]),
            Flattening::LastFastest => (index[0] * extents[1] + index[1]) * extents[2] + index[2],
        }
    }

    /// Returns the 3-D index of a flat offset.
    ///
    /// * `offset`  - The flat offset.
    /// * `extents` - The extents along each axis.
    #[inline(always)]
    pub fn split3(self, offset: usize, extents: [usize; 3]) -> [usize; 3] {
        debug_assert!(offset < extents.iter().product::<usize>());
        match self {
            Flattening::FirstFastest => {
                let mut a = offset;
                let x = a % extents[0];
                a /= extents[0];
                let y = a % extents[1];
                let z = a / extents[1];
                [x, y, z]
            }
            Flattening::LastFastest => {
                let mut a = offset;
                let z = a % extents[2];
                a /= extents[2];
                let y = a % extents[1];
                let x = a / extents[1];
                [x, y, z]
            }
        }
    }

    /// Re-lays a 2-D array stored in this order into `target` order.
    ///
    /// * `data`    - The flat array.
    /// * `extents` - The (first, second) extents.
    /// * `target`  - The required order.
    pub fn relayout2<T: Copy>(self, data: &[T], extents: (usize, usize), target: Flattening) -> Vec<T> {
        if self == target {
            return data.to_vec();
        }
        (0..data.len())
            .map(|offset| data[self.offset2(target.split2(offset, extents), extents)])
            .collect()
    }

    /// Returns the tag stored in array files.
    pub fn tag(self) -> u8 {
        match self {
            Flattening::FirstFastest => 0,
            Flattening::LastFastest => 1,
        }
    }

    /// Returns the flattening for an array file tag.
    ///
    /// * `tag` - The tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Flattening::FirstFastest),
            1 => Some(Flattening::LastFastest),
            _ => None,
        }
    }
}

impl fmt::Display for Flattening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flattening::FirstFastest => write!(f, "first-fastest"),
            Flattening::LastFastest => write!(f, "last-fastest"),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
