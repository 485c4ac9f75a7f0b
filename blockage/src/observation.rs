//! Observation matrix and per-path losses.

use super::room::PathSet;
use cosbos_core::array_file::ArrayFile;
use cosbos_core::cosbos::Float;
use cosbos_core::error::*;
use cosbos_core::layout::{Flattening, OBSERVATION_ORDER};

/// Rows of the observation matrix per sensor (color channels of a sensor).
pub const SENSOR_CHANNELS: usize = 4;

/// Columns of the observation matrix per fixture (color channels of a
/// fixture).
pub const FIXTURE_CHANNELS: usize = 3;

/// Number of channel pairs aggregated into a path's loss. The fourth sensor
/// channel has no matching fixture channel and is never read.
pub const MATCHED_CHANNELS: usize = 3;

/// A `4N x 3M` observation (residual) matrix `E`, stored with the row index
/// varying fastest: `data[sc + 4N * lc]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservationMatrix {
    /// Paths the matrix was measured for.
    paths: PathSet,

    /// The entries.
    data: Vec<Float>,
}

impl ObservationMatrix {
    /// Returns a new `ObservationMatrix` from entries stored row fastest.
    ///
    /// * `paths` - Paths the matrix was measured for.
    /// * `data`  - The `4N * 3M` entries.
    pub fn new(paths: PathSet, data: Vec<Float>) -> Result<Self> {
        Self::with_order(paths, data, OBSERVATION_ORDER)
    }

    /// Returns a new `ObservationMatrix` from entries stored in the given
    /// order. Row-major input is re-laid into the canonical order.
    ///
    /// * `paths` - Paths the matrix was measured for.
    /// * `data`  - The `4N * 3M` entries.
    /// * `order` - Order of `data`.
    pub fn with_order(paths: PathSet, data: Vec<Float>, order: Flattening) -> Result<Self> {
        let extents = extents(&paths);
        check_len("observation matrix", extents.0 * extents.1, data.len())?;
        let data = if order == OBSERVATION_ORDER {
            data
        } else {
            order.relayout2(&data, extents, OBSERVATION_ORDER)
        };
        Ok(Self { paths, data })
    }

    /// Returns a new `ObservationMatrix` from an array file holding a
    /// `4N x 3M` matrix in either order.
    ///
    /// * `paths` - Paths the matrix was measured for.
    /// * `array` - The array.
    pub fn from_array(paths: PathSet, array: ArrayFile) -> Result<Self> {
        let (rows, cols) = extents(&paths);
        check_extents("observation matrix", &[rows, cols], &array.extents)?;
        Self::with_order(paths, array.data, array.order)
    }

    /// Returns the paths.
    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    /// Returns the number of rows, `4N`.
    pub fn rows(&self) -> usize {
        SENSOR_CHANNELS * self.paths.n_sensors()
    }

    /// Returns the number of columns, `3M`.
    pub fn cols(&self) -> usize {
        FIXTURE_CHANNELS * self.paths.n_fixtures()
    }

    /// Returns `E[row, col]`.
    ///
    /// * `row` - Row index `sc`.
    /// * `col` - Column index `lc`.
    pub fn get(&self, row: usize, col: usize) -> Float {
        self.data[OBSERVATION_ORDER.offset2((row, col), (self.rows(), self.cols()))]
    }

    /// Returns the entries, row index fastest.
    pub fn as_slice(&self) -> &[Float] {
        &self.data
    }

    /// Aggregates the matrix into one loss per path:
    /// `L[s + l * N] = sum_{r < 3} E[4s + r, 3l + r]`.
    pub fn path_losses(&self) -> Vec<Float> {
        info!("Constructing matrix L ...");
        self.paths
            .iter()
            .map(|path| {
                (0..MATCHED_CHANNELS).fold(0.0, |loss, r| {
                    loss + self.get(
                        SENSOR_CHANNELS * path.sensor + r,
                        FIXTURE_CHANNELS * path.fixture + r,
                    )
                })
            })
            .collect()
    }
}

/// Returns the (rows, columns) of the observation matrix for a path set.
///
/// * `paths` - The paths.
fn extents(paths: &PathSet) -> (usize, usize) {
    (
        SENSOR_CHANNELS * paths.n_sensors(),
        FIXTURE_CHANNELS * paths.n_fixtures(),
    )
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// `E[sc, lc] = sc * 100 + lc` for N = 2, M = 2, stored row fastest.
    fn pattern() -> ObservationMatrix {
        let paths = PathSet::new(2, 2).unwrap();
        let data: Vec<Float> = (0..8 * 6)
            .map(|i| {
                let (sc, lc) = (i % 8, i / 8);
                (sc * 100 + lc) as Float
            })
            .collect();
        ObservationMatrix::new(paths, data).unwrap()
    }

    #[test]
    fn aggregates_block_diagonals() {
        let e = pattern();
        assert_eq!(e.rows(), 8);
        assert_eq!(e.cols(), 6);
        assert_eq!(e.get(5, 4), 504.0);

        // j = s + 2l.
        // (0,0): E[0,0] + E[1,1] + E[2,2] = 0 + 101 + 202
        // (1,0): E[4,0] + E[5,1] + E[6,2] = 400 + 501 + 602
        // (0,1): E[0,3] + E[1,4] + E[2,5] = 3 + 104 + 205
        // (1,1): E[4,3] + E[5,4] + E[6,5] = 403 + 504 + 605
        assert_eq!(e.path_losses(), vec![303.0, 1503.0, 312.0, 1512.0]);
    }

    #[test]
    fn fourth_sensor_channel_is_ignored() {
        let paths = PathSet::new(2, 2).unwrap();
        let data: Vec<Float> = (0..48)
            .map(|i| if (i % 8) % 4 == 3 { 1e6 } else { 0.0 })
            .collect();
        let e = ObservationMatrix::new(paths, data).unwrap();
        assert_eq!(e.path_losses(), vec![0.0; 4]);
    }

    #[test]
    fn row_major_input_is_relaid() {
        let e = pattern();
        let paths = *e.paths();
        let row_major: Vec<Float> = (0..48)
            .map(|i| {
                let (sc, lc) = (i / 6, i % 6);
                (sc * 100 + lc) as Float
            })
            .collect();
        let relaid = ObservationMatrix::with_order(paths, row_major, Flattening::LastFastest).unwrap();
        assert_eq!(relaid, e);
    }

    #[test]
    fn rejects_wrong_length() {
        let paths = PathSet::new(2, 3).unwrap();
        match ObservationMatrix::new(paths, vec![0.0; 71]) {
            Err(Error::ShapeMismatch { what, expected, found }) => {
                assert_eq!(what, "observation matrix");
                assert_eq!(expected, 72);
                assert_eq!(found, 71);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn from_array_checks_extents() {
        let e = pattern();
        let paths = *e.paths();
        let array = ArrayFile::new(Flattening::FirstFastest, vec![8, 6], e.as_slice().to_vec()).unwrap();
        assert_eq!(ObservationMatrix::from_array(paths, array).unwrap(), e);

        let transposed = ArrayFile::new(Flattening::FirstFastest, vec![6, 8], e.as_slice().to_vec()).unwrap();
        let err = ObservationMatrix::from_array(paths, transposed).unwrap_err();
        assert_eq!(
            err.to_string(),
            "extents mismatch for observation matrix: expected [8, 6], found [6, 8]"
        );
    }
}
