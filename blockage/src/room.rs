//! Room geometry: sensors, fixtures, voxel grid and the paths between them.

use cosbos_core::cosbos::Float;
use cosbos_core::error::*;
use cosbos_core::geometry::*;
use cosbos_core::grid::VoxelGrid;
use cosbos_core::layout::PATH_ORDER;

/// One light path from a fixture to a sensor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path {
    /// Sensor index.
    pub sensor: usize,

    /// Fixture index.
    pub fixture: usize,
}

/// The set of all `N * M` paths. Paths are numbered `j = s + l * N` with the
/// sensor index varying fastest.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PathSet {
    /// Number of sensors `N`.
    n_sensors: usize,

    /// Number of fixtures `M`.
    n_fixtures: usize,
}

impl PathSet {
    /// Returns a new `PathSet`.
    ///
    /// * `n_sensors`  - Number of sensors; must be positive.
    /// * `n_fixtures` - Number of fixtures; must be positive.
    pub fn new(n_sensors: usize, n_fixtures: usize) -> Result<Self> {
        if n_sensors == 0 {
            return Err(Error::InvalidArgument("at least one sensor is required".to_string()));
        }
        if n_fixtures == 0 {
            return Err(Error::InvalidArgument("at least one fixture is required".to_string()));
        }
        n_sensors.checked_mul(n_fixtures).ok_or_else(|| {
            Error::InvalidArgument(format!("{n_sensors} sensors x {n_fixtures} fixtures is too large"))
        })?;
        Ok(Self { n_sensors, n_fixtures })
    }

    /// Returns the number of sensors.
    pub fn n_sensors(&self) -> usize {
        self.n_sensors
    }

    /// Returns the number of fixtures.
    pub fn n_fixtures(&self) -> usize {
        self.n_fixtures
    }

    /// Returns the number of paths.
    pub fn count(&self) -> usize {
        self.n_sensors * self.n_fixtures
    }

    /// Returns `[N, M]`.
    pub fn extents(&self) -> [usize; 2] {
        [self.n_sensors, self.n_fixtures]
    }

    /// Fails with an `Error::ExtentsMismatch` naming both `[N, M]` pairs
    /// unless `other` has the same sensors and fixtures.
    ///
    /// * `what`  - Name of the array `other` belongs to.
    /// * `other` - The paths to compare with.
    pub fn check_matches(&self, what: &'static str, other: &PathSet) -> Result<()> {
        check_extents(what, &self.extents(), &other.extents())
    }

    /// Returns the linear index of a path.
    ///
    /// * `path` - The path.
    pub fn index(&self, path: Path) -> usize {
        PATH_ORDER.offset2((path.sensor, path.fixture), (self.n_sensors, self.n_fixtures))
    }

    /// Returns the path with the given linear index.
    ///
    /// * `j` - Linear index of the path.
    pub fn path(&self, j: usize) -> Path {
        let (sensor, fixture) = PATH_ORDER.split2(j, (self.n_sensors, self.n_fixtures));
        Path { sensor, fixture }
    }

    /// Returns an iterator over all paths in linear index order.
    pub fn iter(&self) -> impl Iterator<Item = Path> + '_ {
        (0..self.count()).map(move |j| self.path(j))
    }
}

/// Sensor and fixture positions together with the voxel grid of the room.
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    /// Sensor positions.
    sensors: Vec<Point3f>,

    /// Fixture positions.
    fixtures: Vec<Point3f>,

    /// Voxel grid.
    grid: VoxelGrid,

    /// Paths between sensors and fixtures.
    paths: PathSet,
}

impl Room {
    /// Returns a new `Room`.
    ///
    /// * `sensors`  - Sensor positions; at least one.
    /// * `fixtures` - Fixture positions; at least one.
    /// * `grid`     - Voxel grid.
    pub fn new(sensors: Vec<Point3f>, fixtures: Vec<Point3f>, grid: VoxelGrid) -> Result<Self> {
        let paths = PathSet::new(sensors.len(), fixtures.len())?;
        check_finite("sensor", &sensors)?;
        check_finite("fixture", &fixtures)?;
        Ok(Self {
            sensors,
            fixtures,
            grid,
            paths,
        })
    }

    /// Returns a new `Room` from `[x, y, z]` rows and grid extents.
    ///
    /// * `sensors`  - Sensor positions.
    /// * `fixtures` - Fixture positions.
    /// * `dim`      - Grid extents.
    pub fn from_rows(sensors: &[[Float; 3]], fixtures: &[[Float; 3]], dim: [usize; 3]) -> Result<Self> {
        Self::new(
            sensors.iter().copied().map(Point3f::from).collect(),
            fixtures.iter().copied().map(Point3f::from).collect(),
            VoxelGrid::new(dim)?,
        )
    }

    /// Returns the sensor positions.
    pub fn sensors(&self) -> &[Point3f] {
        &self.sensors
    }

    /// Returns the fixture positions.
    pub fn fixtures(&self) -> &[Point3f] {
        &self.fixtures
    }

    /// Returns the voxel grid.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Returns the paths.
    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    /// Returns the (sensor, fixture) endpoints of a path.
    ///
    /// * `path` - The path.
    pub fn endpoints(&self, path: Path) -> (Point3f, Point3f) {
        (self.sensors[path.sensor], self.fixtures[path.fixture])
    }
}

/// Returns an error naming the first point with a non-finite coordinate.
///
/// * `what`   - Kind of point.
/// * `points` - The points.
fn check_finite(what: &str, points: &[Point3f]) -> Result<()> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(i) => Err(Error::InvalidArgument(format!(
            "{what} {i} has a non-finite coordinate {}",
            points[i]
        ))),
        None => Ok(()),
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sensor_index_varies_fastest() {
        let paths = PathSet::new(3, 2).unwrap();
        assert_eq!(paths.count(), 6);
        let order: Vec<(usize, usize)> = paths.iter().map(|p| (p.sensor, p.fixture)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(paths.index(Path { sensor: 1, fixture: 1 }), 4);
    }

    #[test]
    fn path_mismatch_names_sensors_and_fixtures() {
        let room_paths = PathSet::new(2, 2).unwrap();
        let other = PathSet::new(1, 4).unwrap();
        assert_eq!(other.count(), room_paths.count());
        let err = room_paths.check_matches("observation matrix paths", &other).unwrap_err();
        assert_eq!(
            err.to_string(),
            "extents mismatch for observation matrix paths: expected [2, 2], found [1, 4]"
        );
        assert!(room_paths.check_matches("observation matrix paths", &room_paths).is_ok());
    }

    #[test]
    fn rejects_empty_sets() {
        assert!(matches!(PathSet::new(0, 2), Err(Error::InvalidArgument(_))));
        assert!(matches!(PathSet::new(2, 0), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            Room::from_rows(&[], &[[0.0, 0.0, 10.0]], [3, 3, 3]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_bad_grid_and_coordinates() {
        assert!(matches!(
            Room::from_rows(&[[0.0; 3]], &[[0.0, 0.0, 10.0]], [3, 0, 3]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Room::from_rows(&[[0.0, Float::NAN, 0.0]], &[[0.0, 0.0, 10.0]], [3, 3, 3]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn endpoints() {
        let room = Room::from_rows(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
            &[[0.0, 0.0, 10.0]],
            [2, 2, 2],
        )
        .unwrap();
        let path = room.paths().path(1);
        assert_eq!(path, Path { sensor: 1, fixture: 0 });
        assert_eq!(room.endpoints(path), (point3(1.0, 0.0, 0.0), point3(0.0, 0.0, 10.0)));
    }

    proptest! {
        #[test]
        fn index_path_bijection(n in 1..10usize, m in 1..10usize) {
            let paths = PathSet::new(n, m).unwrap();
            for j in 0..paths.count() {
                let path = paths.path(j);
                prop_assert_eq!(j, path.sensor + path.fixture * n);
                prop_assert_eq!(paths.index(path), j);
            }
        }
    }
}
