//! Floor Reflection

use super::intensity::IntensityProfile;
use cosbos_core::array_file::ArrayFile;
use cosbos_core::cosbos::Float;
use cosbos_core::error::*;
use cosbos_core::geometry::Point3f;
use cosbos_core::layout::Flattening;
use std::fmt;

/// How the floor scatters light towards the sensor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ReflectionModel {
    /// Only the geometric terms of the two legs.
    #[default]
    NonLambertian,

    /// Additional cosine falloff at the sensor.
    Lambertian,
}

impl fmt::Display for ReflectionModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NonLambertian => write!(f, "non-Lambertian"),
            Self::Lambertian => write!(f, "Lambertian"),
        }
    }
}

/// Contribution of each floor cell to the light a sensor receives from a
/// fixture by one bounce off the floor.
#[derive(Clone, Debug, PartialEq)]
pub struct ReflectionKernel {
    /// Number of floor cells along x and y.
    dim: [usize; 2],

    /// Kernel values, x fastest.
    values: Vec<Float>,
}

impl ReflectionKernel {
    /// Returns the number of floor cells along x and y.
    pub fn dim(&self) -> [usize; 2] {
        self.dim
    }

    /// Returns the value of a floor cell.
    ///
    /// * `x` - Zero based cell index along x.
    /// * `y` - Zero based cell index along y.
    pub fn get(&self, x: usize, y: usize) -> Float {
        self.values[Flattening::FirstFastest.offset2((x, y), (self.dim[0], self.dim[1]))]
    }

    /// Returns the values, x fastest.
    pub fn as_slice(&self) -> &[Float] {
        &self.values
    }

    /// Returns the kernel as an `nx x ny` array file.
    pub fn to_array(&self) -> ArrayFile {
        ArrayFile {
            order: Flattening::FirstFastest,
            extents: self.dim.to_vec(),
            data: self.values.clone(),
        }
    }
}

/// Computes the floor reflection kernel of a sensor-fixture pair. Floor cell
/// `(x, y)` sits at `(x + 1, y + 1, 0)`.
///
/// * `light`   - Fixture position; must lie above the floor.
/// * `sensor`  - Sensor position; must lie above the floor.
/// * `dim`     - Number of floor cells along x and y.
/// * `model`   - Reflection model.
/// * `profile` - Luminous intensity of the fixture.
pub fn reflection_kernel(
    light: &Point3f,
    sensor: &Point3f,
    dim: [usize; 2],
    model: ReflectionModel,
    profile: &IntensityProfile,
) -> Result<ReflectionKernel> {
    if dim.contains(&0) {
        return Err(Error::InvalidArgument(format!(
            "floor dimension must be positive, found {dim:?}"
        )));
    }
    for (name, p) in [("fixture", light), ("sensor", sensor)] {
        if !p.is_finite() || p.z <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "{name} must lie above the floor, found {p}"
            )));
        }
    }

    debug!("Computing {model} reflection kernel {}x{} ...", dim[0], dim[1]);

    let mut values = Vec::with_capacity(dim[0] * dim[1]);
    for y in 1..=dim[1] {
        for x in 1..=dim[0] {
            let (x, y) = (x as Float, y as Float);
            let d1_sq = (light.x - x).powi(2) + (light.y - y).powi(2);
            let d2_sq = (sensor.x - x).powi(2) + (sensor.y - y).powi(2);
            let dist1_sq = d1_sq + light.z * light.z;
            let dist2_sq = d2_sq + sensor.z * sensor.z;
            let cos1 = light.z / dist1_sq.sqrt();
            let cos2 = sensor.z / dist2_sq.sqrt();

            let intensity = profile.intensity(cos1.acos());
            let mut k = intensity * cos1 * cos2 / dist1_sq / dist2_sq;
            if model == ReflectionModel::Lambertian {
                k *= cos2;
            }
            values.push(k);
        }
    }

    Ok(ReflectionKernel { dim, values })
}
