//! Luminous Intensity

use super::pchip::Pchip;
use cosbos_core::cosbos::{Float, DEGREES_PER_RADIAN};
use cosbos_core::error::*;

/// Angles of the built-in table in degrees.
const VIVIA_7DR3_RGB_ANGLES: [Float; 19] = [
    0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0, 65.0, 70.0, 75.0,
    80.0, 85.0, 90.0,
];

/// Luminous intensities of the built-in table.
const VIVIA_7DR3_RGB_INTENSITIES: [Float; 19] = [
    509.0, 505.0, 456.0, 398.0, 333.0, 269.0, 203.0, 142.0, 91.0, 49.0, 15.0, 1.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0,
];

/// Luminous intensity of a fixture as a function of the angle to its normal,
/// sampled on a table and interpolated monotonically between samples.
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityProfile {
    /// Interpolant over angles in degrees.
    interpolant: Pchip,
}

impl IntensityProfile {
    /// Returns a new `IntensityProfile`.
    ///
    /// * `angles`      - Angles to the fixture normal in degrees, strictly
    ///                   increasing.
    /// * `intensities` - Luminous intensity at each angle.
    pub fn new(angles: Vec<Float>, intensities: Vec<Float>) -> Result<Self> {
        let interpolant = Pchip::new(angles, intensities)?;
        Ok(Self { interpolant })
    }

    /// Returns the profile of the Vivia 7DR3-RGB fixture.
    pub fn vivia_7dr3_rgb() -> Self {
        Self {
            interpolant: Pchip::from_valid_table(
                VIVIA_7DR3_RGB_ANGLES.to_vec(),
                VIVIA_7DR3_RGB_INTENSITIES.to_vec(),
            ),
        }
    }

    /// Returns the table angles in degrees.
    pub fn angles(&self) -> &[Float] {
        self.interpolant.nodes()
    }

    /// Returns the table intensities.
    pub fn intensities(&self) -> &[Float] {
        self.interpolant.values()
    }

    /// Returns the luminous intensity.
    ///
    /// * `theta` - Angle to the fixture normal in radians.
    pub fn intensity(&self, theta: Float) -> Float {
        self.interpolant.eval(theta * DEGREES_PER_RADIAN)
    }
}

impl Default for IntensityProfile {
    fn default() -> Self {
        Self::vivia_7dr3_rgb()
    }
}
