//! Common

use num_traits::Num;

/// Use 64-bit precision for floating point numbers. The hash tensor is
/// exchanged as float64 so everything downstream stays in `f64`.
pub type Float = f64;

/// PI (π)
pub const PI: Float = std::f64::consts::PI;

/// Conversion factor from radians to degrees.
pub const DEGREES_PER_RADIAN: Float = 180.0 / PI;

/// Squared length substituted for a zero length sensor-fixture segment when
/// computing the projection parameter.
pub const DEGENERATE_LENGTH_SQUARED: Float = 1e-10;

/// Clamps a value x to [low, high].
///
/// * `x`    - The number to clamp.
/// * `low`  - Minimum value.
/// * `high` - Maximum value.
#[inline(always)]
pub fn clamp<T>(x: T, low: T, high: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if x < low {
        low
    } else if x > high {
        high
    } else {
        x
    }
}

/// Returns the product of a slice of extents, or 0 for an empty slice.
///
/// * `extents` - The extents.
#[inline(always)]
pub fn product(extents: &[usize]) -> usize {
    if extents.is_empty() {
        0
    } else {
        extents.iter().product()
    }
}

/// Emulates the behavior of `upper_bound` but uses a function object to get
/// values at various indices instead of requiring access to an actual array.
/// The result is the index `i` of the interval `[i, i + 1]` bracketing the
/// queried value, clamped to `[0, size - 2]`.
///
/// * `size` - Size of array (at least 2).
/// * `pred` - Function that returns true while the value at an index is at or
///            below the queried value.
pub fn find_interval<Predicate>(size: usize, pred: Predicate) -> usize
where
    Predicate: Fn(usize) -> bool,
{
    debug_assert!(size >= 2);
    let (mut first, mut len) = (0, size);

    while len > 0 {
        let half = len >> 1;
        let middle = first + half;

        // Bisect range based on value of `pred` at `middle`.
        if pred(middle) {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }

    clamp(first.saturating_sub(1), 0, size - 2)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
