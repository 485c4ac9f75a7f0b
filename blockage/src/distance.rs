//! Distance from a point to the line through two points.
//!
//! The line is infinite: the projection parameter is never clamped to the
//! segment between the endpoints.

use cosbos_core::cosbos::{Float, DEGENERATE_LENGTH_SQUARED};
use cosbos_core::geometry::*;

/// Result of projecting a point onto a line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineProjection {
    /// Projection parameter; the foot of the perpendicular is
    /// `start + t * (end - start)`.
    pub t: Float,

    /// Squared distance from the point to the foot of the perpendicular.
    pub distance_squared: Float,
}

impl LineProjection {
    /// Returns the distance from the point to the line.
    pub fn distance(&self) -> Float {
        self.distance_squared.sqrt()
    }

    /// Returns true if the foot of the perpendicular lies between the
    /// endpoints. Informational only; the Gaussian weights always use the
    /// distance to the infinite line.
    pub fn on_segment(&self) -> bool {
        (0.0..=1.0).contains(&self.t)
    }
}

/// A line through two points with the quantities needed for repeated
/// projections precomputed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    /// First endpoint.
    origin: Point3f,

    /// Second endpoint minus the first.
    direction: Vector3f,

    /// Squared length of `direction`, or `DEGENERATE_LENGTH_SQUARED` when the
    /// endpoints coincide.
    length_squared: Float,
}

impl Line {
    /// Returns a new `Line`.
    ///
    /// * `start` - First endpoint.
    /// * `end`   - Second endpoint.
    pub fn new(start: Point3f, end: Point3f) -> Self {
        let direction = end - start;
        let length_squared = direction.length_squared();
        Self {
            origin: start,
            direction,
            length_squared: if length_squared == 0.0 {
                DEGENERATE_LENGTH_SQUARED
            } else {
                length_squared
            },
        }
    }

    /// Returns true if both endpoints coincide. The line then degenerates to
    /// its first endpoint.
    pub fn is_degenerate(&self) -> bool {
        self.direction.length_squared() == 0.0
    }

    /// Projects a point onto the line.
    ///
    /// * `p` - The point.
    #[inline]
    pub fn project(&self, p: &Point3f) -> LineProjection {
        let t = (*p - self.origin).dot(&self.direction) / self.length_squared;
        let foot = self.origin + self.direction * t;
        LineProjection {
            t,
            distance_squared: p.distance_squared(foot),
        }
    }

    /// Returns the squared distance from a point to the line.
    ///
    /// * `p` - The point.
    #[inline]
    pub fn distance_squared(&self, p: &Point3f) -> Float {
        self.project(p).distance_squared
    }

    /// Computes the squared distance of every point to the line.
    ///
    /// * `points` - The points.
    /// * `out`    - Receives one distance per point.
    pub fn distances_squared(&self, points: &[Point3f], out: &mut [Float]) {
        debug_assert_eq!(points.len(), out.len());
        for (d, p) in out.iter_mut().zip(points.iter()) {
            *d = self.distance_squared(p);
        }
    }
}

/// Projects a point onto the infinite line through `start` and `end`.
///
/// * `p`     - The point.
/// * `start` - First point on the line.
/// * `end`   - Second point on the line.
pub fn project_onto_line(p: &Point3f, start: &Point3f, end: &Point3f) -> LineProjection {
    Line::new(*start, *end).project(p)
}

/// Returns the squared distance from a point to the infinite line through
/// `start` and `end`.
///
/// * `p`     - The point.
/// * `start` - First point on the line.
/// * `end`   - Second point on the line.
pub fn distance_squared_to_line(p: &Point3f, start: &Point3f, end: &Point3f) -> Float {
    project_onto_line(p, start, end).distance_squared
}

/// Returns the distance from a point to the infinite line through `start` and
/// `end`.
///
/// * `p`     - The point.
/// * `start` - First point on the line.
/// * `end`   - Second point on the line.
pub fn distance_to_line(p: &Point3f, start: &Point3f, end: &Point3f) -> Float {
    distance_squared_to_line(p, start, end).sqrt()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
