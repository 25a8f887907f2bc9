//! # Plane
//!
//! Half-space primitive with signed distance and epsilon classification.

use glam::DVec3;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Side of a plane a point lies on, within a classification epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSide {
    /// Point is strictly in front of the plane (positive side).
    Front,
    /// Point is strictly behind the plane (negative side).
    Back,
    /// Point is on the plane within the epsilon band.
    On,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane in 3D space defined by a unit normal and distance from origin.
///
/// Immutable once constructed. The signed distance of a point is
/// `normal.dot(point) - distance`: positive in front, negative behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (unit length).
    pub normal: DVec3,
    /// Distance from origin along the normal.
    pub distance: f64,
}

impl Plane {
    /// Creates a plane from a unit normal and distance.
    pub fn new(normal: DVec3, distance: f64) -> Self {
        Self { normal, distance }
    }

    /// Creates a plane through three points.
    ///
    /// Points should wind counter-clockwise when viewed from the front.
    /// Returns `None` for collinear points.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let cross = (b - a).cross(c - a);
        if cross.length() < 1e-10 {
            return None;
        }
        let normal = cross.normalize();
        Some(Self {
            normal,
            distance: normal.dot(a),
        })
    }

    /// Signed distance from a point to this plane.
    ///
    /// Positive = front, negative = back, zero = on plane.
    #[inline]
    pub fn distance_to(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    /// Classifies a point against this plane within `epsilon`.
    pub fn classify_point(&self, point: DVec3, epsilon: f64) -> PointSide {
        let dist = self.distance_to(point);
        if dist > epsilon {
            PointSide::Front
        } else if dist < -epsilon {
            PointSide::Back
        } else {
            PointSide::On
        }
    }

    /// Returns the world axis this plane's normal is most aligned with.
    ///
    /// Axes are right = +X, up = +Y, forward = +Z; ties are broken
    /// forward > right > up. Used to seed the basis when constructing a
    /// full-size polygon on an arbitrary plane.
    pub fn closest_axis(&self) -> DVec3 {
        let ax = self.normal.x.abs();
        let ay = self.normal.y.abs();
        let az = self.normal.z.abs();
        if az >= ax && az >= ay {
            DVec3::Z
        } else if ax >= ay {
            DVec3::X
        } else {
            DVec3::Y
        }
    }

    /// Returns this plane translated by `offset`.
    ///
    /// The normal is unchanged; only the distance moves.
    pub fn translated(&self, offset: DVec3) -> Plane {
        Plane {
            normal: self.normal,
            distance: self.distance + self.normal.dot(offset),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
