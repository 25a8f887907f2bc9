//! # Polygon
//!
//! Convex polygon with CCW winding and derived plane.

use glam::DVec3;

use crate::error::GeomError;
use crate::plane::Plane;

// =============================================================================
// POLYGON
// =============================================================================

/// An ordered ring of points forming a convex polygon.
///
/// Winding is counter-clockwise viewed from the side the face normal
/// points to. The plane is derived from the points rather than stored, so
/// a translated polygon stays consistent for free.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<DVec3>,
}

impl Polygon {
    /// Creates a polygon from an ordered point ring.
    ///
    /// Validates the minimum point count, coordinate finiteness, and that
    /// consecutive points are distinct.
    pub fn new(points: Vec<DVec3>) -> Result<Self, GeomError> {
        if points.len() < 3 {
            return Err(GeomError::TooFewPoints {
                count: points.len(),
            });
        }
        for (index, p) in points.iter().enumerate() {
            if !p.is_finite() {
                return Err(GeomError::non_finite("polygon construction"));
            }
            let next = points[(index + 1) % points.len()];
            if *p == next {
                return Err(GeomError::CoincidentPoints { index });
            }
        }
        Ok(Self { points })
    }

    /// Constructs a large quadrilateral lying exactly on `plane`.
    ///
    /// `radius` is the half-extent of the quad and must exceed the map's
    /// maximum extent, so that clipping against a brush's other planes is
    /// the only thing shaping the final face. The basis is seeded from the
    /// plane's closest world axis and orthogonalized with cross products.
    pub fn base_quad(plane: &Plane, radius: f64) -> Polygon {
        let axis = plane.closest_axis();
        // A different world axis is never parallel to the normal
        let helper = if axis == DVec3::Z {
            DVec3::X
        } else if axis == DVec3::X {
            DVec3::Y
        } else {
            DVec3::Z
        };
        let right = helper.cross(plane.normal).normalize();
        let up = plane.normal.cross(right);

        let center = plane.normal * plane.distance;
        let (r, u) = (right * radius, up * radius);
        Polygon {
            points: vec![center - r - u, center + r - u, center + r + u, center - r + u],
        }
    }

    /// The ordered point ring.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Number of points in the ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The plane through the polygon's leading points.
    ///
    /// Falls back to later point triples when the leading ones are
    /// collinear within tolerance.
    pub fn plane(&self) -> Option<Plane> {
        let n = self.points.len();
        for i in 0..n - 2 {
            if let Some(plane) =
                Plane::from_points(self.points[i], self.points[i + 1], self.points[i + 2])
            {
                return Some(plane);
            }
        }
        None
    }

    /// Arithmetic mean of the points.
    pub fn center(&self) -> DVec3 {
        self.points.iter().sum::<DVec3>() / self.points.len() as f64
    }

    /// Polygon area via the cross-product sum.
    pub fn area(&self) -> f64 {
        let mut acc = DVec3::ZERO;
        for i in 0..self.points.len() {
            let j = (i + 1) % self.points.len();
            acc += self.points[i].cross(self.points[j]);
        }
        acc.length() * 0.5
    }

    /// Translates every point by `offset`.
    pub fn translate(&mut self, offset: DVec3) {
        for p in &mut self.points {
            *p += offset;
        }
    }

    /// True if every point is finite.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.is_finite())
    }
}

// =============================================================================
// TESTS
// =============================================================================
