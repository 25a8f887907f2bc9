//! # Axis-Aligned Bounds
//!
//! Bounding box accumulation for brushes, entities and surfaces.

use glam::DVec3;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Creates a bounding box from corner points, correcting a swapped pair.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// An inverted box that any expansion will overwrite.
    pub fn empty() -> Self {
        Self {
            min: DVec3::splat(f64::INFINITY),
            max: DVec3::splat(f64::NEG_INFINITY),
        }
    }

    /// A box of ±`half_extent` around the origin.
    pub fn seeded(half_extent: f64) -> Self {
        Self {
            min: DVec3::splat(-half_extent),
            max: DVec3::splat(half_extent),
        }
    }

    /// True if no point has been accumulated yet.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Accumulates all `points` into a fresh box.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand_to_include(p);
        }
        aabb
    }

    /// Grows the box to contain `point`.
    pub fn expand_to_include(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grows the box to contain `other`.
    pub fn expand_to_include_box(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// The eight corner points of the box.
    pub fn corners(&self) -> [DVec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            DVec3::new(min.x, min.y, min.z),
            DVec3::new(max.x, min.y, min.z),
            DVec3::new(max.x, max.y, min.z),
            DVec3::new(min.x, max.y, min.z),
            DVec3::new(min.x, min.y, max.z),
            DVec3::new(max.x, min.y, max.z),
            DVec3::new(max.x, max.y, max.z),
            DVec3::new(min.x, max.y, max.z),
        ]
    }

    /// Returns this box translated by `offset`.
    pub fn translated(&self, offset: DVec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Center point of the box.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent of the box along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_corrects_swapped_corners() {
        let aabb = Aabb::new(DVec3::new(1.0, -2.0, 3.0), DVec3::new(-1.0, 2.0, 0.0));
        assert_eq!(aabb.min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_empty_then_expand() {
        let mut aabb = Aabb::empty();
        assert!(aabb.is_empty());
        aabb.expand_to_include(DVec3::new(1.0, 2.0, 3.0));
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, aabb.max);
    }

    #[test]
    fn test_from_points() {
        let aabb = Aabb::from_points([
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 5.0, 3.0),
            DVec3::new(-2.0, 8.0, 1.0),
        ]);
        assert_eq!(aabb.min, DVec3::new(-2.0, 0.0, 0.0));
        assert_eq!(aabb.max, DVec3::new(10.0, 8.0, 3.0));
    }

    #[test]
    fn test_corners_count_and_extremes() {
        let aabb = Aabb::new(DVec3::splat(-1.0), DVec3::splat(1.0));
        let corners = aabb.corners();
        assert_eq!(corners.len(), 8);
        assert!(corners.contains(&DVec3::new(-1.0, -1.0, -1.0)));
        assert!(corners.contains(&DVec3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_seeded_is_symmetric() {
        let aabb = Aabb::seeded(1.0);
        assert_eq!(aabb.center(), DVec3::ZERO);
        assert_eq!(aabb.size(), DVec3::splat(2.0));
    }

    #[test]
    fn test_translated() {
        let aabb = Aabb::new(DVec3::ZERO, DVec3::splat(1.0)).translated(DVec3::new(5.0, 0.0, 0.0));
        assert_eq!(aabb.min, DVec3::new(5.0, 0.0, 0.0));
        assert_eq!(aabb.max, DVec3::new(6.0, 1.0, 1.0));
    }
}
