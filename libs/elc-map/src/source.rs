//! # Loader Input Model
//!
//! The data shape the external map loader hands to this kernel. Text
//! parsing of the source format is out of scope; these types are the
//! contract at that boundary.

use std::collections::BTreeMap;

use elc_geom::Plane;

use crate::material::UvProjection;

/// A whole map as produced by the loader.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    pub entities: Vec<SourceEntity>,
}

/// One source entity: classname, keyvalues, and zero or more brushes.
///
/// Point entities carry no brushes.
#[derive(Debug, Clone)]
pub struct SourceEntity {
    pub classname: String,
    pub keyvalues: BTreeMap<String, String>,
    pub brushes: Vec<SourceBrush>,
}

impl SourceEntity {
    /// A point entity with no brush geometry.
    pub fn point(classname: impl Into<String>) -> Self {
        Self {
            classname: classname.into(),
            keyvalues: BTreeMap::new(),
            brushes: Vec::new(),
        }
    }

    /// A brush entity.
    pub fn with_brushes(classname: impl Into<String>, brushes: Vec<SourceBrush>) -> Self {
        Self {
            classname: classname.into(),
            keyvalues: BTreeMap::new(),
            brushes,
        }
    }
}

/// One convex solid, defined by the planes of its sides.
#[derive(Debug, Clone)]
pub struct SourceBrush {
    pub sides: Vec<SourceSide>,
}

/// One half-space bounding a brush, with its surface attributes.
#[derive(Debug, Clone)]
pub struct SourceSide {
    /// Outward-facing plane; the solid is on the back side.
    pub plane: Plane,
    pub material: String,
    pub uv: UvProjection,
}

impl SourceSide {
    /// Side with a face-aligned default projection.
    pub fn new(plane: Plane, material: impl Into<String>) -> Self {
        Self {
            uv: UvProjection::face_aligned(&plane),
            plane,
            material: material.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_point_entity_has_no_brushes() {
        let e = SourceEntity::point("info_player_start");
        assert!(e.brushes.is_empty());
        assert_eq!(e.classname, "info_player_start");
    }

    #[test]
    fn test_side_defaults_to_face_aligned_projection() {
        let side = SourceSide::new(Plane::new(DVec3::Z, 0.0), "brick");
        assert!(side.uv.u_axis.dot(DVec3::Z).abs() < 1e-10);
    }
}
