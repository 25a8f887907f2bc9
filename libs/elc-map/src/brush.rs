//! # Brush Builder
//!
//! Derives a brush's convex face polygons by intersecting its defining
//! half-space planes.

use glam::DVec3;

use config::constants::{Tolerances, MAX_MAP_EXTENT, MIN_BRUSH_FACES};
use elc_geom::{clip, Aabb, ClipResult, GeomError, Polygon};

use crate::error::MapError;
use crate::face::Face;
use crate::material::MaterialProvider;
use crate::source::{SourceBrush, SourceSide};

// =============================================================================
// BRUSH
// =============================================================================

/// A convex solid as a list of carved faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    faces: Vec<Face>,
}

impl Brush {
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Surrenders the faces for flattening into an entity.
    pub fn into_faces(self) -> Vec<Face> {
        self.faces
    }

    /// Mean of the face centers.
    pub fn centroid(&self) -> DVec3 {
        let sum: DVec3 = self.faces.iter().map(Face::center).sum();
        sum / self.faces.len() as f64
    }

    /// Axis-aligned bounds over every face point.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(
            self.faces
                .iter()
                .flat_map(|f| f.polygon().points().iter().copied()),
        )
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Carves the face polygons of one brush.
///
/// For every side, a map-sized quadrilateral is laid on the side's plane
/// and clipped against every *other* plane of the brush, keeping the back
/// (inside) fragment. Sibling planes are visited in ascending original
/// index so the result is deterministic regardless of platform.
///
/// A side whose polygon is clipped away entirely simply does not bound a
/// face of this convex combination; that is expected. A brush retaining
/// fewer than four faces is not a solid and is reported as degenerate.
pub fn build_brush(
    brush_index: usize,
    source: &SourceBrush,
    provider: &dyn MaterialProvider,
    tolerances: &Tolerances,
) -> Result<Brush, MapError> {
    let sides = &source.sides;
    let mut faces = Vec::with_capacity(sides.len());

    for (i, side) in sides.iter().enumerate() {
        let carved = carve_side(i, sides, tolerances)
            .map_err(|e| MapError::geometry(brush_index, e))?;
        let Some(polygon) = carved else {
            continue;
        };

        let material = provider.resolve(&side.material);
        faces.push(Face::new(polygon, material, side.uv.clone(), side.plane));
    }

    if faces.len() < MIN_BRUSH_FACES {
        return Err(MapError::DegenerateBrush {
            brush_index,
            faces: faces.len(),
        });
    }

    Ok(Brush { faces })
}

/// Clips side `i`'s base quadrilateral against every sibling plane,
/// keeping the inside fragment. `None` means the side bounds no face of
/// this convex combination.
fn carve_side(
    i: usize,
    sides: &[SourceSide],
    tolerances: &Tolerances,
) -> Result<Option<Polygon>, GeomError> {
    let mut running = Polygon::base_quad(&sides[i].plane, MAX_MAP_EXTENT);
    for (j, other) in sides.iter().enumerate() {
        if j == i {
            continue;
        }
        running = match clip(running, &other.plane, tolerances)? {
            ClipResult::Back(poly) | ClipResult::CoplanarBack(poly) => poly,
            ClipResult::Split { back, .. } => back,
            // Entirely outside the half-space: no face here
            ClipResult::Front(_) => return Ok(None),
            // Duplicate plane: the lower-indexed side keeps the face
            ClipResult::CoplanarFront(poly) => {
                if i < j {
                    poly
                } else {
                    return Ok(None);
                }
            }
        };
    }
    Ok(Some(running))
}

// =============================================================================
// TESTS
// =============================================================================
