//! # Face
//!
//! A brush face: the carved polygon plus its surface attributes.

use glam::{DVec2, DVec3};

use elc_geom::{Plane, Polygon, Vertex};

use crate::material::{Material, UvProjection};

/// One face of a brush.
///
/// Owns the carved polygon, the resolved material, the UV projection from
/// the source side, and the generating plane. Created once per surviving
/// brush side, translated in place during origin fix-up, and read by the
/// mesh stage afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    polygon: Polygon,
    material: Material,
    uv: UvProjection,
    plane: Plane,
}

impl Face {
    pub fn new(polygon: Polygon, material: Material, uv: UvProjection, plane: Plane) -> Self {
        Self {
            polygon,
            material,
            uv,
            plane,
        }
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Arithmetic mean of the face polygon's points.
    pub fn center(&self) -> DVec3 {
        self.polygon.center()
    }

    /// Translates the face, keeping polygon and plane consistent.
    pub fn translate(&mut self, offset: DVec3) {
        self.polygon.translate(offset);
        self.plane = self.plane.translated(offset);
    }

    /// Emits one full-attribute vertex per polygon point.
    ///
    /// Normals come from the generating plane, UVs from the projection;
    /// lightmap coordinates and colors stay zero at this stage.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygon
            .points()
            .iter()
            .map(|&position| Vertex {
                position,
                normal: self.plane.normal,
                uv: self
                    .uv
                    .project(position, self.material.width, self.material.height),
                lightmap_uv: DVec2::ZERO,
                color: [0.0; 4],
            })
            .collect()
    }

    /// Fans the convex polygon into triangles `(0, i-1, i)`.
    pub fn triangles(&self) -> Vec<[Vertex; 3]> {
        let vertices = self.vertices();
        (2..vertices.len())
            .map(|i| [vertices[0], vertices[i - 1], vertices[i]])
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
