//! # Vertex
//!
//! Full-attribute vertex as it flows into the mesh welder.

use glam::{DVec2, DVec3};

/// A mesh vertex with the attribute set the output format carries.
///
/// Lightmap coordinates and colors are zero at this stage of the pipeline;
/// they are filled by the lighting stages downstream of this kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: DVec3,
    pub normal: DVec3,
    pub uv: DVec2,
    pub lightmap_uv: DVec2,
    pub color: [f32; 4],
}

impl Vertex {
    /// Creates a vertex at `position` with all other attributes zeroed.
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            normal: DVec3::ZERO,
            uv: DVec2::ZERO,
            lightmap_uv: DVec2::ZERO,
            color: [0.0; 4],
        }
    }

    /// True if every coordinate of every attribute is finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.normal.is_finite()
            && self.uv.is_finite()
            && self.lightmap_uv.is_finite()
            && self.color.iter().all(|c| c.is_finite())
    }

    /// Linear interpolation of all attributes.
    pub fn lerp(&self, other: &Vertex, t: f64) -> Vertex {
        Vertex {
            position: self.position.lerp(other.position, t),
            normal: self.normal.lerp(other.normal, t),
            uv: self.uv.lerp(other.uv, t),
            lightmap_uv: self.lightmap_uv.lerp(other.lightmap_uv, t),
            color: [
                self.color[0] + (other.color[0] - self.color[0]) * t as f32,
                self.color[1] + (other.color[1] - self.color[1]) * t as f32,
                self.color[2] + (other.color[2] - self.color[2]) * t as f32,
                self.color[3] + (other.color[3] - self.color[3]) * t as f32,
            ],
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
