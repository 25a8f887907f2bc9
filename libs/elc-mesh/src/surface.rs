//! # Surface Welder
//!
//! Builds an indexed render surface from a triangulated face stream,
//! deduplicating vertices within tolerance and dropping triangles that
//! collapse under index remapping.

use glam::{DVec2, DVec3};
use log::debug;

use config::constants::Tolerances;
use elc_geom::{Aabb, Vertex};

use crate::document::{BoundsRecord, RenderSurface};
use crate::error::CompileError;

// =============================================================================
// WELD STATS
// =============================================================================

/// Counters for one weld pass, aggregated per compile for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeldStats {
    /// Vertices that reused an existing index instead of appending.
    pub welded_vertices: usize,
    /// Triangles dropped because remapping collapsed their indices.
    pub dropped_triangles: usize,
}

impl WeldStats {
    /// Accumulates another pass's counters into this one.
    pub fn merge(&mut self, other: WeldStats) {
        self.welded_vertices += other.welded_vertices;
        self.dropped_triangles += other.dropped_triangles;
    }
}

// =============================================================================
// SURFACE BUILDER
// =============================================================================

/// Accumulates welded geometry for a single material.
///
/// Welding is a first-match linear scan: each candidate vertex reuses the
/// first existing vertex matching within tolerance, otherwise appends.
/// This is order-dependent and not globally optimal, and is kept that way
/// for output compatibility with the reference compiler.
#[derive(Debug, Clone)]
pub struct SurfaceBuilder {
    material: String,
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    uvs: Vec<DVec2>,
    lightmap_uvs: Vec<DVec2>,
    colors: Vec<[f32; 4]>,
    indices: Vec<u32>,
    stats: WeldStats,
}

impl SurfaceBuilder {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            lightmap_uvs: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
            stats: WeldStats::default(),
        }
    }

    #[inline]
    pub fn material(&self) -> &str {
        &self.material
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// True if no triangle survived so far.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Reconstructs the welded vertex at `index`.
    pub fn vertex(&self, index: usize) -> Vertex {
        Vertex {
            position: self.positions[index],
            normal: self.normals[index],
            uv: self.uvs[index],
            lightmap_uv: self.lightmap_uvs[index],
            color: self.colors[index],
        }
    }

    /// Welds one triangle into the surface.
    ///
    /// A triangle whose three remapped indices are not pairwise distinct
    /// is degenerate and dropped with a diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::NonFiniteGeometry`] if any vertex carries
    /// NaN or infinite data.
    pub fn add_triangle(
        &mut self,
        triangle: &[Vertex; 3],
        tolerances: &Tolerances,
    ) -> Result<(), CompileError> {
        for vertex in triangle {
            if !vertex.is_finite() {
                return Err(CompileError::non_finite(self.material.clone()));
            }
        }

        let a = self.weld(&triangle[0], tolerances);
        let b = self.weld(&triangle[1], tolerances);
        let c = self.weld(&triangle[2], tolerances);

        if a == b || b == c || a == c {
            self.stats.dropped_triangles += 1;
            debug!(
                "dropping degenerate triangle ({a}, {b}, {c}) in material `{}`",
                self.material
            );
            return Ok(());
        }
        self.indices.extend([a, b, c]);
        Ok(())
    }

    /// First-match weld: reuse an existing index or append a new vertex.
    fn weld(&mut self, vertex: &Vertex, tolerances: &Tolerances) -> u32 {
        for i in 0..self.positions.len() {
            if self.matches(i, vertex, tolerances) {
                self.stats.welded_vertices += 1;
                return i as u32;
            }
        }
        let index = self.positions.len() as u32;
        self.positions.push(vertex.position);
        self.normals.push(vertex.normal);
        self.uvs.push(vertex.uv);
        self.lightmap_uvs.push(vertex.lightmap_uv);
        self.colors.push(vertex.color);
        index
    }

    fn matches(&self, i: usize, vertex: &Vertex, tolerances: &Tolerances) -> bool {
        let r = tolerances.weld_radius;
        self.positions[i].distance_squared(vertex.position) <= r * r
            && (self.normals[i] - vertex.normal).abs().max_element()
                <= tolerances.normal_weld_tolerance
            && (self.uvs[i] - vertex.uv).abs().max_element() <= tolerances.uv_weld_tolerance
            && (self.lightmap_uvs[i] - vertex.lightmap_uv).abs().max_element()
                <= tolerances.uv_weld_tolerance
            && self.colors[i] == vertex.color
    }

    /// Exports the surface and surrenders the weld counters.
    pub fn finish(self) -> (RenderSurface, WeldStats) {
        let bounds = Aabb::from_points(self.positions.iter().copied());

        let mut positions = Vec::with_capacity(self.positions.len() * 3);
        let mut normals = Vec::with_capacity(self.normals.len() * 3);
        for (p, n) in self.positions.iter().zip(&self.normals) {
            positions.extend([p.x as f32, p.y as f32, p.z as f32]);
            normals.extend([n.x as f32, n.y as f32, n.z as f32]);
        }
        let mut uvs = Vec::with_capacity(self.uvs.len() * 2);
        let mut lightmap_uvs = Vec::with_capacity(self.lightmap_uvs.len() * 2);
        for (uv, lm) in self.uvs.iter().zip(&self.lightmap_uvs) {
            uvs.extend([uv.x as f32, uv.y as f32]);
            lightmap_uvs.extend([lm.x as f32, lm.y as f32]);
        }
        let colors = self.colors.iter().flatten().copied().collect();

        (
            RenderSurface {
                material: self.material,
                positions,
                normals,
                uvs,
                lightmap_uvs,
                colors,
                indices: self.indices,
                bounding_box: BoundsRecord::from_aabb(&bounds),
            },
            self.stats,
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
