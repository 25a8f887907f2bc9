//! # Collision Assembly
//!
//! Flat-triangle collision meshlets, one per material per entity.
//! Collision geometry is unindexed and carries positions only.

use glam::DVec3;

use elc_geom::Vertex;

use crate::document::CollisionMeshlet;
use crate::error::CompileError;

/// Accumulates collision triangles for a single material.
#[derive(Debug, Clone)]
pub struct MeshletBuilder {
    material: String,
    positions: Vec<DVec3>,
}

impl MeshletBuilder {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            positions: Vec::new(),
        }
    }

    #[inline]
    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Appends one triangle's positions.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::NonFiniteGeometry`] for NaN or infinite
    /// positions; collision data is as corruptible as render data.
    pub fn add_triangle(&mut self, triangle: &[Vertex; 3]) -> Result<(), CompileError> {
        for vertex in triangle {
            if !vertex.position.is_finite() {
                return Err(CompileError::non_finite(self.material.clone()));
            }
        }
        self.positions
            .extend(triangle.iter().map(|v| v.position));
        Ok(())
    }

    /// Exports the meshlet as a flat f32 triangle list.
    pub fn finish(self) -> CollisionMeshlet {
        let mut positions = Vec::with_capacity(self.positions.len() * 3);
        for p in &self.positions {
            positions.extend([p.x as f32, p.y as f32, p.z as f32]);
        }
        CollisionMeshlet {
            material: self.material,
            positions,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meshlet_is_flat_triangle_list() {
        let mut builder = MeshletBuilder::new("brick");
        let tri = [
            Vertex::at(DVec3::new(0.0, 0.0, 0.0)),
            Vertex::at(DVec3::new(1.0, 0.0, 0.0)),
            Vertex::at(DVec3::new(0.0, 1.0, 0.0)),
        ];
        builder.add_triangle(&tri).unwrap();
        builder.add_triangle(&tri).unwrap();

        let meshlet = builder.finish();
        assert_eq!(meshlet.triangle_count(), 2);
        assert_eq!(meshlet.positions.len(), 18);
        assert_eq!(&meshlet.positions[0..3], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_non_finite_position_is_fatal() {
        let mut builder = MeshletBuilder::new("brick");
        let tri = [
            Vertex::at(DVec3::new(f64::INFINITY, 0.0, 0.0)),
            Vertex::at(DVec3::X),
            Vertex::at(DVec3::Y),
        ];
        assert!(matches!(
            builder.add_triangle(&tri).unwrap_err(),
            CompileError::NonFiniteGeometry { .. }
        ));
    }
}
