//! # Output Document
//!
//! The structured artifact handed to the engine. All geometry is exported
//! as flat f32 arrays; f64 precision exists only inside the kernel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use elc_geom::Aabb;

/// Terminal compile artifact: entity records plus their meshes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputDocument {
    pub entities: Vec<EntityRecord>,
    pub render_meshes: Vec<RenderMesh>,
    pub collision_meshes: Vec<CollisionMesh>,
    /// World bounds accumulated over every entity.
    pub bounds: BoundsRecord,
}

/// Per-entity record; mesh ids are `-1` when the entity produced no mesh
/// of that kind. Occluder meshes are not implemented and always `-1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRecord {
    pub render_mesh_id: i32,
    pub collision_mesh_id: i32,
    pub occluder_mesh_id: i32,
    pub attributes: BTreeMap<String, String>,
}

/// Render geometry for one entity, one surface per material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderMesh {
    pub surfaces: Vec<RenderSurface>,
}

/// Indexed, welded geometry for one material.
///
/// Vertex attributes are struct-of-arrays: positions and normals are 3
/// floats per vertex, both UV sets 2, colors 4.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSurface {
    pub material: String,
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    pub lightmap_uvs: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u32>,
    pub bounding_box: BoundsRecord,
}

impl RenderSurface {
    /// Number of vertices in the surface.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles in the surface.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Collision geometry for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionMesh {
    pub meshlets: Vec<CollisionMeshlet>,
}

/// Unindexed triangle soup for one material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionMeshlet {
    pub material: String,
    /// Flat triangle list: 9 floats per triangle.
    pub positions: Vec<f32>,
}

impl CollisionMeshlet {
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 9
    }
}

/// Axis-aligned box at output precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundsRecord {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundsRecord {
    /// Narrows kernel-precision bounds to the output format.
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self {
            min: [aabb.min.x as f32, aabb.min.y as f32, aabb.min.z as f32],
            max: [aabb.max.x as f32, aabb.max.y as f32, aabb.max.z as f32],
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
    fn test_bounds_record_narrows_aabb() {
        let aabb = Aabb::new(DVec3::new(-1.5, 0.0, 2.0), DVec3::new(3.0, 4.0, 5.0));
        let record = BoundsRecord::from_aabb(&aabb);
        assert_eq!(record.min, [-1.5, 0.0, 2.0]);
        assert_eq!(record.max, [3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_document_serde_round_trip() {
        let document = OutputDocument {
            entities: vec![EntityRecord {
                render_mesh_id: 0,
                collision_mesh_id: -1,
                occluder_mesh_id: -1,
                attributes: [("classname".to_string(), "worldspawn".to_string())]
                    .into_iter()
                    .collect(),
            }],
            render_meshes: vec![RenderMesh {
                surfaces: vec![RenderSurface {
                    material: "brick".to_string(),
                    positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
                    normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
                    uvs: vec![0.0; 6],
                    lightmap_uvs: vec![0.0; 6],
                    colors: vec![0.0; 12],
                    indices: vec![0, 1, 2],
                    bounding_box: BoundsRecord::default(),
                }],
            }],
            collision_meshes: Vec::new(),
            bounds: BoundsRecord::default(),
        };

        let json = serde_json::to_string(&document).unwrap();
        let back: OutputDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entities[0].render_mesh_id, 0);
        assert_eq!(back.entities[0].occluder_mesh_id, -1);
        assert_eq!(back.render_meshes[0].surfaces[0].vertex_count(), 3);
        assert_eq!(back.render_meshes[0].surfaces[0].triangle_count(), 1);
    }
}
