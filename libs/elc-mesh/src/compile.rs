//! # Compile Entry Point
//!
//! Drives the whole kernel: carves brushes into entities, folds grouping
//! classes, fixes up origins, then fans mesh generation out across
//! entities and reduces the results into the output document.
//!
//! Entities are independent work units, so both the brush stage and the
//! mesh stage run data-parallel. The reduce is serial in input order,
//! which is what makes render/collision mesh ids deterministic.

use log::debug;
use rayon::prelude::*;

use config::constants::Tolerances;
use elc_map::{
    fix_origins, merge_classes, update_boundaries, Entity, MapSource, MaterialProvider,
    GROUPING_CLASSNAMES, WORLD_CLASSNAME,
};

use crate::collision::MeshletBuilder;
use crate::document::{
    BoundsRecord, CollisionMesh, CollisionMeshlet, EntityRecord, OutputDocument, RenderMesh,
    RenderSurface,
};
use crate::error::{CompileError, CompileReport, EntityError};
use crate::surface::{SurfaceBuilder, WeldStats};

// =============================================================================
// OPTIONS
// =============================================================================

/// Compile-run parameters.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Geometry tolerances; rescale via
    /// `Tolerances::for_unit_scale` for content authored at a different
    /// world scale.
    pub tolerances: Tolerances,
}

// =============================================================================
// COMPILE
// =============================================================================

/// Compiles a loaded map into the output document.
///
/// Per-entity failures are collected rather than aborting the run, so the
/// returned report is complete; any failure means no document is
/// produced.
pub fn compile(
    map: &MapSource,
    provider: &dyn MaterialProvider,
    options: &CompileOptions,
) -> Result<OutputDocument, CompileReport> {
    // Stage 1: carve every entity's brushes
    let built: Vec<Result<Entity, EntityError>> = map
        .entities
        .par_iter()
        .enumerate()
        .map(|(entity_index, source)| {
            Entity::from_source(source, provider, &options.tolerances).map_err(|error| {
                EntityError {
                    entity_index,
                    classname: source.classname.clone(),
                    error: error.into(),
                }
            })
        })
        .collect();

    let mut entities = Vec::with_capacity(built.len());
    let mut errors = Vec::new();
    for result in built {
        match result {
            Ok(entity) => entities.push(entity),
            Err(error) => errors.push(error),
        }
    }
    if !errors.is_empty() {
        return Err(CompileReport { errors });
    }

    // Stage 2: aggregation passes are serial; they reshape the entity list
    merge_classes(&mut entities, WORLD_CLASSNAME, &GROUPING_CLASSNAMES);
    fix_origins(&mut entities);
    let bounds = update_boundaries(&entities);

    // Stage 3: per-entity mesh generation
    let meshed: Vec<Result<EntityMeshes, EntityError>> = entities
        .par_iter()
        .enumerate()
        .map(|(entity_index, entity)| {
            build_entity_meshes(entity, &options.tolerances).map_err(|error| EntityError {
                entity_index,
                classname: entity.classname().to_string(),
                error,
            })
        })
        .collect();

    // Stage 4: serial reduce; ids are assigned by insertion order
    let mut document = OutputDocument {
        bounds: BoundsRecord::from_aabb(&bounds),
        ..OutputDocument::default()
    };
    let mut stats = WeldStats::default();
    for (entity, result) in entities.iter().zip(meshed) {
        let meshes = match result {
            Ok(meshes) => meshes,
            Err(error) => {
                errors.push(error);
                continue;
            }
        };

        let render_mesh_id = if meshes.surfaces.is_empty() {
            -1
        } else {
            document.render_meshes.push(RenderMesh {
                surfaces: meshes.surfaces,
            });
            document.render_meshes.len() as i32 - 1
        };
        let collision_mesh_id = if meshes.meshlets.is_empty() {
            -1
        } else {
            document.collision_meshes.push(CollisionMesh {
                meshlets: meshes.meshlets,
            });
            document.collision_meshes.len() as i32 - 1
        };

        let mut attributes = entity.keyvalues.clone();
        attributes.insert("classname".to_string(), entity.classname().to_string());
        document.entities.push(EntityRecord {
            render_mesh_id,
            collision_mesh_id,
            occluder_mesh_id: -1,
            attributes,
        });
        stats.merge(meshes.stats);
    }
    if !errors.is_empty() {
        return Err(CompileReport { errors });
    }

    debug!(
        "compiled {} entities: welded {} vertices, dropped {} degenerate triangles",
        document.entities.len(),
        stats.welded_vertices,
        stats.dropped_triangles
    );
    Ok(document)
}

// =============================================================================
// PER-ENTITY MESHES
// =============================================================================

struct EntityMeshes {
    surfaces: Vec<RenderSurface>,
    meshlets: Vec<CollisionMeshlet>,
    stats: WeldStats,
}

/// Welds one entity's faces into material-bucketed surfaces and meshlets.
fn build_entity_meshes(
    entity: &Entity,
    tolerances: &Tolerances,
) -> Result<EntityMeshes, CompileError> {
    let mut surfaces: Vec<SurfaceBuilder> = Vec::new();
    let mut meshlets: Vec<MeshletBuilder> = Vec::new();
    let nonsolid = entity.is_nonsolid();

    for face in entity.faces() {
        let flags = face.material().flags;
        let wants_render = !flags.blocks_render();
        let wants_collision = !nonsolid && !flags.blocks_collision();
        if !wants_render && !wants_collision {
            continue;
        }

        let triangles = face.triangles();
        if wants_render {
            let builder = surface_for(&mut surfaces, &face.material().name);
            for triangle in &triangles {
                builder.add_triangle(triangle, tolerances)?;
            }
        }
        if wants_collision {
            let builder = meshlet_for(&mut meshlets, &face.material().name);
            for triangle in &triangles {
                builder.add_triangle(triangle)?;
            }
        }
    }

    let mut stats = WeldStats::default();
    let surfaces = surfaces
        .into_iter()
        .filter(|b| !b.is_empty())
        .map(|b| {
            let (surface, weld_stats) = b.finish();
            stats.merge(weld_stats);
            surface
        })
        .collect();
    let meshlets = meshlets
        .into_iter()
        .filter(|b| !b.is_empty())
        .map(MeshletBuilder::finish)
        .collect();

    Ok(EntityMeshes {
        surfaces,
        meshlets,
        stats,
    })
}

/// Finds the bucket for `material`, creating it in first-use order.
fn surface_for<'a>(surfaces: &'a mut Vec<SurfaceBuilder>, material: &str) -> &'a mut SurfaceBuilder {
    if let Some(index) = surfaces.iter().position(|s| s.material() == material) {
        &mut surfaces[index]
    } else {
        surfaces.push(SurfaceBuilder::new(material));
        surfaces.last_mut().expect("just pushed")
    }
}

fn meshlet_for<'a>(meshlets: &'a mut Vec<MeshletBuilder>, material: &str) -> &'a mut MeshletBuilder {
    if let Some(index) = meshlets.iter().position(|m| m.material() == material) {
        &mut meshlets[index]
    } else {
        meshlets.push(MeshletBuilder::new(material));
        meshlets.last_mut().expect("just pushed")
    }
}

// =============================================================================
// TESTS
// =============================================================================
