//! # Entity Aggregation
//!
//! Groups brush faces and point data into entities, folds editor grouping
//! classes together, fixes up pivot ("origin") brushes, and accumulates
//! world bounds.

use std::collections::BTreeMap;

use glam::DVec3;

use config::constants::{Tolerances, WORLD_BOUNDS_SEED};
use elc_geom::Aabb;

use crate::brush::build_brush;
use crate::error::MapError;
use crate::face::Face;
use crate::material::MaterialProvider;
use crate::source::SourceEntity;

/// Classname of the world-geometry entity.
pub const WORLD_CLASSNAME: &str = "worldspawn";

/// Editor-only grouping classes folded into the world entity.
pub const GROUPING_CLASSNAMES: [&str; 2] = ["func_group", "func_detail"];

/// Keyvalue holding an entity's pivot as a textual vector.
pub const ORIGIN_KEY: &str = "origin";

/// Keyvalue suppressing collision output for an entity.
pub const NONSOLID_KEY: &str = "elc_nonsolid";

// =============================================================================
// ENTITY
// =============================================================================

/// A compiled entity: classname, keyvalues, and the faces flattened from
/// all of its brushes.
///
/// `bounds` is kept relative to `centroid`; world-space corners are
/// recovered by offsetting with the centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    classname: String,
    pub keyvalues: BTreeMap<String, String>,
    faces: Vec<Face>,
    centroid: DVec3,
    bounds: Aabb,
}

impl Entity {
    /// Builds an entity from loader input, carving all of its brushes.
    pub fn from_source(
        source: &SourceEntity,
        provider: &dyn MaterialProvider,
        tolerances: &Tolerances,
    ) -> Result<Entity, MapError> {
        let mut faces = Vec::new();
        for (brush_index, brush) in source.brushes.iter().enumerate() {
            faces.extend(build_brush(brush_index, brush, provider, tolerances)?.into_faces());
        }

        let mut entity = Entity {
            classname: source.classname.clone(),
            keyvalues: source.keyvalues.clone(),
            faces,
            centroid: DVec3::ZERO,
            bounds: Aabb::new(DVec3::ZERO, DVec3::ZERO),
        };
        if entity.is_point() {
            if let Some(origin) = source.keyvalues.get(ORIGIN_KEY).and_then(|v| parse_origin(v)) {
                entity.centroid = origin;
            }
        } else {
            entity.recompute_derived();
        }
        Ok(entity)
    }

    /// An entity assembled directly from faces (used when class merging
    /// has to create the target instance).
    pub fn with_faces(classname: impl Into<String>, faces: Vec<Face>) -> Entity {
        let mut entity = Entity {
            classname: classname.into(),
            keyvalues: BTreeMap::new(),
            faces,
            centroid: DVec3::ZERO,
            bounds: Aabb::new(DVec3::ZERO, DVec3::ZERO),
        };
        if !entity.is_point() {
            entity.recompute_derived();
        }
        entity
    }

    #[inline]
    pub fn classname(&self) -> &str {
        &self.classname
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Entity pivot in world space.
    #[inline]
    pub fn centroid(&self) -> DVec3 {
        self.centroid
    }

    /// Centroid-relative bounds.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// True if the entity owns no brush geometry.
    #[inline]
    pub fn is_point(&self) -> bool {
        self.faces.is_empty()
    }

    /// True for the world-geometry entity.
    #[inline]
    pub fn is_world(&self) -> bool {
        self.classname == WORLD_CLASSNAME
    }

    /// True if the entity opted out of collision geometry.
    pub fn is_nonsolid(&self) -> bool {
        self.keyvalues
            .get(NONSOLID_KEY)
            .is_some_and(|v| v != "0")
    }

    /// Translates every face, moving the centroid along.
    pub fn translate_faces(&mut self, offset: DVec3) {
        for face in &mut self.faces {
            face.translate(offset);
        }
        self.centroid += offset;
    }

    fn absorb_faces(&mut self, faces: Vec<Face>) {
        self.faces.extend(faces);
        self.recompute_derived();
    }

    fn into_faces(self) -> Vec<Face> {
        self.faces
    }

    /// Recomputes centroid (mean of face centers) and the relative bounds.
    fn recompute_derived(&mut self) {
        let sum: DVec3 = self.faces.iter().map(Face::center).sum();
        self.centroid = sum / self.faces.len() as f64;
        self.rebuild_bounds();
    }

    fn rebuild_bounds(&mut self) {
        let centroid = self.centroid;
        self.bounds = Aabb::from_points(
            self.faces
                .iter()
                .flat_map(|f| f.polygon().points().iter().map(move |&p| p - centroid)),
        );
    }
}

/// Parses an `"x y z"` keyvalue into a vector.
pub fn parse_origin(text: &str) -> Option<DVec3> {
    let mut parts = text.split_whitespace().map(str::parse::<f64>);
    let x = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    let z = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(DVec3::new(x, y, z))
}

// =============================================================================
// AGGREGATION PASSES
// =============================================================================

/// Reparents the brush faces of all `source_classes` entities into a
/// single `target_class` instance.
///
/// Source entities are removed. The target is created only when sources
/// actually contributed faces and no instance exists yet.
pub fn merge_classes(entities: &mut Vec<Entity>, target_class: &str, source_classes: &[&str]) {
    let mut moved: Vec<Face> = Vec::new();
    let mut kept = Vec::with_capacity(entities.len());
    for entity in entities.drain(..) {
        if source_classes.contains(&entity.classname()) {
            moved.extend(entity.into_faces());
        } else {
            kept.push(entity);
        }
    }
    *entities = kept;

    if moved.is_empty() {
        return;
    }
    if let Some(target) = entities.iter_mut().find(|e| e.classname == target_class) {
        target.absorb_faces(moved);
    } else {
        entities.push(Entity::with_faces(target_class, moved));
    }
}

/// Rewrites the pivot of every non-world brush entity lacking an explicit
/// `"origin"` keyvalue.
///
/// The pivot is the mean center of the entity's origin-flagged faces,
/// falling back to the mean of all face centers when none are flagged.
/// Faces are translated by `pivot - centroid`, the centroid becomes the
/// pivot, and the keyvalue records the pivot's textual form.
pub fn fix_origins(entities: &mut [Entity]) {
    for entity in entities {
        if entity.is_world() || entity.is_point() || entity.keyvalues.contains_key(ORIGIN_KEY) {
            continue;
        }

        let flagged: Vec<DVec3> = entity
            .faces
            .iter()
            .filter(|f| f.material().flags.is_origin())
            .map(Face::center)
            .collect();
        let pivot = if flagged.is_empty() {
            entity.centroid
        } else {
            flagged.iter().sum::<DVec3>() / flagged.len() as f64
        };

        let offset = pivot - entity.centroid;
        entity.translate_faces(offset);
        entity.centroid = pivot;
        entity.rebuild_bounds();
        entity.keyvalues.insert(
            ORIGIN_KEY.to_string(),
            format!("{} {} {}", pivot.x, pivot.y, pivot.z),
        );
    }
}

/// Accumulates every entity's bounds corners into one world-space box.
///
/// Seeded with a minimal non-zero box so a map of point entities still
/// produces usable bounds.
pub fn update_boundaries(entities: &[Entity]) -> Aabb {
    let mut bounds = Aabb::seeded(WORLD_BOUNDS_SEED);
    for entity in entities {
        if entity.bounds.is_empty() {
            continue;
        }
        for corner in entity.bounds.corners() {
            bounds.expand_to_include(corner + entity.centroid);
        }
    }
    bounds
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Material, StaticMaterials, ToolFlags};
    use crate::source::{SourceBrush, SourceSide};
    use elc_geom::Plane;

    const ORIGIN_MATERIAL: &str = "tools/origin";

    fn materials() -> StaticMaterials {
        let mut provider = StaticMaterials::new();
        provider.insert(Material::new("brick", ToolFlags::empty(), 128, 128));
        provider.insert(Material::new(
            ORIGIN_MATERIAL,
            ToolFlags::ORIGIN | ToolFlags::NO_DRAW | ToolFlags::NO_COLLISION,
            64,
            64,
        ));
        provider
    }

    /// Axis-aligned cube brush centered at `center` with the given half
    /// extent.
    fn cube_brush(center: DVec3, half: f64, material: &str) -> SourceBrush {
        let axes = [DVec3::X, DVec3::Y, DVec3::Z];
        let mut sides = Vec::with_capacity(6);
        for axis in axes {
            sides.push(SourceSide::new(
                Plane::new(axis, axis.dot(center) + half),
                material,
            ));
            sides.push(SourceSide::new(
                Plane::new(-axis, -axis.dot(center) + half),
                material,
            ));
        }
        SourceBrush { sides }
    }

    fn brush_entity(classname: &str, brushes: Vec<SourceBrush>) -> Entity {
        Entity::from_source(
            &SourceEntity::with_brushes(classname, brushes),
            &materials(),
            &Tolerances::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_from_source_flattens_brush_faces() {
        let entity = brush_entity(
            WORLD_CLASSNAME,
            vec![
                cube_brush(DVec3::ZERO, 1.0, "brick"),
                cube_brush(DVec3::new(4.0, 0.0, 0.0), 1.0, "brick"),
            ],
        );
        assert_eq!(entity.faces().len(), 12);
        assert!((entity.centroid() - DVec3::new(2.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_point_entity_takes_centroid_from_origin_keyvalue() {
        let mut source = SourceEntity::point("light");
        source
            .keyvalues
            .insert(ORIGIN_KEY.to_string(), "1 2 3".to_string());
        let entity =
            Entity::from_source(&source, &materials(), &Tolerances::default()).unwrap();
        assert!(entity.is_point());
        assert_eq!(entity.centroid(), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_parse_origin_rejects_malformed_values() {
        assert_eq!(
            parse_origin(&"1 2 3".to_string()),
            Some(DVec3::new(1.0, 2.0, 3.0))
        );
        assert_eq!(parse_origin(&"1 2".to_string()), None);
        assert_eq!(parse_origin(&"1 2 3 4".to_string()), None);
        assert_eq!(parse_origin(&"1 x 3".to_string()), None);
    }

    #[test]
    fn test_merge_classes_folds_grouping_entities_into_world() {
        let mut entities = vec![
            brush_entity(WORLD_CLASSNAME, vec![cube_brush(DVec3::ZERO, 1.0, "brick")]),
            brush_entity(
                "func_group",
                vec![cube_brush(DVec3::new(4.0, 0.0, 0.0), 1.0, "brick")],
            ),
            brush_entity(
                "func_detail",
                vec![cube_brush(DVec3::new(-4.0, 0.0, 0.0), 1.0, "brick")],
            ),
        ];
        merge_classes(&mut entities, WORLD_CLASSNAME, &GROUPING_CLASSNAMES);

        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].classname(), WORLD_CLASSNAME);
        assert_eq!(entities[0].faces().len(), 18);
    }

    #[test]
    fn test_merge_classes_creates_missing_target() {
        let mut entities = vec![brush_entity(
            "func_group",
            vec![cube_brush(DVec3::ZERO, 1.0, "brick")],
        )];
        merge_classes(&mut entities, WORLD_CLASSNAME, &GROUPING_CLASSNAMES);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].classname(), WORLD_CLASSNAME);
        assert_eq!(entities[0].faces().len(), 6);
    }

    #[test]
    fn test_fix_origins_prefers_flagged_faces() {
        // Spec scenario: one origin-flagged brush at (5,0,0), two ordinary
        // brushes averaging (0,0,0): the pivot is (5,0,0), not the face
        // average
        let mut entities = vec![brush_entity(
            "func_door",
            vec![
                cube_brush(DVec3::new(5.0, 0.0, 0.0), 0.5, ORIGIN_MATERIAL),
                cube_brush(DVec3::new(-2.5, 0.0, 0.0), 1.0, "brick"),
                cube_brush(DVec3::new(2.5, 0.0, 0.0), 1.0, "brick"),
            ],
        )];
        fix_origins(&mut entities);

        let entity = &entities[0];
        assert!((entity.centroid() - DVec3::new(5.0, 0.0, 0.0)).length() < 1e-9);
        assert_eq!(entity.keyvalues[ORIGIN_KEY], "5 0 0");
    }

    #[test]
    fn test_fix_origins_falls_back_to_face_average() {
        let mut entities = vec![brush_entity(
            "func_door",
            vec![cube_brush(DVec3::new(3.0, 1.0, 0.0), 1.0, "brick")],
        )];
        fix_origins(&mut entities);

        let entity = &entities[0];
        // Pivot equals the centroid, so the geometry does not move
        assert!((entity.centroid() - DVec3::new(3.0, 1.0, 0.0)).length() < 1e-9);
        assert_eq!(entity.keyvalues[ORIGIN_KEY], "3 1 0");
        let bounds = entity.bounds();
        assert!((bounds.min - DVec3::splat(-1.0)).length() < 1e-9);
    }

    #[test]
    fn test_fix_origins_skips_world_point_and_explicit_origin() {
        let mut explicit = brush_entity(
            "func_door",
            vec![cube_brush(DVec3::new(1.0, 0.0, 0.0), 1.0, "brick")],
        );
        explicit
            .keyvalues
            .insert(ORIGIN_KEY.to_string(), "9 9 9".to_string());

        let mut entities = vec![
            brush_entity(WORLD_CLASSNAME, vec![cube_brush(DVec3::ZERO, 1.0, "brick")]),
            explicit,
        ];
        let world_centroid = entities[0].centroid();
        fix_origins(&mut entities);

        assert!(!entities[0].keyvalues.contains_key(ORIGIN_KEY));
        assert_eq!(entities[0].centroid(), world_centroid);
        assert_eq!(entities[1].keyvalues[ORIGIN_KEY], "9 9 9");
    }

    #[test]
    fn test_origin_fix_up_round_trip() {
        let mut entities = vec![brush_entity(
            "func_door",
            vec![
                cube_brush(DVec3::new(5.0, 0.0, 0.0), 0.5, ORIGIN_MATERIAL),
                cube_brush(DVec3::ZERO, 1.0, "brick"),
            ],
        )];
        let entity_before = entities[0].clone();
        let centroid_before = entity_before.centroid();

        fix_origins(&mut entities);
        let entity = &mut entities[0];

        // Reading the origin back and undoing the translation reproduces
        // the original world positions
        let pivot = parse_origin(&entity.keyvalues[ORIGIN_KEY]).unwrap();
        entity.translate_faces(centroid_before - pivot);
        for (before, after) in entity_before.faces().iter().zip(entity.faces()) {
            for (&a, &b) in before
                .polygon()
                .points()
                .iter()
                .zip(after.polygon().points())
            {
                assert!((a - b).length() < 1e-9);
            }
        }
    }

    #[test]
    fn test_update_boundaries_accumulates_offset_corners() {
        let entities = vec![
            brush_entity(WORLD_CLASSNAME, vec![cube_brush(DVec3::ZERO, 1.0, "brick")]),
            brush_entity(
                "func_door",
                vec![cube_brush(DVec3::new(10.0, 0.0, 0.0), 1.0, "brick")],
            ),
        ];
        let bounds = update_boundaries(&entities);
        assert!((bounds.max.x - 11.0).abs() < 1e-9);
        assert!((bounds.min.x + 1.0).abs() < 1e-9);
        // Seed box keeps the other axes at least ±1
        assert!(bounds.max.y >= 1.0);
        assert!(bounds.min.z <= -1.0);
    }

    #[test]
    fn test_update_boundaries_of_point_entities_is_seed_box() {
        let source = SourceEntity::point("light");
        let entity =
            Entity::from_source(&source, &materials(), &Tolerances::default()).unwrap();
        let bounds = update_boundaries(&[entity]);
        assert_eq!(bounds, Aabb::seeded(WORLD_BOUNDS_SEED));
    }

    #[test]
    fn test_nonsolid_keyvalue() {
        let mut entity = brush_entity(
            "func_illusionary",
            vec![cube_brush(DVec3::ZERO, 1.0, "brick")],
        );
        assert!(!entity.is_nonsolid());
        entity
            .keyvalues
            .insert(NONSOLID_KEY.to_string(), "1".to_string());
        assert!(entity.is_nonsolid());
        entity
            .keyvalues
            .insert(NONSOLID_KEY.to_string(), "0".to_string());
        assert!(!entity.is_nonsolid());
    }
}
