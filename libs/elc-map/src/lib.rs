//! # ELC Map
//!
//! Map data model and geometry construction for the elc brush compiler.
//! Turns the loader's plane/keyvalue input into convex brush faces grouped
//! under entities, ready for the mesh stage.
//!
//! ## Architecture
//!
//! ```text
//! loader input (MapSource) → brush builder → entity aggregation → elc-mesh
//! ```

pub mod brush;
pub mod entity;
pub mod error;
pub mod face;
pub mod material;
pub mod source;

pub use brush::{build_brush, Brush};
pub use entity::{
    fix_origins, merge_classes, update_boundaries, Entity, GROUPING_CLASSNAMES, NONSOLID_KEY,
    ORIGIN_KEY, WORLD_CLASSNAME,
};
pub use error::MapError;
pub use face::Face;
pub use material::{Material, MaterialProvider, StaticMaterials, ToolFlags, UvProjection};
pub use source::{MapSource, SourceBrush, SourceEntity, SourceSide};
