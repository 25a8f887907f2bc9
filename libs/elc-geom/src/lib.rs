//! # ELC Geom
//!
//! Geometry kernel for the elc brush compiler.
//! Half-space planes, convex polygons, and the polygon/plane clipper that
//! the brush builder is driven by.
//!
//! ## Architecture
//!
//! ```text
//! elc-geom (planes, polygons, clipping) → elc-map (brushes, entities)
//! ```
//!
//! ## Conventions
//!
//! All geometry uses f64 (`glam::DVec3`) internally; f32 appears only at
//! the output-document boundary. Polygons wind counter-clockwise when
//! viewed from the side their plane normal points to.

pub mod bounds;
pub mod clip;
pub mod error;
pub mod plane;
pub mod polygon;
pub mod vertex;

pub use bounds::Aabb;
pub use clip::{clip, ClipResult};
pub use error::GeomError;
pub use plane::{Plane, PointSide};
pub use polygon::Polygon;
pub use vertex::Vertex;
