//! # ELC Mesh
//!
//! Terminal stage of the elc brush compiler: welds each entity's
//! triangulated face stream into material-grouped render surfaces and
//! collision meshlets, and assembles the output document.
//!
//! ## Architecture
//!
//! ```text
//! elc-map (entities + faces) → elc-mesh (welder) → OutputDocument
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use elc_mesh::{compile, CompileOptions};
//!
//! let document = compile(&map, &materials, &CompileOptions::default())?;
//! ```

pub mod collision;
pub mod compile;
pub mod document;
pub mod error;
pub mod surface;

pub use compile::{compile, CompileOptions};
pub use document::{
    BoundsRecord, CollisionMesh, CollisionMeshlet, EntityRecord, OutputDocument, RenderMesh,
    RenderSurface,
};
pub use error::{CompileError, CompileReport, EntityError};
pub use surface::{SurfaceBuilder, WeldStats};
