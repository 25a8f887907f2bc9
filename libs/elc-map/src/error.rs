//! # Map Errors
//!
//! Error types for brush and entity construction.

use elc_geom::GeomError;
use thiserror::Error;

/// Errors that can occur while building brushes and entities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// A brush did not retain enough faces to bound a solid.
    ///
    /// Expected faces can be clipped away entirely; a whole brush
    /// collapsing below four faces cannot be, so it is reported rather
    /// than silently dropped.
    #[error("brush {brush_index} is degenerate: only {faces} faces survived clipping")]
    DegenerateBrush { brush_index: usize, faces: usize },

    /// The geometry kernel failed while carving a brush face.
    #[error("geometry failure in brush {brush_index}: {source}")]
    Geometry {
        brush_index: usize,
        #[source]
        source: GeomError,
    },
}

impl MapError {
    /// Wraps a geometry error with the owning brush index.
    pub fn geometry(brush_index: usize, source: GeomError) -> Self {
        Self::Geometry {
            brush_index,
            source,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
