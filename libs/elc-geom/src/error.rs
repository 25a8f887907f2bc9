//! # Geometry Errors
//!
//! Error types for the geometry kernel.

use thiserror::Error;

/// Errors that can occur in plane and polygon operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    /// A polygon was constructed with fewer than three points.
    #[error("polygon requires at least 3 points, got {count}")]
    TooFewPoints { count: usize },

    /// A polygon contains a repeated consecutive point.
    #[error("polygon has coincident consecutive points at index {index}")]
    CoincidentPoints { index: usize },

    /// A point with NaN or infinite coordinates was produced.
    ///
    /// Degenerate geometry cannot be trusted downstream, so this is a hard
    /// failure rather than a silently wrong vertex.
    #[error("non-finite point produced during {context}")]
    NonFinitePoint { context: &'static str },

    /// The points of a polygon do not span a plane.
    #[error("degenerate plane: polygon points are collinear")]
    DegeneratePlane,
}

impl GeomError {
    /// Creates a non-finite point error with the given context.
    pub fn non_finite(context: &'static str) -> Self {
        Self::NonFinitePoint { context }
    }
}

// =============================================================================
// TESTS
// =============================================================================
