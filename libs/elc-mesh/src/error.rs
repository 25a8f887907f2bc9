//! # Compile Errors
//!
//! Error types for the mesh stage and the per-entity failure report
//! returned by the compile entry point.

use std::fmt;

use elc_map::MapError;
use thiserror::Error;

/// Errors that can occur while compiling an entity to meshes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// Brush or entity construction failed.
    #[error(transparent)]
    Map(#[from] MapError),

    /// A vertex with NaN or infinite data reached the mesh welder.
    ///
    /// Checked here in addition to the geometry kernel: degenerate data
    /// would otherwise corrupt the output format silently.
    #[error("non-finite geometry entering the mesh welder for material `{material}`")]
    NonFiniteGeometry { material: String },
}

impl CompileError {
    /// Creates a non-finite geometry error for the given material bucket.
    pub fn non_finite(material: impl Into<String>) -> Self {
        Self::NonFiniteGeometry {
            material: material.into(),
        }
    }
}

/// One entity-scoped failure.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityError {
    pub entity_index: usize,
    pub classname: String,
    pub error: CompileError,
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entity {} ({}): {}",
            self.entity_index, self.classname, self.error
        )
    }
}

/// Collected per-entity failures for a compile run.
///
/// The kernel keeps processing other entities after a failure so the
/// report is complete, but a run with any error never produces a
/// document.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileReport {
    pub errors: Vec<EntityError>,
}

impl fmt::Display for CompileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "compilation failed with {} entity error(s):", self.errors.len())?;
        for error in &self.errors {
            writeln!(f, "  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileReport {}

// =============================================================================
// TESTS
// =============================================================================
