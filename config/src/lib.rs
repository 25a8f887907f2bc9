//! # Config Crate
//!
//! Centralized configuration constants for the elc compile pipeline.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{COPLANAR_EPSILON, WELD_RADIUS};
//!
//! // Use COPLANAR_EPSILON for plane-side classification
//! let distance: f64 = 0.001;
//! let on_plane = distance.abs() <= COPLANAR_EPSILON;
//! assert!(on_plane);
//!
//! // WELD_RADIUS bounds how far apart two points may be and still
//! // collapse into one shared vertex
//! assert!(WELD_RADIUS > COPLANAR_EPSILON);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Unit-Scale Aware**: Length tolerances can be rescaled via `Tolerances`
//! - **Reference Compatible**: Defaults reproduce the reference compiler
//!   behavior at unit scale 1.0

pub mod constants;
