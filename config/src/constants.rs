//! Centralized configuration values shared across the elc compile pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

/// Classification threshold for plane-side tests.
///
/// A point whose signed distance to a plane is within this band counts as
/// lying on the plane. A non-zero threshold prevents infinite oscillation
/// when clipping against axis-aligned coincident planes.
///
/// # Examples
/// ```
/// use config::constants::COPLANAR_EPSILON;
/// assert!(COPLANAR_EPSILON > 0.0);
/// assert!(COPLANAR_EPSILON < 1.0);
/// ```
pub const COPLANAR_EPSILON: f64 = 0.01;

/// Radius within which two points collapse into one shared vertex.
///
/// Applied both when deduplicating clip fragments and when welding mesh
/// vertices. Tuned for maps authored at one world unit per inch.
///
/// # Examples
/// ```
/// use config::constants::WELD_RADIUS;
/// assert_eq!(WELD_RADIUS, 0.125);
/// ```
pub const WELD_RADIUS: f64 = 0.125;

/// Tolerance for treating two texture coordinates as identical while welding.
///
/// # Examples
/// ```
/// use config::constants::UV_WELD_TOLERANCE;
/// assert_eq!(UV_WELD_TOLERANCE, 1.0 / 128.0);
/// ```
pub const UV_WELD_TOLERANCE: f64 = 1.0 / 128.0;

/// Tolerance for treating two unit normals as identical while welding.
///
/// Matches the quantization step of a signed-byte normal encoding, so any
/// two normals welded here would encode to the same bytes downstream.
///
/// # Examples
/// ```
/// use config::constants::NORMAL_WELD_TOLERANCE;
/// assert!(NORMAL_WELD_TOLERANCE < 0.01);
/// ```
pub const NORMAL_WELD_TOLERANCE: f64 = 2.0 / 255.0;

/// Half-extent of the base quadrilateral constructed on each brush plane.
///
/// Must exceed the maximum extent of any compilable map so that clipping
/// against the sibling planes alone determines the face shape.
///
/// # Examples
/// ```
/// use config::constants::MAX_MAP_EXTENT;
/// assert!(MAX_MAP_EXTENT >= 32768.0);
/// ```
pub const MAX_MAP_EXTENT: f64 = 65536.0;

/// Minimum number of faces a brush must retain to bound a solid.
///
/// # Examples
/// ```
/// use config::constants::MIN_BRUSH_FACES;
/// assert_eq!(MIN_BRUSH_FACES, 4);
/// ```
pub const MIN_BRUSH_FACES: usize = 4;

/// Square texture dimension substituted when a material cannot be resolved.
///
/// # Examples
/// ```
/// use config::constants::FALLBACK_TEXTURE_SIZE;
/// assert!(FALLBACK_TEXTURE_SIZE.is_power_of_two());
/// ```
pub const FALLBACK_TEXTURE_SIZE: u32 = 512;

/// Half-extent of the seed box for world boundary accumulation.
///
/// Seeding with a minimal non-zero box avoids a degenerate empty bounding
/// box when a map contains only point entities.
///
/// # Examples
/// ```
/// use config::constants::WORLD_BOUNDS_SEED;
/// assert!(WORLD_BOUNDS_SEED > 0.0);
/// ```
pub const WORLD_BOUNDS_SEED: f64 = 1.0;

/// Geometry tolerances resolved for a particular world unit scale.
///
/// The reference constants are empirically tuned for maps authored at one
/// world unit per inch. Compiling content authored at a different scale
/// rescales the length-unit tolerances proportionally; the UV tolerance and
/// the normal quantization step are unit-free and stay fixed.
///
/// # Examples
/// ```
/// use config::constants::Tolerances;
/// let tol = Tolerances::default();
/// assert_eq!(tol.weld_radius, 0.125);
///
/// let doubled = Tolerances::for_unit_scale(2.0).expect("valid scale");
/// assert_eq!(doubled.weld_radius, 0.25);
/// assert_eq!(doubled.uv_weld_tolerance, tol.uv_weld_tolerance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Plane-side classification band, in world units.
    pub coplanar_epsilon: f64,
    /// Point collapse radius, in world units.
    pub weld_radius: f64,
    /// Texture coordinate weld tolerance (unit-free).
    pub uv_weld_tolerance: f64,
    /// Unit normal weld tolerance (unit-free).
    pub normal_weld_tolerance: f64,
}

impl Tolerances {
    /// Derives tolerances for content authored at `unit_scale` world units
    /// per reference unit.
    ///
    /// # Examples
    /// ```
    /// use config::constants::Tolerances;
    /// assert!(Tolerances::for_unit_scale(0.0).is_err());
    /// assert!(Tolerances::for_unit_scale(1.0).is_ok());
    /// ```
    pub fn for_unit_scale(unit_scale: f64) -> Result<Self, ConfigError> {
        if !(unit_scale.is_finite() && unit_scale > 0.0) {
            return Err(ConfigError::InvalidUnitScale(unit_scale));
        }
        Ok(Self {
            coplanar_epsilon: COPLANAR_EPSILON * unit_scale,
            weld_radius: WELD_RADIUS * unit_scale,
            uv_weld_tolerance: UV_WELD_TOLERANCE,
            normal_weld_tolerance: NORMAL_WELD_TOLERANCE,
        })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            coplanar_epsilon: COPLANAR_EPSILON,
            weld_radius: WELD_RADIUS,
            uv_weld_tolerance: UV_WELD_TOLERANCE,
            normal_weld_tolerance: NORMAL_WELD_TOLERANCE,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the unit scale is zero, negative, or non-finite.
    InvalidUnitScale(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidUnitScale(value) => {
                write!(f, "unit scale must be positive and finite: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
