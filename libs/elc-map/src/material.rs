//! # Materials
//!
//! Material records, compiler tool flags and UV projection metadata.
//!
//! The reference system resolved materials through a process-wide lookup;
//! here resolution goes through the [`MaterialProvider`] trait passed into
//! the brush builder and mesh stage explicitly.

use std::collections::HashMap;

use bitflags::bitflags;
use glam::{DVec2, DVec3};
use log::warn;

use config::constants::FALLBACK_TEXTURE_SIZE;
use elc_geom::Plane;

// =============================================================================
// TOOL FLAGS
// =============================================================================

bitflags! {
    /// Per-material compiler behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ToolFlags: u32 {
        /// Face marks the owning entity's pivot; carries no geometry role.
        const ORIGIN = 0x1;
        /// Face is excluded from render surfaces.
        const NO_DRAW = 0x2;
        /// Face is excluded from collision meshlets.
        const NO_COLLISION = 0x4;
    }
}

impl ToolFlags {
    /// Face contributes to the entity pivot computation.
    #[inline]
    pub fn is_origin(self) -> bool {
        self.contains(Self::ORIGIN)
    }

    /// Face must not produce render geometry.
    #[inline]
    pub fn blocks_render(self) -> bool {
        self.contains(Self::NO_DRAW)
    }

    /// Face must not produce collision geometry.
    #[inline]
    pub fn blocks_collision(self) -> bool {
        self.contains(Self::NO_COLLISION)
    }
}

// =============================================================================
// MATERIAL
// =============================================================================

/// A resolved material: name, tool flags, and UV projection metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub flags: ToolFlags,
    /// Texture width in texels, used to normalize projected U coordinates.
    pub width: u32,
    /// Texture height in texels, used to normalize projected V coordinates.
    pub height: u32,
}

impl Material {
    pub fn new(name: impl Into<String>, flags: ToolFlags, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            flags,
            width,
            height,
        }
    }

    /// The material substituted when a name cannot be resolved.
    ///
    /// Keeps the requested name so the substitution stays diagnosable in
    /// the compiled output.
    pub fn fallback(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: ToolFlags::empty(),
            width: FALLBACK_TEXTURE_SIZE,
            height: FALLBACK_TEXTURE_SIZE,
        }
    }
}

// =============================================================================
// PROVIDER
// =============================================================================

/// Source of material records, passed into the compile stages explicitly.
pub trait MaterialProvider: Sync {
    /// Looks up a material by name; `None` if unknown.
    fn lookup(&self, name: &str) -> Option<Material>;

    /// Resolves a material, substituting a warned-about fallback when the
    /// name is unknown.
    fn resolve(&self, name: &str) -> Material {
        self.lookup(name).unwrap_or_else(|| {
            warn!("material `{name}` not found, substituting fallback");
            Material::fallback(name)
        })
    }
}

/// Map-backed provider for tests and embedding.
#[derive(Debug, Default)]
pub struct StaticMaterials {
    materials: HashMap<String, Material>,
}

impl StaticMaterials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a material under its own name.
    pub fn insert(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }
}

impl MaterialProvider for StaticMaterials {
    fn lookup(&self, name: &str) -> Option<Material> {
        self.materials.get(name).cloned()
    }
}

// =============================================================================
// UV PROJECTION
// =============================================================================

/// Planar UV projection axes as authored in the source map.
#[derive(Debug, Clone, PartialEq)]
pub struct UvProjection {
    pub u_axis: DVec3,
    pub u_offset: f64,
    pub u_scale: f64,
    pub v_axis: DVec3,
    pub v_offset: f64,
    pub v_scale: f64,
}

impl UvProjection {
    /// Projects a world position into texture space.
    ///
    /// Texel offsets and axis scales are normalized by the texture
    /// dimensions so the result is in repeat-space UV units.
    pub fn project(&self, point: DVec3, width: u32, height: u32) -> DVec2 {
        let w = width as f64;
        let h = height as f64;
        DVec2::new(
            point.dot(self.u_axis) / (w * self.u_scale) + self.u_offset / w,
            point.dot(self.v_axis) / (h * self.v_scale) + self.v_offset / h,
        )
    }

    /// Face-aligned projection derived from the face plane.
    ///
    /// Used when the loader supplies no explicit axes; seeds the basis the
    /// same way the brush builder seeds its base quadrilateral.
    pub fn face_aligned(plane: &Plane) -> Self {
        let axis = plane.closest_axis();
        let helper = if axis == DVec3::Z {
            DVec3::X
        } else if axis == DVec3::X {
            DVec3::Y
        } else {
            DVec3::Z
        };
        let u_axis = helper.cross(plane.normal).normalize();
        let v_axis = plane.normal.cross(u_axis);
        Self {
            u_axis,
            u_offset: 0.0,
            u_scale: 1.0,
            v_axis,
            v_offset: 0.0,
            v_scale: 1.0,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
