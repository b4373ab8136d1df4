//! Surface materials for ray tracing.
//!
//! A material describes how a surface responds to light: its base color, how
//! much of the incoming ray is mirrored, how much is transmitted, and the
//! refractive index used for Snell's law at the boundary.

use glam::Vec3A;

/// RGB color type with linear channels in [0, 1].
pub type Color = Vec3A;

/// Optical properties of a surface.
///
/// Materials are plain values shared by copy among many objects of the same
/// kind. Reflectivity and refractivity each live in [0, 1]; their sum is not
/// forced below 1, and the renderer's composite step preserves the resulting
/// arithmetic rather than rebalancing the weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base surface color, linear RGB in [0, 1].
    pub color: Color,
    /// Fraction of the shaded color taken from the mirrored ray.
    pub reflectivity: f32,
    /// Fraction of the shaded color taken from the transmitted ray.
    pub refractivity: f32,
    /// Refractive index of the medium behind the surface, > 0.
    pub refractive_index: f32,
}

impl Material {
    /// Create a new material.
    pub const fn new(
        color: Color,
        reflectivity: f32,
        refractivity: f32,
        refractive_index: f32,
    ) -> Self {
        Self {
            color,
            reflectivity,
            refractivity,
            refractive_index,
        }
    }

    /// Fully diffuse material with the given color.
    pub const fn diffuse(color: Color) -> Self {
        Self::new(color, 0.0, 0.0, 1.0)
    }

    /// Mirror-like material; `reflectivity` of the shading comes from the
    /// bounced ray.
    pub const fn mirror(color: Color, reflectivity: f32) -> Self {
        Self::new(color, reflectivity, 0.0, 1.0)
    }

    /// Transparent material refracting through the given index.
    pub const fn glass(color: Color, refractivity: f32, refractive_index: f32) -> Self {
        Self::new(color, 0.0, refractivity, refractive_index)
    }
}
