//! Rectangular area lights with stochastic soft shadows.
//!
//! An area light is a box-shaped emitter that is also an occluder in the
//! spatial index. Shading draws a handful of uniformly distributed sample
//! points inside the light volume and averages the unobstructed ones, which
//! turns shadow edges soft in proportion to the light's extent.

use glam::Vec3A;

use crate::material::{Color, Material};
use crate::random;
use crate::ray::Ray;
use crate::renderable::{closest_intersection, Renderable};

/// Offset applied along the surface normal before casting shadow rays, so a
/// shaded point never re-intersects its own surface.
const SHADOW_EPSILON: f32 = 1e-3;

/// Minimum center-bias falloff at the edge of the light volume.
const FALLOFF_FLOOR: f32 = 0.1;

/// Box-shaped area light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaLight {
    /// Center of the light volume.
    pub position: Vec3A,
    /// Full extents of the light volume.
    pub size: Vec3A,
    /// Emitted color, linear RGB in [0, 1].
    pub color: Color,
    /// Emission intensity scale.
    pub intensity: f32,
}

impl AreaLight {
    /// Create a new area light.
    pub fn new(position: Vec3A, size: Vec3A, color: Color, intensity: f32) -> Self {
        Self {
            position,
            size,
            color,
            intensity,
        }
    }

    /// 1x1x1 light centered on an integer lattice cell.
    pub fn unit(x: i32, y: i32, z: i32, color: Color, intensity: f32) -> Self {
        Self::new(
            Vec3A::new(x as f32, y as f32, z as f32),
            Vec3A::ONE,
            color,
            intensity,
        )
    }

    /// Material shown when a camera ray hits the light volume directly.
    pub fn surface_material(&self) -> Material {
        Material::diffuse(self.color)
    }

    /// Light contribution at a shaded point, averaged over `samples`
    /// stochastic samples of the light volume.
    ///
    /// Each sample casts a shadow ray from the point (offset along the
    /// normal) toward a random spot inside the light. Unobstructed samples
    /// accumulate Lambertian diffuse times intensity, distance attenuation
    /// `1 / (1 + 0.05 d + 0.005 d^2)`, a center-biased area falloff, and the
    /// per-channel product of light and material color. A hit on this light's
    /// own surface does not count as an obstruction, since the light shares
    /// the spatial index with the geometry it illuminates.
    pub fn lighting(
        &self,
        point: Vec3A,
        normal: Vec3A,
        material: &Material,
        occluders: &[&Renderable],
        samples: u32,
    ) -> Color {
        let mut total = Vec3A::ZERO;
        let mut unobstructed = 0u32;

        for _ in 0..samples {
            let sample = self.sample_point();
            let to_light = sample - point;
            let distance = to_light.length();
            let light_dir = to_light / distance;

            let shadow_ray = Ray::new(point + normal * SHADOW_EPSILON, light_dir);
            let blocked = match closest_intersection(occluders, &shadow_ray) {
                None => false,
                Some(hit) => {
                    let own_surface = matches!(
                        hit.object,
                        Renderable::Light(light)
                            if light.position == self.position && light.size == self.size
                    );
                    hit.distance <= distance && !own_surface
                }
            };

            if !blocked {
                let attenuation = 1.0 / (1.0 + 0.05 * distance + 0.005 * distance * distance);
                let diffuse = normal.dot(light_dir).max(0.0);
                let falloff = self.area_falloff(sample);
                let contribution = diffuse * self.intensity * attenuation * falloff;
                total += material.color * self.color * contribution;
                unobstructed += 1;
            }
        }

        if unobstructed == 0 {
            Vec3A::ZERO
        } else {
            (total / unobstructed as f32).min(Vec3A::ONE)
        }
    }

    /// Uniformly distributed random point inside the light volume.
    fn sample_point(&self) -> Vec3A {
        Vec3A::new(
            self.position.x + (random::random_f32() - 0.5) * self.size.x,
            self.position.y + (random::random_f32() - 0.5) * self.size.y,
            self.position.z + (random::random_f32() - 0.5) * self.size.z,
        )
    }

    /// Center-biased falloff: 1 at the center of the volume, decaying
    /// linearly toward the edges with a floor of 0.1.
    fn area_falloff(&self, sample: Vec3A) -> f32 {
        let dist_from_center = (sample - self.position).length();
        let max_dist = self.size.max_element() * 0.5;
        (1.0 - dist_from_center / max_dist).max(FALLOFF_FLOOR)
    }

    /// Whether a point lies inside the light volume.
    pub fn contains_point(&self, point: Vec3A) -> bool {
        let diff = point - self.position;
        diff.x.abs() <= self.size.x * 0.5
            && diff.y.abs() <= self.size.y * 0.5
            && diff.z.abs() <= self.size.z * 0.5
    }
}
