//! Recursive ray-tracing renderer.
//!
//! For every pixel a camera ray is traced through the scene: direct lighting
//! with soft shadows at the first hit, then depth-bounded recursion for
//! mirror reflection and Snell's-law refraction. Pixels are independent, so
//! rows are distributed across worker threads; the only per-thread state is
//! the light sampler's thread-local random stream.

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::material::Color;
use crate::ray::Ray;
use crate::renderable::{closest_intersection, Intersection, Renderable};
use crate::scene::Scene;

/// Hard recursion cap; mirror and lens bounce chains stop past this depth.
pub const MAX_DEPTH: u32 = 2;

/// Stochastic shadow samples per light per shaded point.
pub const SHADOW_SAMPLES: u32 = 4;

/// Offset applied along a secondary ray before recursing, so reflected and
/// refracted rays never re-intersect the surface they left.
const SURFACE_EPSILON: f32 = 1e-3;

/// Ambient floor added to every shaded point.
const AMBIENT_LIGHT: Vec3A = Vec3A::new(20.0 / 255.0, 20.0 / 255.0, 20.0 / 255.0);

/// Ray-tracing renderer over a scene and camera.
///
/// Long-lived but stateless with respect to the scene: it borrows both for
/// the duration of a frame, which also keeps scene edits from interleaving
/// with an in-flight render.
pub struct Renderer<'a> {
    scene: &'a Scene,
    camera: &'a Camera,
    shadow_samples: u32,
}

impl<'a> Renderer<'a> {
    /// Create a renderer with the default shadow sample count.
    pub fn new(scene: &'a Scene, camera: &'a Camera) -> Self {
        Self {
            scene,
            camera,
            shadow_samples: SHADOW_SAMPLES,
        }
    }

    /// Override the per-light shadow sample count.
    pub fn with_shadow_samples(mut self, samples: u32) -> Self {
        self.shadow_samples = samples.max(1);
        self
    }

    /// Render the scene into a linear RGB image, row-major, origin top-left.
    ///
    /// The grid's visible set is snapshotted once and shared read-only by all
    /// worker threads.
    pub fn render(&self, width: u32, height: u32) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        let visible = self.scene.visible_objects();
        info!(
            "Tracing {} visible objects on {} CPU cores...",
            visible.len(),
            rayon::current_num_threads()
        );
        let start = std::time::Instant::now();
        let pb = ProgressBar::new((width * height) as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap(),
        );

        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(width, height);
        image.enumerate_pixels_mut().par_bridge().for_each(|(x, y, pixel)| {
            let ray = self.camera.generate_ray(x, y, width, height);
            let color = self.trace(&ray, 0, &visible);
            *pixel = Rgb([color.x, color.y, color.z]);
            pb.inc(1);
        });

        pb.finish();
        info!("Frame rendered in {:.2?}", start.elapsed());
        image
    }

    /// Trace a single pixel; handy for spot queries outside a full frame.
    pub fn render_pixel(&self, x: u32, y: u32, width: u32, height: u32) -> Color {
        let visible = self.scene.visible_objects();
        let ray = self.camera.generate_ray(x, y, width, height);
        self.trace(&ray, 0, &visible)
    }

    /// Recursive shading of one ray.
    ///
    /// Composites direct lighting, reflection and refraction per channel as
    /// `direct * (1 - reflectivity - refractivity) + reflect * reflectivity +
    /// refract * refractivity`. The weights are taken as-is: a material whose
    /// reflectivity and refractivity sum past 1 drives the direct weight
    /// negative, and only the final clamp reins the channels back into range.
    fn trace(&self, ray: &Ray, depth: u32, visible: &[&Renderable]) -> Color {
        if depth > MAX_DEPTH {
            return Vec3A::ZERO;
        }

        let Some(hit) = closest_intersection(visible, ray) else {
            return self.scene.skybox().sky_color(ray.direction);
        };
        let material = hit.object.material();

        let direct = self.direct_lighting(&hit, visible);

        let mut reflected = Vec3A::ZERO;
        if material.reflectivity > 0.0 {
            let direction = (ray.direction
                - hit.normal * (2.0 * ray.direction.dot(hit.normal)))
            .normalize();
            let bounced = Ray::new(hit.point + direction * SURFACE_EPSILON, direction);
            reflected = self.trace(&bounced, depth + 1, visible);
        }

        let mut refracted = Vec3A::ZERO;
        if material.refractivity > 0.0 {
            // Total internal reflection leaves the refraction term black.
            if let Some(direction) =
                refract_direction(ray.direction, hit.normal, material.refractive_index)
            {
                let bent = Ray::new(hit.point + direction * SURFACE_EPSILON, direction);
                refracted = self.trace(&bent, depth + 1, visible);
            }
        }

        let base_weight = 1.0 - material.reflectivity - material.refractivity;
        (direct * base_weight
            + reflected * material.reflectivity
            + refracted * material.refractivity)
            .clamp(Vec3A::ZERO, Vec3A::ONE)
    }

    /// Direct lighting: ambient floor plus every light's soft-shadowed
    /// contribution, clamped per channel as the terms accumulate.
    fn direct_lighting(&self, hit: &Intersection<'_>, visible: &[&Renderable]) -> Color {
        let material = hit.object.material();
        let mut total = AMBIENT_LIGHT;
        for light in self.scene.lights() {
            let contribution =
                light.lighting(hit.point, hit.normal, &material, visible, self.shadow_samples);
            total = (total + contribution).min(Vec3A::ONE);
        }
        total
    }
}

/// Refraction direction through a material boundary by Snell's law.
///
/// The refractive index pair swaps and the normal flips when the ray is
/// exiting rather than entering, detected by the sign of `-normal . dir`.
/// Returns `None` on total internal reflection.
fn refract_direction(dir: Vec3A, normal: Vec3A, refractive_index: f32) -> Option<Vec3A> {
    let mut n1 = 1.0; // air
    let mut n2 = refractive_index;
    let mut normal = normal;
    let mut cos_i = -normal.dot(dir);
    if cos_i <= 0.0 {
        normal = -normal;
        std::mem::swap(&mut n1, &mut n2);
        cos_i = -normal.dot(dir);
    }

    let eta = n1 / n2;
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some((dir * eta + normal * (eta * cos_i - k.sqrt())).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockKind};
    use crate::light::AreaLight;
    use crate::material::Material;
    use crate::sphere::Sphere;
    use glam::IVec3;

    #[test]
    fn missed_rays_come_back_as_sky() {
        let scene = Scene::new();
        let camera = Camera::new();
        let renderer = Renderer::new(&scene, &camera);
        let color = renderer.render_pixel(4, 4, 9, 9);
        let expected = scene.skybox().sky_color(camera.direction());
        assert!((color - expected).length() < 1e-5);
    }

    #[test]
    fn lit_grass_block_reads_green_from_above() {
        let mut scene = Scene::new();
        scene.add_block(Block::new(IVec3::ZERO, BlockKind::Grass));
        scene.add_unit_light(AreaLight::unit(0, 6, 0, Vec3A::new(1.0, 1.0, 0.8), 2.0));

        let mut camera = Camera::new();
        camera.set_position(Vec3A::new(0.0, 5.0, 0.0));
        camera.set_up(Vec3A::Z);
        camera.set_direction(Vec3A::new(0.0, -1.0, 0.0));

        let renderer = Renderer::new(&scene, &camera);
        let image = renderer.render(9, 9);
        let pixel = image.get_pixel(4, 4);
        let color = Vec3A::new(pixel[0], pixel[1], pixel[2]);

        assert!(color.max_element() > 0.1, "center pixel is black: {color}");
        assert!(color.y > color.x);
        assert!(color.y > color.z);

        let grass = BlockKind::Grass.material().color;
        let sky_blue = Vec3A::new(135.0 / 255.0, 206.0 / 255.0, 235.0 / 255.0);
        assert!((color - grass).length() < (color - sky_blue).length());
    }

    #[test]
    fn facing_mirrors_terminate_within_the_depth_cap() {
        let mut scene = Scene::new();
        let mirror = Material::mirror(Vec3A::ONE, 1.0);
        scene.add_unit_sphere(Sphere::unit(0, 0, 0, mirror));
        scene.add_unit_sphere(Sphere::unit(0, 0, 4, mirror));
        for offset in [-1, 1] {
            scene.add_unit_sphere(Sphere::unit(offset, 0, 0, mirror));
            scene.add_unit_sphere(Sphere::unit(offset, 0, 4, mirror));
        }

        let mut camera = Camera::new();
        camera.set_position(Vec3A::new(0.0, 0.0, 2.0));

        let renderer = Renderer::new(&scene, &camera);
        let color = renderer.render_pixel(4, 4, 9, 9);
        for channel in [color.x, color.y, color.z] {
            assert!(channel.is_finite());
            assert!((0.0..=1.0).contains(&channel));
        }
    }

    #[test]
    fn shadowed_side_is_darker_than_the_lit_side() {
        let mut scene = Scene::new();
        scene.add_block(Block::new(IVec3::ZERO, BlockKind::Grass));
        // Roof directly between the surface and the light.
        scene.add_block(Block::new(IVec3::new(0, 3, 0), BlockKind::Stone));
        scene.add_unit_light(AreaLight::unit(0, 6, 0, Vec3A::ONE, 2.0));

        let mut camera = Camera::new();
        camera.set_position(Vec3A::new(0.0, 1.8, 0.0));
        camera.set_up(Vec3A::Z);
        camera.set_direction(Vec3A::new(0.0, -1.0, 0.0));

        let renderer = Renderer::new(&scene, &camera);
        let shadowed = renderer.render_pixel(4, 4, 9, 9);
        // The roof blocks every sample, leaving only the ambient floor.
        assert!((shadowed - AMBIENT_LIGHT).length() < 1e-5);
    }

    #[test]
    fn head_on_refraction_passes_straight_through() {
        let direction = refract_direction(Vec3A::NEG_Z, Vec3A::Z, 1.5).unwrap();
        assert!((direction - Vec3A::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn grazing_exit_is_total_internal_reflection() {
        // Exiting glass at ~64 degrees from the surface normal.
        let direction = Vec3A::new(0.9, 0.0, 0.43589).normalize();
        assert!(refract_direction(direction, Vec3A::Z, 1.5).is_none());
    }

    #[test]
    fn entering_refraction_bends_toward_the_normal() {
        let incoming = Vec3A::new(0.6, 0.0, -0.8);
        let bent = refract_direction(incoming, Vec3A::Z, 1.5).unwrap();
        // Tangential component shrinks by 1/1.5.
        assert!((bent.x - 0.4).abs() < 1e-5);
        assert!(bent.z < 0.0);
        assert!((bent.length() - 1.0).abs() < 1e-6);
    }
}
