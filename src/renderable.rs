//! Ray-object intersection over the closed set of scene object variants.
//!
//! Every object the tracer can hit is one of the variants below; dispatch is
//! by tag, not by virtual calls. An [`Intersection`] is an ephemeral record
//! created per query and consumed immediately by the caller.

use glam::Vec3A;

use crate::block::Block;
use crate::light::AreaLight;
use crate::material::Material;
use crate::prism::{intersect_box, Prism};
use crate::ray::Ray;
use crate::sphere::Sphere;

/// Result of a successful ray-object test.
///
/// Plain immutable record with no identity beyond its fields; never stored.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Distance along the ray to the hit point, >= 0.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3A,
    /// Unit surface normal at the hit point.
    pub normal: Vec3A,
    /// The object that was hit.
    pub object: &'a Renderable,
}

/// Closed set of objects a ray can intersect.
#[derive(Debug, Clone, Copy)]
pub enum Renderable {
    /// Unit cube on the integer lattice, tagged by kind.
    Block(Block),
    /// General axis-aligned box.
    Prism(Prism),
    /// Sphere.
    Sphere(Sphere),
    /// Rectangular area light; emits light but also occludes rays.
    Light(AreaLight),
}

impl Renderable {
    /// Test this object against a ray.
    ///
    /// Returns `None` for the ordinary no-hit case.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let (distance, normal) = match self {
            Renderable::Block(block) => intersect_box(block.center(), Vec3A::ONE, ray)?,
            Renderable::Prism(prism) => intersect_box(prism.position, prism.size, ray)?,
            Renderable::Light(light) => intersect_box(light.position, light.size, ray)?,
            Renderable::Sphere(sphere) => sphere.intersect(ray)?,
        };
        Some(Intersection {
            distance,
            point: ray.at(distance),
            normal,
            object: self,
        })
    }

    /// Surface material of the object.
    pub fn material(&self) -> Material {
        match self {
            Renderable::Block(block) => block.material(),
            Renderable::Prism(prism) => prism.material,
            Renderable::Sphere(sphere) => sphere.material,
            Renderable::Light(light) => light.surface_material(),
        }
    }

    /// Whether this object is an opaque lattice block.
    ///
    /// Blocks take part in enclosed-cell occlusion culling; other variants
    /// never do.
    pub fn is_block(&self) -> bool {
        matches!(self, Renderable::Block(_))
    }
}

/// Nearest hit of a ray against a set of objects.
///
/// Linear scan retaining the minimum-distance intersection.
pub fn closest_intersection<'a>(
    objects: &[&'a Renderable],
    ray: &Ray,
) -> Option<Intersection<'a>> {
    let mut closest: Option<Intersection<'a>> = None;
    for object in objects {
        if let Some(hit) = object.intersect(ray) {
            if closest.as_ref().map_or(true, |c| hit.distance < c.distance) {
                closest = Some(hit);
            }
        }
    }
    closest
}
