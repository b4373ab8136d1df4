//! Sphere primitive for ray tracing.
//!
//! Implements ray-sphere intersection via the quadratic formed by substituting
//! the ray equation into the sphere equation.

use glam::Vec3A;

use crate::material::Material;
use crate::ray::Ray;

/// Sphere defined by center, radius and material.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,
    /// Radius of the sphere.
    pub radius: f32,
    /// Surface material.
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3A, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Sphere of radius 0.5 centered on an integer lattice cell, sized to fit
    /// inside a unit grid cell.
    pub fn unit(x: i32, y: i32, z: i32, material: Material) -> Self {
        Self::new(Vec3A::new(x as f32, y as f32, z as f32), 0.5, material)
    }

    /// Solve the intersection quadratic and return `(distance, normal)`.
    ///
    /// Prefers the smaller positive root, falls back to the larger one when
    /// the origin is inside the sphere, and reports the outward unit normal
    /// at the hit point.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, Vec3A)> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let mut t = (-b - sqrt_d) / (2.0 * a);
        if t < 0.0 {
            t = (-b + sqrt_d) / (2.0 * a);
        }
        if t < 0.0 {
            return None;
        }

        let normal = (ray.at(t) - self.center).normalize();
        Some((t, normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;

    fn unit_sphere_at_origin() -> Sphere {
        Sphere::new(Vec3A::ZERO, 1.0, Material::diffuse(Vec3A::ONE))
    }

    #[test]
    fn head_on_hit_from_outside() {
        let sphere = unit_sphere_at_origin();
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        let (t, normal) = sphere.intersect(&ray).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert!((ray.at(t) - Vec3A::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!((normal - Vec3A::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn inside_origin_uses_the_far_root() {
        let sphere = unit_sphere_at_origin();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(1.0, 0.0, 0.0));
        let (t, normal) = sphere.intersect(&ray).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
        // Outward normal, even though the ray hit from inside.
        assert!((normal - Vec3A::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn misses_off_axis() {
        let sphere = unit_sphere_at_origin();
        let ray = Ray::new(Vec3A::new(0.0, 2.0, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn rejects_a_sphere_behind_the_ray() {
        let sphere = unit_sphere_at_origin();
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::new(0.0, 0.0, 1.0));
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn unit_sphere_fits_a_grid_cell() {
        let sphere = Sphere::unit(1, 2, 3, Material::diffuse(Vec3A::ONE));
        assert_eq!(sphere.radius, 0.5);
        assert_eq!(sphere.center, Vec3A::new(1.0, 2.0, 3.0));
    }
}
