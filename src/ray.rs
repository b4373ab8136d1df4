//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use glam::Vec3A;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// This represents the ray's origin, typically the camera position for
    /// primary rays or a surface point for shadow, reflection and refraction
    /// rays.
    pub origin: Vec3A,

    /// Direction vector of the ray, always unit length.
    ///
    /// The constructor normalizes whatever direction it is given, so every
    /// intersection distance along the ray is a true Euclidean distance.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    ///
    /// The direction is normalized here; a zero-length direction produces
    /// non-finite components that propagate through later arithmetic.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_normalized() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 3.0, 4.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert!((ray.direction.y - 0.6).abs() < 1e-6);
        assert!((ray.direction.z - 0.8).abs() < 1e-6);
    }

    #[test]
    fn at_walks_along_the_direction() {
        let ray = Ray::new(Vec3A::new(1.0, 2.0, 3.0), Vec3A::new(0.0, 0.0, -2.0));
        let point = ray.at(4.0);
        assert!((point - Vec3A::new(1.0, 2.0, -1.0)).length() < 1e-6);
    }
}
