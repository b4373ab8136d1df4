//! Camera for primary ray generation.
//!
//! The camera holds a position, a look direction and a world-up vector, and
//! derives an orthonormal basis from them whenever orientation changes.
//! Pixel coordinates map through a tan(fov/2)-scaled image plane with
//! aspect-ratio correction on the horizontal axis.

use glam::Vec3A;

use crate::ray::Ray;

/// Vertical limit for the look direction; pitching past it would flip the
/// derived basis.
const PITCH_LIMIT: f32 = 0.99;

/// Viewer position and orientation.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3A,
    direction: Vec3A,
    up: Vec3A,
    fov: f32,

    // Cached orthonormal basis, rebuilt when direction or up changes.
    forward: Vec3A,
    right: Vec3A,
    true_up: Vec3A,
}

impl Camera {
    /// Camera at the origin looking down -Z with a 60 degree field of view.
    pub fn new() -> Self {
        let mut camera = Self {
            position: Vec3A::ZERO,
            direction: Vec3A::NEG_Z,
            up: Vec3A::Y,
            fov: 60.0_f32.to_radians(),
            forward: Vec3A::NEG_Z,
            right: Vec3A::X,
            true_up: Vec3A::Y,
        };
        camera.update_basis();
        camera
    }

    fn update_basis(&mut self) {
        self.forward = self.direction.normalize();
        self.right = self.forward.cross(self.up).normalize();
        self.true_up = self.right.cross(self.forward).normalize();
    }

    /// Ray through the center of pixel (x, y) for an image of the given size.
    pub fn generate_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let aspect = width as f32 / height as f32;
        let half_plane = (self.fov / 2.0).tan();
        let px = (2.0 * ((x as f32 + 0.5) / width as f32) - 1.0) * half_plane * aspect;
        let py = (1.0 - 2.0 * ((y as f32 + 0.5) / height as f32)) * half_plane;

        let direction = self.forward + self.right * px + self.true_up * py;
        Ray::new(self.position, direction)
    }

    /// Current position.
    pub fn position(&self) -> Vec3A {
        self.position
    }

    /// Move the camera to a new position.
    pub fn set_position(&mut self, position: Vec3A) {
        self.position = position;
    }

    /// Current look direction (unit length).
    pub fn direction(&self) -> Vec3A {
        self.direction
    }

    /// Point the camera along a new direction.
    pub fn set_direction(&mut self, direction: Vec3A) {
        self.direction = direction.normalize();
        self.update_basis();
    }

    /// Replace the world-up reference.
    pub fn set_up(&mut self, up: Vec3A) {
        self.up = up.normalize();
        self.update_basis();
    }

    /// Set the field of view in degrees.
    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov = fov_degrees.to_radians();
    }

    /// Translate along the view direction.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.forward * distance;
    }

    /// Translate against the view direction.
    pub fn move_backward(&mut self, distance: f32) {
        self.position -= self.forward * distance;
    }

    /// Strafe left.
    pub fn move_left(&mut self, distance: f32) {
        self.position -= self.right * distance;
    }

    /// Strafe right.
    pub fn move_right(&mut self, distance: f32) {
        self.position += self.right * distance;
    }

    /// Yaw the look direction about the world Y axis.
    pub fn rotate_horizontal(&mut self, angle_degrees: f32) {
        let radians = angle_degrees.to_radians();
        let (sin, cos) = radians.sin_cos();

        let direction = Vec3A::new(
            self.direction.x * cos - self.direction.z * sin,
            self.direction.y,
            self.direction.x * sin + self.direction.z * cos,
        );
        self.set_direction(direction);
    }

    /// Pitch the look direction toward or away from true-up.
    ///
    /// The rotation is a no-op when it would push the vertical component past
    /// the near-vertical limit, keeping the basis well defined.
    pub fn rotate_vertical(&mut self, angle_degrees: f32) {
        let radians = angle_degrees.to_radians();
        let direction = self.direction * radians.cos() + self.true_up * radians.sin();
        if direction.y.abs() < PITCH_LIMIT {
            self.set_direction(direction);
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
