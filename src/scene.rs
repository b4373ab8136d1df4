//! Scene: the grid, the lights and the sky.
//!
//! The scene exclusively owns one [`UnitGrid`] plus the list of area lights.
//! Lights are bookkept twice by design: the list drives shading, while a copy
//! in the grid lets lights occlude rays like any other geometry. Every light
//! in the list is grid-resolvable at its rounded position and vice versa;
//! removal keeps both sides in step.

use glam::IVec3;

use crate::block::Block;
use crate::grid::UnitGrid;
use crate::light::AreaLight;
use crate::ray::Ray;
use crate::renderable::{closest_intersection, Intersection, Renderable};
use crate::sky::Skybox;
use crate::sphere::Sphere;

/// Container for all renderable objects, lights and the sky model.
///
/// Built once per session and mutated through explicit add/remove calls.
/// Mutation must not interleave with an in-flight render pass; the borrow
/// checker enforces that here, since rendering holds a shared borrow.
#[derive(Debug, Default)]
pub struct Scene {
    grid: UnitGrid,
    lights: Vec<AreaLight>,
    skybox: Skybox,
}

impl Scene {
    /// Create an empty scene with the default skybox.
    pub fn new() -> Self {
        Self {
            grid: UnitGrid::new(),
            lights: Vec::new(),
            skybox: Skybox::new(),
        }
    }

    /// Add a block at its lattice position.
    pub fn add_block(&mut self, block: Block) {
        self.grid.insert(block.position, Renderable::Block(block));
    }

    /// Add many blocks at once, as produced by terrain generation.
    pub fn add_blocks(&mut self, blocks: Vec<Block>) {
        for block in blocks {
            self.add_block(block);
        }
    }

    /// Add a unit sphere, rounding its center to the nearest lattice cell.
    pub fn add_unit_sphere(&mut self, sphere: Sphere) {
        let position = UnitGrid::world_to_grid(sphere.center);
        self.grid.insert(position, Renderable::Sphere(sphere));
    }

    /// Add a unit light, rounding its center to the nearest lattice cell.
    ///
    /// The light lands in both the light list and the grid.
    pub fn add_unit_light(&mut self, light: AreaLight) {
        let position = UnitGrid::world_to_grid(light.position);
        self.lights.push(light);
        self.grid.insert(position, Renderable::Light(light));
    }

    /// Remove whatever occupies the given cell.
    ///
    /// A removed light also leaves the light list, preserving the
    /// list-and-grid invariant.
    pub fn remove_object(&mut self, x: i32, y: i32, z: i32) {
        let cell = IVec3::new(x, y, z);
        if let Some(Renderable::Light(_)) = self.grid.remove(cell) {
            self.lights
                .retain(|light| UnitGrid::world_to_grid(light.position) != cell);
        }
    }

    /// Replace the sky model.
    pub fn set_skybox(&mut self, skybox: Skybox) {
        self.skybox = skybox;
    }

    /// The current sky model.
    pub fn skybox(&self) -> &Skybox {
        &self.skybox
    }

    /// All lights in the scene.
    pub fn lights(&self) -> &[AreaLight] {
        &self.lights
    }

    /// The occlusion-culled set of objects rays can reach.
    pub fn visible_objects(&self) -> Vec<&Renderable> {
        self.grid.visible_objects()
    }

    /// Nearest hit of a ray against the visible set.
    ///
    /// Linear scan over the visible objects, O(V) per ray.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        closest_intersection(&self.grid.visible_objects(), ray)
    }

    /// Objects whose cell lies within `radius` of `center`.
    pub fn objects_in_radius(&self, center: glam::Vec3A, radius: f32) -> Vec<&Renderable> {
        self.grid.objects_in_radius(center, radius)
    }

    /// Diagnostic summary of grid occupancy and culling.
    pub fn grid_stats(&self) -> String {
        self.grid.stats()
    }
}
