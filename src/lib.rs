//! VoxelPath recursive ray tracer
//!
//! Renders sparse, unit-aligned voxel scenes on the CPU: slab-method box
//! intersection with backface culling, grid-occupancy occlusion culling,
//! recursive shading with soft shadows, mirror reflection and Snell's-law
//! refraction, a procedural sky, and Perlin-noise terrain generation.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod block;
pub mod camera;
pub mod grid;
pub mod light;
pub mod material;
pub mod noise;
pub mod prism;
pub mod random;
pub mod ray;
pub mod renderable;
pub mod renderer;
pub mod scene;
pub mod sky;
pub mod sphere;
pub mod terrain;
