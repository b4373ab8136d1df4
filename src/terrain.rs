//! Procedural terrain generation.
//!
//! Converts an octave-noise heightmap into layered block columns: bedrock at
//! the bottom of the world, stone below the soil, dirt under the surface and
//! grass on top.

use glam::IVec3;

use crate::block::{Block, BlockKind};
use crate::noise::PerlinNoise;

/// Terrain frequency; smaller values stretch features out.
const SCALE: f64 = 0.01;
/// Height variation around sea level.
const HEIGHT_MULTIPLIER: f64 = 50.0;
/// Base surface height.
const SEA_LEVEL: f64 = 64.0;

/// Noise-driven terrain generator.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    noise: PerlinNoise,
}

impl TerrainGenerator {
    /// Create a generator for a world seed.
    pub fn new(seed: u64) -> Self {
        Self {
            noise: PerlinNoise::new(seed),
        }
    }

    /// Surface height at a ground coordinate.
    pub fn terrain_height(&self, x: f64, z: f64) -> f64 {
        let height = self
            .noise
            .octave_noise(x * SCALE, 0.0, z * SCALE, 6, 0.5);
        SEA_LEVEL + height * HEIGHT_MULTIPLIER
    }

    /// Generate block columns over a ground rectangle.
    ///
    /// Samples every `resolution` cells and fills each sampled column from
    /// y = 0 up to the surface height; cells above the surface stay air.
    pub fn generate_terrain(
        &self,
        min_x: i32,
        max_x: i32,
        min_z: i32,
        max_z: i32,
        resolution: usize,
    ) -> Vec<Block> {
        let step = resolution.max(1);
        let mut blocks = Vec::new();

        for x in (min_x..=max_x).step_by(step) {
            for z in (min_z..=max_z).step_by(step) {
                let surface = self.terrain_height(x as f64, z as f64) as i32;
                for y in 0..=surface {
                    blocks.push(Block::new(IVec3::new(x, y, z), layer_kind(y, surface)));
                }
            }
        }

        blocks
    }

    /// Single grass layer at y = 0, skipping noise entirely for fast startup.
    pub fn generate_flat_terrain(
        &self,
        min_x: i32,
        max_x: i32,
        min_z: i32,
        max_z: i32,
    ) -> Vec<Block> {
        let mut blocks = Vec::new();
        for x in (min_x..=max_x).step_by(2) {
            for z in (min_z..=max_z).step_by(2) {
                blocks.push(Block::new(IVec3::new(x, 0, z), BlockKind::Grass));
            }
        }
        blocks
    }
}

/// Block kind for a cell at height `y` in a column with the given surface.
fn layer_kind(y: i32, surface: i32) -> BlockKind {
    if y == 0 {
        BlockKind::Bedrock
    } else if y < surface - 3 {
        BlockKind::Stone
    } else if y < surface {
        BlockKind::Dirt
    } else {
        BlockKind::Grass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heights_are_deterministic_and_near_sea_level() {
        let a = TerrainGenerator::new(42);
        let b = TerrainGenerator::new(42);
        for i in 0..20 {
            let x = i as f64 * 13.7;
            let h = a.terrain_height(x, -x);
            assert_eq!(h, b.terrain_height(x, -x));
            assert!(h >= SEA_LEVEL - HEIGHT_MULTIPLIER);
            assert!(h <= SEA_LEVEL + HEIGHT_MULTIPLIER);
        }
    }

    #[test]
    fn columns_are_layered_bottom_to_top() {
        let generator = TerrainGenerator::new(42);
        let blocks = generator.generate_terrain(0, 0, 0, 0, 1);
        let surface = generator.terrain_height(0.0, 0.0) as i32;
        assert_eq!(blocks.len(), (surface + 1) as usize);

        for block in &blocks {
            let y = block.position.y;
            let expected = if y == 0 {
                BlockKind::Bedrock
            } else if y < surface - 3 {
                BlockKind::Stone
            } else if y < surface {
                BlockKind::Dirt
            } else {
                BlockKind::Grass
            };
            assert_eq!(block.kind, expected, "layer mismatch at y = {y}");
        }

        // Exactly one grass cap per column.
        let caps = blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Grass)
            .count();
        assert_eq!(caps, 1);
    }

    #[test]
    fn resolution_thins_the_sampling() {
        let generator = TerrainGenerator::new(7);
        let dense = generator.generate_terrain(0, 3, 0, 0, 1);
        let sparse = generator.generate_terrain(0, 3, 0, 0, 2);
        let dense_columns: std::collections::HashSet<i32> =
            dense.iter().map(|b| b.position.x).collect();
        let sparse_columns: std::collections::HashSet<i32> =
            sparse.iter().map(|b| b.position.x).collect();
        assert_eq!(dense_columns.len(), 4);
        assert_eq!(sparse_columns.len(), 2);
    }

    #[test]
    fn flat_terrain_is_a_single_grass_layer() {
        let generator = TerrainGenerator::new(1);
        let blocks = generator.generate_flat_terrain(-4, 4, -4, 4);
        assert!(!blocks.is_empty());
        for block in &blocks {
            assert_eq!(block.position.y, 0);
            assert_eq!(block.kind, BlockKind::Grass);
        }
    }
}
