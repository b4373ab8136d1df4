//! Unit blocks placed on the integer lattice.
//!
//! A block is a 1x1x1 cube whose center sits on integer coordinates, tagged
//! with a closed kind. The kind decides the material through a small constant
//! table; there is no per-block state beyond position and tag.

use glam::{IVec3, Vec3A};

use crate::material::Material;

/// Closed set of block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Indestructible floor layer at the bottom of the world.
    Bedrock,
    /// Underground filler.
    Stone,
    /// Subsurface soil.
    Dirt,
    /// Surface layer.
    Grass,
}

impl BlockKind {
    /// Material for this kind of block.
    pub const fn material(self) -> Material {
        match self {
            BlockKind::Bedrock => Material::new(
                Vec3A::new(50.0 / 255.0, 50.0 / 255.0, 50.0 / 255.0),
                0.1,
                0.0,
                1.0,
            ),
            BlockKind::Stone => Material::diffuse(Vec3A::new(
                128.0 / 255.0,
                128.0 / 255.0,
                128.0 / 255.0,
            )),
            BlockKind::Dirt => {
                Material::diffuse(Vec3A::new(139.0 / 255.0, 69.0 / 255.0, 19.0 / 255.0))
            }
            BlockKind::Grass => {
                Material::diffuse(Vec3A::new(34.0 / 255.0, 139.0 / 255.0, 34.0 / 255.0))
            }
        }
    }

    /// Identification name, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            BlockKind::Bedrock => "bedrock",
            BlockKind::Stone => "stone",
            BlockKind::Dirt => "dirt",
            BlockKind::Grass => "grass",
        }
    }
}

/// Unit cube at an integer lattice position, tagged by kind.
#[derive(Debug, Clone, Copy)]
pub struct Block {
    /// Lattice cell holding the block; the cube is centered on it.
    pub position: IVec3,
    /// Kind tag deciding material and diagnostics name.
    pub kind: BlockKind,
}

impl Block {
    /// Create a block of the given kind at a lattice position.
    pub fn new(position: IVec3, kind: BlockKind) -> Self {
        Self { position, kind }
    }

    /// Center of the cube in world coordinates.
    pub fn center(&self) -> Vec3A {
        self.position.as_vec3a()
    }

    /// Material looked up from the kind table.
    pub fn material(&self) -> Material {
        self.kind.material()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_table_matches_the_palette() {
        let grass = BlockKind::Grass.material();
        assert!((grass.color.y - 139.0 / 255.0).abs() < 1e-6);
        assert_eq!(grass.reflectivity, 0.0);

        // Bedrock is the one faintly reflective kind.
        assert!((BlockKind::Bedrock.material().reflectivity - 0.1).abs() < 1e-6);
        assert_eq!(BlockKind::Stone.material().refractivity, 0.0);
    }

    #[test]
    fn center_sits_on_the_lattice() {
        let block = Block::new(IVec3::new(2, -3, 7), BlockKind::Dirt);
        assert_eq!(block.center(), Vec3A::new(2.0, -3.0, 7.0));
        assert_eq!(block.kind.name(), "dirt");
    }
}
