//! Sparse unit grid spatial index.
//!
//! Everything in the scene sits on integer lattice coordinates with unit
//! spacing, at most one occupant per cell; a later insertion at the same cell
//! overwrites the earlier occupant. The grid exploits that layout for
//! occlusion culling: a block whose six neighbors are all blocks can never be
//! reached by a ray starting outside the solid region, so the visible-set
//! query drops it before any intersection test runs.

use std::collections::HashMap;

use glam::{IVec3, Vec3A};

use crate::renderable::Renderable;

/// The six axis-adjacent neighbor offsets.
const NEIGHBOR_OFFSETS: [IVec3; 6] = [
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(0, -1, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
];

/// Sparse mapping from integer lattice coordinates to one occupant each.
///
/// Supports the full signed coordinate domain; no operation fails for any
/// valid integer cell.
#[derive(Debug, Default)]
pub struct UnitGrid {
    cells: HashMap<IVec3, Renderable>,
}

impl UnitGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    /// Round a continuous position to its lattice cell.
    pub fn world_to_grid(position: Vec3A) -> IVec3 {
        position.round().as_ivec3()
    }

    /// Place an object at a cell, replacing any earlier occupant.
    pub fn insert(&mut self, position: IVec3, object: Renderable) {
        self.cells.insert(position, object);
    }

    /// Remove and return the occupant of a cell.
    pub fn remove(&mut self, position: IVec3) -> Option<Renderable> {
        self.cells.remove(&position)
    }

    /// Whether a cell is occupied.
    pub fn contains(&self, position: IVec3) -> bool {
        self.cells.contains_key(&position)
    }

    /// The occupant of a cell, if any.
    pub fn object_at(&self, position: IVec3) -> Option<&Renderable> {
        self.cells.get(&position)
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid holds no objects.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Iterate over all occupants, visible or not.
    pub fn all_objects(&self) -> impl Iterator<Item = &Renderable> {
        self.cells.values()
    }

    /// All objects a ray from outside the solid regions could reach.
    ///
    /// Non-block occupants (spheres, lights) are always included. A block is
    /// included only when at least one of its six neighbor cells is empty or
    /// holds a non-block. This is an occlusion prefilter with one hash lookup
    /// per neighbor, not a full acceleration structure.
    pub fn visible_objects(&self) -> Vec<&Renderable> {
        self.cells
            .iter()
            .filter(|(position, object)| !object.is_block() || self.has_exposed_face(**position))
            .map(|(_, object)| object)
            .collect()
    }

    /// Whether any face of the cell borders air or a non-block.
    fn has_exposed_face(&self, position: IVec3) -> bool {
        NEIGHBOR_OFFSETS.iter().any(|offset| {
            !matches!(
                self.cells.get(&(position + *offset)),
                Some(neighbor) if neighbor.is_block()
            )
        })
    }

    /// Objects whose cell center lies within `radius` of `center`.
    ///
    /// Scans the bounding cube of candidate cells and filters by true
    /// Euclidean distance. Used for proximity queries, not the trace path.
    pub fn objects_in_radius(&self, center: Vec3A, radius: f32) -> Vec<&Renderable> {
        let grid_radius = radius.ceil() as i32 + 1;
        let center_cell = Self::world_to_grid(center);

        let mut nearby = Vec::new();
        for x in center_cell.x - grid_radius..=center_cell.x + grid_radius {
            for y in center_cell.y - grid_radius..=center_cell.y + grid_radius {
                for z in center_cell.z - grid_radius..=center_cell.z + grid_radius {
                    let cell = IVec3::new(x, y, z);
                    if let Some(object) = self.cells.get(&cell) {
                        if (center - cell.as_vec3a()).length() <= radius {
                            nearby.push(object);
                        }
                    }
                }
            }
        }
        nearby
    }

    /// Diagnostic summary of occupancy and culling.
    pub fn stats(&self) -> String {
        let total = self.cells.len();
        let visible = self.visible_objects().len();
        let culled = if total > 0 {
            100 * (total - visible) / total
        } else {
            0
        };
        format!("Grid: {} total, {} visible ({}% culled)", total, visible, culled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockKind};
    use crate::material::Material;
    use crate::sphere::Sphere;

    fn stone(x: i32, y: i32, z: i32) -> Renderable {
        Renderable::Block(Block::new(IVec3::new(x, y, z), BlockKind::Stone))
    }

    fn solid_cube(grid: &mut UnitGrid) {
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    grid.insert(IVec3::new(x, y, z), stone(x, y, z));
                }
            }
        }
    }

    #[test]
    fn later_insertion_overwrites() {
        let mut grid = UnitGrid::new();
        grid.insert(IVec3::ZERO, stone(0, 0, 0));
        grid.insert(
            IVec3::ZERO,
            Renderable::Block(Block::new(IVec3::ZERO, BlockKind::Grass)),
        );
        assert_eq!(grid.len(), 1);
        match grid.object_at(IVec3::ZERO).unwrap() {
            Renderable::Block(block) => assert_eq!(block.kind, BlockKind::Grass),
            other => panic!("unexpected occupant: {other:?}"),
        }
    }

    #[test]
    fn enclosed_center_of_a_solid_cube_is_culled() {
        let mut grid = UnitGrid::new();
        solid_cube(&mut grid);
        let visible = grid.visible_objects();
        assert_eq!(visible.len(), 26);
        // The center cell never shows up in the visible set.
        assert!(visible.iter().all(|object| match object {
            Renderable::Block(block) => block.position != IVec3::ZERO,
            _ => false,
        }));
    }

    #[test]
    fn non_blocks_are_always_visible() {
        let mut grid = UnitGrid::new();
        solid_cube(&mut grid);
        grid.insert(
            IVec3::ZERO,
            Renderable::Sphere(Sphere::unit(0, 0, 0, Material::diffuse(Vec3A::ONE))),
        );
        // The sphere replaced the enclosed center block and is not culled.
        assert_eq!(grid.visible_objects().len(), 27);
    }

    #[test]
    fn radius_query_filters_by_euclidean_distance() {
        let mut grid = UnitGrid::new();
        grid.insert(IVec3::new(0, 0, 0), stone(0, 0, 0));
        grid.insert(IVec3::new(3, 0, 0), stone(3, 0, 0));
        grid.insert(IVec3::new(3, 3, 3), stone(3, 3, 3));
        let near = grid.objects_in_radius(Vec3A::ZERO, 3.5);
        assert_eq!(near.len(), 2);
    }

    #[test]
    fn stats_reports_culling_percentage() {
        let mut grid = UnitGrid::new();
        assert_eq!(grid.stats(), "Grid: 0 total, 0 visible (0% culled)");
        solid_cube(&mut grid);
        assert_eq!(grid.stats(), "Grid: 27 total, 26 visible (3% culled)");
    }
}
