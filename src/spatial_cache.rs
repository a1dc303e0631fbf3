//! Spatial cache for obstacle lookups.
//!
//! Walls never move, so their cells are indexed once per dungeon. Collision
//! checks then only look at the handful of cells under a box instead of
//! every wall entity in the world.

use std::collections::HashSet;

use hecs::World;

use crate::components::{GridCell, Wall};
use crate::geometry::Aabb;
use crate::grid::{Cell, Grid};

/// Cached wall cells keyed by grid coordinate.
#[derive(Debug, Clone, Default)]
pub struct SpatialCache {
    /// Cells holding a wall entity
    blocking: HashSet<Cell>,
}

impl SpatialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build cache from current world state.
    /// Called on initialization and dungeon regeneration.
    pub fn rebuild_from_world(world: &World) -> Self {
        let mut cache = Self::new();
        cache.rebuild_in_place(world);
        cache
    }

    pub fn rebuild_in_place(&mut self, world: &World) {
        self.blocking.clear();
        for (_, (cell, _)) in world.query::<(&GridCell, &Wall)>().iter() {
            self.blocking.insert(cell.0);
        }
    }

    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocking.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.blocking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocking.is_empty()
    }

    /// World boxes of the walls under `area`.
    pub fn obstacles_near(&self, grid: &Grid, area: &Aabb) -> Vec<Aabb> {
        grid.cells_overlapping(area)
            .filter(|cell| self.is_blocked(*cell))
            .map(|cell| grid.cell_rect(cell))
            .collect()
    }

    /// Whether `area` strictly overlaps any wall.
    pub fn hits_wall(&self, grid: &Grid, area: &Aabb) -> bool {
        grid.cells_overlapping(area)
            .filter(|cell| self.is_blocked(*cell))
            .any(|cell| grid.cell_rect(cell).overlaps(area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn setup() -> (World, Grid, SpatialCache) {
        let grid = Grid::new(4, 4, 10.0);
        let mut world = World::new();
        world.spawn((GridCell(Cell::new(1, 1)), Wall));
        world.spawn((GridCell(Cell::new(2, 1)),));
        let cache = SpatialCache::rebuild_from_world(&world);
        (world, grid, cache)
    }

    #[test]
    fn test_rebuild_indexes_only_walls() {
        let (_, _, cache) = setup();
        assert_eq!(cache.len(), 1);
        assert!(cache.is_blocked(Cell::new(1, 1)));
        assert!(!cache.is_blocked(Cell::new(2, 1)));
    }

    #[test]
    fn test_touching_wall_is_not_a_hit() {
        let (_, grid, cache) = setup();
        let touching = Aabb::from_min_size(Vec2::new(20.0, 10.0), Vec2::splat(5.0));
        assert!(!cache.hits_wall(&grid, &touching));
        let inside = touching.translated(Vec2::new(-1.0, 0.0));
        assert!(cache.hits_wall(&grid, &inside));
        assert_eq!(cache.obstacles_near(&grid, &inside).len(), 1);
    }
}
