use glam::Vec2;
use serde::Serialize;

use crate::geometry::Aabb;
use crate::tile::TileType;

/// Integer grid coordinate of one cell. Ordered row-major so it can break
/// ties in priority queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    pub y: i32,
    pub x: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn is_adjacent(&self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

/// Fixed-size map of cell tags. Cell (0, 0) has its top-left corner at the
/// world origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub tiles: Vec<TileType>,
}

impl Grid {
    /// A grid filled with walls.
    pub fn new(width: usize, height: usize, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            tiles: vec![TileType::Wall; width * height],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<TileType> {
        self.index(x, y).map(|idx| self.tiles[idx])
    }

    pub fn set(&mut self, x: i32, y: i32, tile_type: TileType) {
        if let Some(idx) = self.index(x, y) {
            self.tiles[idx] = tile_type;
        }
    }

    /// Out-of-bounds cells count as walls.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map(|t| t.is_walkable()).unwrap_or(false)
    }

    /// Every cell with its tag, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, TileType)> + '_ {
        self.tiles.iter().enumerate().map(move |(idx, tile)| {
            let cell = Cell::new((idx % self.width) as i32, (idx / self.width) as i32);
            (cell, *tile)
        })
    }

    pub fn count(&self, tile_type: TileType) -> usize {
        self.tiles.iter().filter(|t| **t == tile_type).count()
    }

    /// World-space box covered by a cell.
    pub fn cell_rect(&self, cell: Cell) -> Aabb {
        Aabb::from_min_size(
            Vec2::new(cell.x as f32, cell.y as f32) * self.tile_size,
            Vec2::splat(self.tile_size),
        )
    }

    /// Canonical world-space center of a cell; the key pathfinding snaps to.
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        (Vec2::new(cell.x as f32, cell.y as f32) + 0.5) * self.tile_size
    }

    /// The in-bounds cell containing a world point.
    pub fn cell_at(&self, point: Vec2) -> Option<Cell> {
        let x = (point.x / self.tile_size).floor() as i32;
        let y = (point.y / self.tile_size).floor() as i32;
        self.index(x, y).map(|_| Cell::new(x, y))
    }

    /// Cells whose boxes intersect `area`, clamped to the grid.
    pub fn cells_overlapping(&self, area: &Aabb) -> impl Iterator<Item = Cell> {
        let max_x = self.width as i32 - 1;
        let max_y = self.height as i32 - 1;
        let x0 = ((area.min.x / self.tile_size).floor() as i32).clamp(0, max_x.max(0));
        let y0 = ((area.min.y / self.tile_size).floor() as i32).clamp(0, max_y.max(0));
        let x1 = ((area.max.x / self.tile_size).floor() as i32).clamp(-1, max_x);
        let y1 = ((area.max.y / self.tile_size).floor() as i32).clamp(-1, max_y);
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| Cell::new(x, y)))
    }

    /// World-space box covering the whole map.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_min_size(
            Vec2::ZERO,
            Vec2::new(self.width as f32, self.height as f32) * self.tile_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_walls() {
        let grid = Grid::new(4, 3, 10.0);
        assert_eq!(grid.count(TileType::Wall), 12);
        assert!(!grid.is_walkable(1, 1));
    }

    #[test]
    fn test_out_of_bounds_reads_as_wall() {
        let grid = Grid::new(4, 3, 10.0);
        assert_eq!(grid.get(-1, 0), None);
        assert!(!grid.is_walkable(4, 0));
    }

    #[test]
    fn test_cell_center_and_lookup_agree() {
        let grid = Grid::new(10, 10, 90.0);
        let cell = Cell::new(3, 7);
        let center = grid.cell_center(cell);
        assert_eq!(center, Vec2::new(315.0, 675.0));
        assert_eq!(grid.cell_at(center), Some(cell));
        assert_eq!(grid.cell_at(Vec2::new(-1.0, 5.0)), None);
    }

    #[test]
    fn test_cells_overlapping_covers_straddled_cells() {
        let grid = Grid::new(10, 10, 10.0);
        let area = Aabb::from_min_size(Vec2::new(15.0, 5.0), Vec2::new(10.0, 10.0));
        let cells: Vec<_> = grid.cells_overlapping(&area).collect();
        assert_eq!(cells.len(), 4);
        assert!(cells.contains(&Cell::new(1, 0)));
        assert!(cells.contains(&Cell::new(2, 1)));
    }
}
