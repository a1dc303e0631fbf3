use rand::distributions::WeightedIndex;
use rand::prelude::*;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::geometry::Aabb;
use crate::grid::{Cell, Grid};
use crate::tile::TileType;
use crate::walk_graph::WalkGraph;

/// A rectangle representing a room, in cell units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a cell is inside this rectangle
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.x
            && cell.x < self.x + self.width
            && cell.y >= self.y
            && cell.y < self.y + self.height
    }

    /// Interiors overlap; rooms that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let Rect { x, y, width, height } = *self;
        (y..y + height).flat_map(move |cy| (x..x + width).map(move |cx| Cell::new(cx, cy)))
    }

    /// World-space box of the room.
    pub fn world_rect(&self, tile_size: f32) -> Aabb {
        Aabb::from_min_size(
            glam::Vec2::new(self.x as f32, self.y as f32) * tile_size,
            glam::Vec2::new(self.width as f32, self.height as f32) * tile_size,
        )
    }
}

/// Result of dungeon generation
#[derive(Debug, Clone)]
pub struct DungeonResult {
    pub grid: Grid,
    /// Accepted rooms in acceptance order; the first one is the player's spawn room.
    pub rooms: Vec<Rect>,
    pub chest_positions: Vec<Cell>,
    pub graph: WalkGraph,
}

impl DungeonResult {
    pub fn starting_room(&self) -> Option<Rect> {
        self.rooms.first().copied()
    }
}

/// Single-use room-and-tunnel dungeon builder.
pub struct DungeonGenerator<'a> {
    config: &'a GameConfig,
    grid: Grid,
    rooms: Vec<Rect>,
    chest_positions: Vec<Cell>,
    /// `None` when the configured weights cannot be sampled; rooms then get no chests.
    chest_count: Option<WeightedIndex<f32>>,
}

impl<'a> DungeonGenerator<'a> {
    /// Generate a dungeon. The layout is fully determined by `rng`'s sequence.
    pub fn generate(config: &'a GameConfig, rng: &mut impl Rng) -> DungeonResult {
        puffin::profile_function!();

        let mut gen = Self::new(config);

        for _ in 0..config.dungeon.room_attempts {
            let candidate = gen.random_room(rng);
            if gen.rooms.iter().any(|room| room.intersects(&candidate)) {
                continue;
            }
            gen.carve_room(&candidate, rng);
            if let Some(previous) = gen.rooms.last().copied() {
                gen.carve_tunnel(&candidate, &previous);
            }
            gen.rooms.push(candidate);
        }

        // Best-effort extra link between the first and last rooms
        if let (Some(first), Some(last)) = (gen.rooms.first().copied(), gen.rooms.last().copied()) {
            gen.carve_tunnel(&first, &last);
        }

        let graph = WalkGraph::build(&gen.grid);
        info!(
            rooms = gen.rooms.len(),
            chests = gen.chest_positions.len(),
            nodes = graph.node_count(),
            "dungeon generated"
        );

        DungeonResult {
            grid: gen.grid,
            rooms: gen.rooms,
            chest_positions: gen.chest_positions,
            graph,
        }
    }

    fn new(config: &'a GameConfig) -> Self {
        let chest_count = WeightedIndex::new(config.dungeon.chest_weights).ok();
        Self {
            config,
            grid: Grid::new(config.map.width, config.map.height, config.map.tile_size),
            rooms: Vec::new(),
            chest_positions: Vec::new(),
            chest_count,
        }
    }

    /// Random room inset one cell from the map border.
    fn random_room(&self, rng: &mut impl Rng) -> Rect {
        let dungeon = &self.config.dungeon;
        let width = rng.gen_range(dungeon.min_room_size..=dungeon.max_room_size);
        let height = rng.gen_range(dungeon.min_room_size..=dungeon.max_room_size);
        let x = rng.gen_range(1..self.grid.width as i32 - width - 1);
        let y = rng.gen_range(1..self.grid.height as i32 - height - 1);
        Rect::new(x, y, width, height)
    }

    fn carve_room(&mut self, room: &Rect, rng: &mut impl Rng) {
        for cell in room.cells() {
            self.grid.set(cell.x, cell.y, TileType::Floor);
        }

        let count = self.chest_count.as_ref().map_or(0, |weights| weights.sample(rng));
        let free: Vec<Cell> = room
            .cells()
            .filter(|c| self.grid.get(c.x, c.y) == Some(TileType::Floor))
            .collect();
        for cell in free.choose_multiple(rng, count) {
            self.grid.set(cell.x, cell.y, TileType::Chest);
            self.chest_positions.push(*cell);
        }
        debug!(?room, chests = count.min(free.len()), "room carved");
    }

    /// L-shaped tunnel: horizontal along `from`'s row, then vertical along `to`'s column.
    fn carve_tunnel(&mut self, from: &Rect, to: &Rect) {
        let a = from.center();
        let b = to.center();
        self.carve_h_corridor(a.x, b.x, a.y);
        self.carve_v_corridor(a.y, b.y, b.x);
    }

    fn carve_h_corridor(&mut self, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.carve_corridor_cell(x, y);
        }
    }

    fn carve_v_corridor(&mut self, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.carve_corridor_cell(x, y);
        }
    }

    /// Corridors only open walls; chests they cross are kept.
    fn carve_corridor_cell(&mut self, x: i32, y: i32) {
        if self.grid.get(x, y) == Some(TileType::Wall) {
            self.grid.set(x, y, TileType::Floor);
        }
    }
}
