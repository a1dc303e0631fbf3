//! Level construction - runs the generator and spawns the entities it describes.

use crate::components::{GridCell, Position, Wall};
use crate::config::GameConfig;
use crate::dungeon_gen::{DungeonGenerator, DungeonResult, Rect};
use crate::grid::Grid;
use crate::spatial_cache::SpatialCache;
use crate::spawning;
use crate::tile::TileType;
use crate::walk_graph::WalkGraph;

use hecs::{Entity, World};
use rand::Rng;

/// A freshly generated dungeon with its world populated.
pub struct LevelSetup {
    pub world: World,
    pub grid: Grid,
    pub rooms: Vec<Rect>,
    pub graph: WalkGraph,
    pub walls: SpatialCache,
    pub player: Entity,
}

/// Spawn one wall entity per wall cell.
fn spawn_walls(world: &mut World, grid: &Grid) {
    let walls: Vec<(GridCell, Wall, Position)> = grid
        .cells()
        .filter(|(_, tile)| *tile == TileType::Wall)
        .map(|(cell, _)| (GridCell(cell), Wall, Position(grid.cell_center(cell))))
        .collect();
    world.spawn_batch(walls);
}

/// Spawn all chests from grid positions with randomized contents.
fn spawn_chests(world: &mut World, config: &GameConfig, dungeon: &DungeonResult, rng: &mut impl Rng) {
    for cell in &dungeon.chest_positions {
        spawning::spawn_chest(world, config, dungeon.grid.cell_center(*cell), rng);
    }
}

/// Where the player starts: the center of the first room, or the middle of
/// the map when no room was placed.
pub fn player_start(dungeon: &DungeonResult, tile_size: f32) -> glam::Vec2 {
    dungeon
        .starting_room()
        .map(|room| room.world_rect(tile_size).center())
        .unwrap_or_else(|| dungeon.grid.bounds().center())
}

/// Generate a dungeon and build the world for it: walls, chests, then the
/// player. Enemies are spawned separately per wave.
pub fn build_level(config: &GameConfig, rng: &mut impl Rng) -> LevelSetup {
    puffin::profile_function!();

    let dungeon = DungeonGenerator::generate(config, rng);
    let mut world = World::new();

    spawn_walls(&mut world, &dungeon.grid);
    spawn_chests(&mut world, config, &dungeon, rng);
    let start = player_start(&dungeon, config.map.tile_size);
    let player = spawning::spawn_player(&mut world, config, start);

    let walls = SpatialCache::rebuild_from_world(&world);
    let DungeonResult {
        grid, rooms, graph, ..
    } = dungeon;

    LevelSetup {
        world,
        grid,
        rooms,
        graph,
        walls,
        player,
    }
}
