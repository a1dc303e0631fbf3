//! Core game state - owns the simulation data.

use crate::camera::Camera;
use crate::config::GameConfig;
use crate::dungeon_gen::Rect;
use crate::grid::Grid;
use crate::queries;
use crate::score::ScoreKeeper;
use crate::spatial_cache::SpatialCache;
use crate::walk_graph::WalkGraph;

use hecs::{Entity, World};
use rand::Rng;

use super::initialization::{self, LevelSetup};

/// Core game state - owns all simulation data.
pub struct GameState {
    /// The ECS world
    pub world: World,

    /// Current dungeon grid
    pub grid: Grid,

    /// Rooms of the current dungeon, first is the spawn room
    pub rooms: Vec<Rect>,

    /// Walkability graph of the current grid
    pub graph: WalkGraph,

    /// Wall cells for collision lookups
    pub walls: SpatialCache,

    /// Player entity handle
    pub player: Entity,

    /// Current level, starting at 1
    pub level: u32,

    pub camera: Camera,

    pub score: ScoreKeeper,

    /// Simulation seconds since the run started
    pub clock: f64,

    /// Frames stepped so far
    pub frame: u64,

    /// Set once the player has died
    pub over: bool,
}

impl GameState {
    /// Generate the first dungeon and place the player in it.
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let LevelSetup {
            world,
            grid,
            rooms,
            graph,
            walls,
            player,
        } = initialization::build_level(config, rng);

        let mut state = Self {
            world,
            grid,
            rooms,
            graph,
            walls,
            player,
            level: 1,
            camera: Camera::new(config.screen.width, config.screen.height),
            score: ScoreKeeper::new(&config.score),
            clock: 0.0,
            frame: 0,
            over: false,
        };
        state.recenter_camera();
        state
    }

    /// Replace the dungeon and everything in it with a freshly built level.
    pub fn install(&mut self, setup: LevelSetup) {
        let LevelSetup {
            world,
            grid,
            rooms,
            graph,
            walls,
            player,
        } = setup;
        self.world = world;
        self.grid = grid;
        self.rooms = rooms;
        self.graph = graph;
        self.walls = walls;
        self.player = player;
        self.recenter_camera();
    }

    /// Put the player back at the screen center.
    pub fn recenter_camera(&mut self) {
        if let Some(pos) = self.player_position() {
            self.camera.recenter(pos);
        }
    }

    pub fn player_position(&self) -> Option<glam::Vec2> {
        queries::get_entity_position(&self.world, self.player)
    }
}
