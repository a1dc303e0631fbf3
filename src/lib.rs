//! Dungeon Destruction core: procedural dungeon generation, tile-graph
//! pathfinding and the real-time combat loop of a top-down shooter.
//!
//! The crate is headless. A shell feeds [`input::InputFrame`]s into
//! [`engine::GameEngine::step`] and draws the [`snapshot::FrameSnapshot`]
//! it returns.

pub mod autopilot;
pub mod camera;
pub mod components;
pub mod config;
pub mod constants;
pub mod dungeon_gen;
pub mod engine;
pub mod events;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod leaderboard;
pub mod pathfinding;
pub mod queries;
pub mod score;
pub mod snapshot;
pub mod spatial_cache;
pub mod spawning;
pub mod systems;
pub mod tile;
pub mod walk_graph;
pub mod weapons;

pub use config::GameConfig;
pub use engine::GameEngine;
