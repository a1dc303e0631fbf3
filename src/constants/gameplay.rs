//! Core gameplay constants (player stats, scoring, difficulty).

/// Player's maximum (and starting) health
pub const PLAYER_MAX_HEALTH: f32 = 150.0;
/// Player movement per frame in world units
pub const PLAYER_SPEED: f32 = 5.0;
/// Reserve rounds the player starts with
pub const PLAYER_STARTING_AMMO: u32 = 50;
/// Weapons the player can carry
pub const INVENTORY_SIZE: usize = 3;
/// Player hitbox width at facing angle 0
pub const PLAYER_WIDTH: f32 = 60.0;
/// Player hitbox height at facing angle 0
pub const PLAYER_HEIGHT: f32 = 40.0;

/// Points for every whole minute survived
pub const MINUTE_POINTS: u32 = 5;
/// Points for every enemy eliminated
pub const ELIM_POINTS: u32 = 10;

/// Per-level growth factor applied to enemy stats
pub const DIFFICULTY_GROWTH: f32 = 1.05;
/// A fresh dungeon is generated every this many levels
pub const REGENERATION_INTERVAL: u32 = 5;
