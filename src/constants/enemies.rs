//! Enemy stats and wave constants.

/// Enemy hitbox width at facing angle 0
pub const ENEMY_WIDTH: f32 = 50.0;
/// Enemy hitbox height at facing angle 0
pub const ENEMY_HEIGHT: f32 = 50.0;

/// Enemies in the very first wave
pub const FIRST_WAVE_SIZE: u32 = 1;
/// Fewest enemies in a later wave
pub const WAVE_MIN_SIZE: u32 = 3;
/// Most enemies in a later wave
pub const WAVE_MAX_SIZE: u32 = 5;

// GRUNT
pub const GRUNT_HEALTH: f32 = 40.0;
pub const GRUNT_SPEED: f32 = 3.0;
/// Accuracy in [0, 1]; 1 means no aim error
pub const GRUNT_ACCURACY: f32 = 0.6;
/// Firing range in world units
pub const GRUNT_RANGE: f32 = 300.0;
/// Grunts carry a weakened pistol
pub const GRUNT_DAMAGE: f32 = 3.0;
pub const GRUNT_FIRE_INTERVAL: f32 = 0.7;

// SHOTGUNNER
pub const SHOTGUNNER_RANGE: f32 = 200.0;
pub const SHOTGUNNER_DAMAGE: f32 = 4.0;

// SNIPER
pub const SNIPER_RANGE: f32 = 350.0;
pub const SNIPER_ACCURACY: f32 = 0.8;
