//! Weapon and projectile constants.

/// Projectile travel per frame
pub const PROJECTILE_SPEED: f32 = 20.0;
/// Distance ahead of the firer's center where projectiles appear
pub const PROJECTILE_MUZZLE_OFFSET: f32 = 30.0;
/// Projectile hitbox side
pub const PROJECTILE_SIZE: f32 = 8.0;

/// Pellets per shotgun trigger pull
pub const SHOTGUN_PELLETS: u32 = 3;
/// Angle between neighbouring shotgun pellets (degrees)
pub const SHOTGUN_SPREAD_DEGREES: f32 = 10.0;
/// Aim error of an enemy with accuracy 0 (degrees, either side)
pub const ENEMY_MAX_AIM_ERROR_DEGREES: f32 = 10.0;

// PISTOL
pub const PISTOL_MAGAZINE: u32 = 15;
pub const PISTOL_DAMAGE: f32 = 15.0;
/// Minimum seconds between shots
pub const PISTOL_FIRE_INTERVAL: f32 = 0.2;
/// Reload time in seconds
pub const PISTOL_RELOAD_TIME: f32 = 1.0;

// ASSAULT RIFLE
pub const ASSAULT_RIFLE_MAGAZINE: u32 = 30;
pub const ASSAULT_RIFLE_DAMAGE: f32 = 20.0;
pub const ASSAULT_RIFLE_FIRE_INTERVAL: f32 = 0.075;
pub const ASSAULT_RIFLE_RELOAD_TIME: f32 = 1.75;

// SHOTGUN
pub const SHOTGUN_MAGAZINE: u32 = 12;
pub const SHOTGUN_DAMAGE: f32 = 17.0;
pub const SHOTGUN_FIRE_INTERVAL: f32 = 0.75;
pub const SHOTGUN_RELOAD_TIME: f32 = 1.2;

// SNIPER RIFLE (enemy only)
pub const SNIPER_MAGAZINE: u32 = 1;
pub const SNIPER_DAMAGE: f32 = 25.0;
pub const SNIPER_FIRE_INTERVAL: f32 = 2.5;
pub const SNIPER_RELOAD_TIME: f32 = 2.5;
