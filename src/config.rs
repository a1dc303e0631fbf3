//! Static game configuration.
//!
//! Every tunable number the core reads lives here. Defaults mirror
//! [`crate::constants`]; a JSON file may override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::spawning::EnemyKind;
use crate::weapons::{WeaponKind, WeaponStats};

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for this schema.
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value parsed fine but cannot drive the simulation.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Cell side in world units
    pub tile_size: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            tile_size: TILE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub room_attempts: u32,
    /// Room sides are drawn from `min_room_size..=max_room_size` cells
    pub min_room_size: i32,
    pub max_room_size: i32,
    /// Weights for 0, 1 and 2 chests per room
    pub chest_weights: [f32; 3],
    pub chest_item_min: u32,
    pub chest_item_max: u32,
    pub chest_size: f32,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            room_attempts: DUNGEON_ROOM_ATTEMPTS,
            min_room_size: DUNGEON_MIN_ROOM_SIZE,
            max_room_size: DUNGEON_MAX_ROOM_SIZE,
            chest_weights: CHEST_COUNT_WEIGHTS,
            chest_item_min: CHEST_ITEM_MIN_VALUE,
            chest_item_max: CHEST_ITEM_MAX_VALUE,
            chest_size: CHEST_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: f32,
    pub speed: f32,
    pub starting_ammo: u32,
    pub inventory_size: usize,
    pub width: f32,
    pub height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: PLAYER_MAX_HEALTH,
            speed: PLAYER_SPEED,
            starting_ammo: PLAYER_STARTING_AMMO,
            inventory_size: INVENTORY_SIZE,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub muzzle_offset: f32,
    pub size: f32,
    /// Aim error (degrees, either side) of an enemy with zero accuracy
    pub enemy_max_aim_error_degrees: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            muzzle_offset: PROJECTILE_MUZZLE_OFFSET,
            size: PROJECTILE_SIZE,
            enemy_max_aim_error_degrees: ENEMY_MAX_AIM_ERROR_DEGREES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub minute_points: u32,
    pub elimination_points: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            minute_points: MINUTE_POINTS,
            elimination_points: ELIM_POINTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub growth: f32,
    pub regeneration_interval: u32,
    pub first_wave_size: u32,
    pub wave_min_size: u32,
    pub wave_max_size: u32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            growth: DIFFICULTY_GROWTH,
            regeneration_interval: REGENERATION_INTERVAL,
            first_wave_size: FIRST_WAVE_SIZE,
            wave_min_size: WAVE_MIN_SIZE,
            wave_max_size: WAVE_MAX_SIZE,
        }
    }
}

impl DifficultyConfig {
    /// Stat multiplier for enemies created on `level` (level 1 is unscaled).
    pub fn multiplier(&self, level: u32) -> f32 {
        self.growth.powi(level.saturating_sub(1) as i32)
    }
}

/// Base stats for each weapon kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTable {
    pub pistol: WeaponStats,
    pub assault_rifle: WeaponStats,
    pub shotgun: WeaponStats,
    pub sniper: WeaponStats,
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            pistol: WeaponStats::single(
                PISTOL_MAGAZINE,
                PISTOL_DAMAGE,
                PISTOL_FIRE_INTERVAL,
                PISTOL_RELOAD_TIME,
            ),
            assault_rifle: WeaponStats::single(
                ASSAULT_RIFLE_MAGAZINE,
                ASSAULT_RIFLE_DAMAGE,
                ASSAULT_RIFLE_FIRE_INTERVAL,
                ASSAULT_RIFLE_RELOAD_TIME,
            ),
            shotgun: WeaponStats {
                pellets: SHOTGUN_PELLETS,
                spread_degrees: SHOTGUN_SPREAD_DEGREES,
                ..WeaponStats::single(
                    SHOTGUN_MAGAZINE,
                    SHOTGUN_DAMAGE,
                    SHOTGUN_FIRE_INTERVAL,
                    SHOTGUN_RELOAD_TIME,
                )
            },
            sniper: WeaponStats::single(
                SNIPER_MAGAZINE,
                SNIPER_DAMAGE,
                SNIPER_FIRE_INTERVAL,
                SNIPER_RELOAD_TIME,
            ),
        }
    }
}

impl WeaponTable {
    pub fn stats(&self, kind: WeaponKind) -> &WeaponStats {
        match kind {
            WeaponKind::Pistol => &self.pistol,
            WeaponKind::AssaultRifle => &self.assault_rifle,
            WeaponKind::Shotgun => &self.shotgun,
            WeaponKind::Sniper => &self.sniper,
        }
    }
}

/// Base (level 1) stats for one enemy variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: f32,
    pub speed: f32,
    pub accuracy: f32,
    pub range: f32,
    pub weapon: WeaponKind,
    /// Per-shot damage, replacing the weapon's own
    pub damage: f32,
    /// Minimum seconds between shots, replacing the weapon's own
    pub fire_interval: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    pub width: f32,
    pub height: f32,
    pub grunt: EnemyStats,
    pub shotgunner: EnemyStats,
    pub sniper: EnemyStats,
}

impl Default for EnemyTable {
    fn default() -> Self {
        let grunt = EnemyStats {
            health: GRUNT_HEALTH,
            speed: GRUNT_SPEED,
            accuracy: GRUNT_ACCURACY,
            range: GRUNT_RANGE,
            weapon: WeaponKind::Pistol,
            damage: GRUNT_DAMAGE,
            fire_interval: GRUNT_FIRE_INTERVAL,
        };
        Self {
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            shotgunner: EnemyStats {
                range: SHOTGUNNER_RANGE,
                weapon: WeaponKind::Shotgun,
                damage: SHOTGUNNER_DAMAGE,
                fire_interval: SHOTGUN_FIRE_INTERVAL,
                ..grunt.clone()
            },
            sniper: EnemyStats {
                range: SNIPER_RANGE,
                accuracy: SNIPER_ACCURACY,
                weapon: WeaponKind::Sniper,
                damage: SNIPER_DAMAGE,
                fire_interval: SNIPER_FIRE_INTERVAL,
                ..grunt.clone()
            },
            grunt,
        }
    }
}

impl EnemyTable {
    pub fn stats(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::Grunt => &self.grunt,
            EnemyKind::Shotgunner => &self.shotgunner,
            EnemyKind::Sniper => &self.sniper,
        }
    }
}

/// Complete configuration handed to the engine at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the run's random source; `None` draws one from the OS
    pub seed: Option<u64>,
    pub screen: ScreenConfig,
    pub map: MapConfig,
    pub dungeon: DungeonConfig,
    pub player: PlayerConfig,
    pub projectile: ProjectileConfig,
    pub score: ScoreConfig,
    pub difficulty: DifficultyConfig,
    pub weapons: WeaponTable,
    pub enemies: EnemyTable,
}

impl GameConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the generator or simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.map.tile_size > 0.0) {
            return Err(invalid("map.tile_size", "must be positive"));
        }
        let d = &self.dungeon;
        if d.min_room_size < 2 {
            return Err(invalid("dungeon.min_room_size", "must be at least 2 cells"));
        }
        if d.max_room_size < d.min_room_size {
            return Err(invalid(
                "dungeon.max_room_size",
                "must not be smaller than min_room_size",
            ));
        }
        // Rooms are inset one cell from the border and need at least one
        // candidate position left over.
        if (self.map.width as i32) < d.max_room_size + 3 {
            return Err(invalid(
                "map.width",
                format!("needs at least {} cells", d.max_room_size + 3),
            ));
        }
        if (self.map.height as i32) < d.max_room_size + 3 {
            return Err(invalid(
                "map.height",
                format!("needs at least {} cells", d.max_room_size + 3),
            ));
        }
        if d.chest_weights.iter().any(|w| *w < 0.0) || d.chest_weights.iter().sum::<f32>() <= 0.0 {
            return Err(invalid(
                "dungeon.chest_weights",
                "must be non-negative with a positive sum",
            ));
        }
        if d.chest_item_min > d.chest_item_max {
            return Err(invalid(
                "dungeon.chest_item_min",
                "must not exceed chest_item_max",
            ));
        }
        if self.player.inventory_size == 0 {
            return Err(invalid("player.inventory_size", "must hold at least one weapon"));
        }
        if !(self.player.max_health > 0.0) {
            return Err(invalid("player.max_health", "must be positive"));
        }
        let diff = &self.difficulty;
        if !(diff.growth > 0.0) {
            return Err(invalid("difficulty.growth", "must be positive"));
        }
        if diff.regeneration_interval == 0 {
            return Err(invalid("difficulty.regeneration_interval", "must be at least 1"));
        }
        if diff.wave_min_size > diff.wave_max_size {
            return Err(invalid(
                "difficulty.wave_min_size",
                "must not exceed wave_max_size",
            ));
        }
        for kind in WeaponKind::ALL {
            let stats = self.weapons.stats(kind);
            if stats.magazine == 0 {
                return Err(invalid("weapons.magazine", format!("{} holds no rounds", kind.name())));
            }
            if stats.pellets == 0 {
                return Err(invalid("weapons.pellets", format!("{} fires nothing", kind.name())));
            }
        }
        for kind in EnemyKind::ALL {
            let stats = self.enemies.stats(kind);
            if !(0.0..=1.0).contains(&stats.accuracy) {
                return Err(invalid("enemies.accuracy", "must lie in [0, 1]"));
            }
        }
        Ok(())
    }
}
