//! Data-driven entity spawning.
//!
//! Enemy variants differ only in their stat block (see
//! [`crate::config::EnemyTable`]), so one spawn path serves all of them.
//! Difficulty scaling is applied here, once, when an enemy is created.

use glam::Vec2;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{
    Body, Chest, Enemy, Faction, Health, Item, Loadout, Player, Position, Projectile, Speed,
};
use crate::config::GameConfig;
use crate::dungeon_gen::Rect;
use crate::weapons::{AmmoReserve, Shot, Weapon, WeaponKind};

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Pistol, medium range
    Grunt,
    /// Shotgun, short range
    Shotgunner,
    /// Single-round rifle, long range and accurate
    Sniper,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Grunt, EnemyKind::Shotgunner, EnemyKind::Sniper];

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Grunt => "grunt",
            EnemyKind::Shotgunner => "shotgunner",
            EnemyKind::Sniper => "sniper",
        }
    }
}

/// Spawn the player with a pistol and the starting reserve.
pub fn spawn_player(world: &mut World, config: &GameConfig, center: Vec2) -> Entity {
    let player = &config.player;
    let pistol = Weapon::new(
        WeaponKind::Pistol,
        config.weapons.stats(WeaponKind::Pistol).clone(),
    );
    world.spawn((
        Player,
        Position(center),
        Body::new(Vec2::new(player.width, player.height)),
        Speed(player.speed),
        Health::new(player.max_health),
        Loadout::new(
            pistol,
            AmmoReserve::Finite(player.starting_ammo),
            player.inventory_size,
        ),
    ))
}

/// Spawn one enemy with stats scaled for `level`.
pub fn spawn_enemy(
    world: &mut World,
    config: &GameConfig,
    kind: EnemyKind,
    level: u32,
    center: Vec2,
) -> Entity {
    let base = config.enemies.stats(kind);
    let multiplier = config.difficulty.multiplier(level);

    let mut weapon_stats = config.weapons.stats(base.weapon).clone();
    weapon_stats.damage = base.damage * multiplier;
    weapon_stats.fire_interval = base.fire_interval;

    world.spawn((
        Enemy {
            kind,
            accuracy: (base.accuracy * multiplier).min(1.0),
            range: base.range * multiplier,
        },
        Position(center),
        Body::new(Vec2::new(config.enemies.width, config.enemies.height)),
        Speed(base.speed * multiplier),
        Health::new(base.health * multiplier),
        Loadout::new(Weapon::new(base.weapon, weapon_stats), AmmoReserve::Infinite, 1),
    ))
}

/// What a wave spawn produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveReport {
    pub kind: EnemyKind,
    pub requested: usize,
    pub spawned: usize,
}

/// Spawn the wave for `level`: one grunt on the first level, otherwise 3-5
/// enemies of a single random kind. Each enemy takes a distinct room the
/// player is not standing in; the wave is cut short when rooms run out.
pub fn spawn_wave(
    world: &mut World,
    config: &GameConfig,
    rooms: &[Rect],
    player_pos: Vec2,
    level: u32,
    rng: &mut impl Rng,
) -> WaveReport {
    let difficulty = &config.difficulty;
    let (kind, requested) = if level <= 1 {
        (EnemyKind::Grunt, difficulty.first_wave_size as usize)
    } else {
        let count = rng.gen_range(difficulty.wave_min_size..=difficulty.wave_max_size) as usize;
        let kind = *EnemyKind::ALL.choose(rng).unwrap_or(&EnemyKind::Grunt);
        (kind, count)
    };

    let tile_size = config.map.tile_size;
    let occupied = rooms
        .iter()
        .position(|room| room.world_rect(tile_size).contains_point(player_pos));
    let free: Vec<&Rect> = rooms
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != occupied)
        .map(|(_, room)| room)
        .collect();

    let mut spawned = 0;
    for room in free.choose_multiple(rng, requested) {
        spawn_enemy(world, config, kind, level, room.world_rect(tile_size).center());
        spawned += 1;
    }

    WaveReport {
        kind,
        requested,
        spawned,
    }
}

/// Roll a chest's item: category uniformly among weapon / health / ammo.
pub fn roll_item(config: &GameConfig, rng: &mut impl Rng) -> Item {
    let (min, max) = (config.dungeon.chest_item_min, config.dungeon.chest_item_max);
    match rng.gen_range(0..3) {
        0 => {
            let weapon = if rng.gen_bool(0.5) {
                WeaponKind::Shotgun
            } else {
                WeaponKind::AssaultRifle
            };
            Item::Weapon(weapon)
        }
        1 => Item::Health(rng.gen_range(min..=max)),
        _ => Item::Ammo(rng.gen_range(min..=max)),
    }
}

/// Spawn a chest centered on `center` holding a freshly rolled item.
pub fn spawn_chest(world: &mut World, config: &GameConfig, center: Vec2, rng: &mut impl Rng) -> Entity {
    let item = roll_item(config, rng);
    world.spawn((
        Chest { item },
        Position(center),
        Body::new(Vec2::splat(config.dungeon.chest_size)),
    ))
}

/// Spawn a projectile for `shot`, pushed forward of the firer's center so it
/// does not start inside the firer.
pub fn spawn_projectile(
    world: &mut World,
    config: &GameConfig,
    source: Entity,
    faction: Faction,
    origin: Vec2,
    shot: Shot,
) -> Entity {
    let direction = Vec2::from_angle(shot.angle);
    world.spawn((
        Projectile {
            direction,
            speed: config.projectile.speed,
            damage: shot.damage,
            faction,
            source,
        },
        Position(origin + direction * config.projectile.muzzle_offset),
        Body::new(Vec2::splat(config.projectile.size)),
    ))
}
