//! Combat system functions: firing, reloads, damage and the per-frame
//! collision pass.

use std::collections::HashSet;

use hecs::{Entity, World};
use tracing::debug;

use crate::components::{Body, Chest, Enemy, Faction, Health, Item, Loadout, Position, Projectile};
use crate::config::GameConfig;
use crate::events::{EventQueue, GameEvent};
use crate::geometry::Aabb;
use crate::grid::Grid;
use crate::queries;
use crate::spatial_cache::SpatialCache;
use crate::spawning;
use crate::systems::items;

/// Reduce an entity's health, clamped at zero. Returns the health left.
pub fn apply_damage(world: &mut World, entity: Entity, amount: f32) -> Option<f32> {
    let mut health = world.get::<&mut Health>(entity).ok()?;
    health.apply_damage(amount);
    Some(health.current)
}

/// Pull the trigger of `shooter`'s equipped weapon toward `aim`.
///
/// Rejected while reloading. With an empty magazine the pull starts a reload
/// instead (when the reserve has rounds). Returns the projectiles spawned.
pub fn fire_weapon(
    world: &mut World,
    config: &GameConfig,
    shooter: Entity,
    faction: Faction,
    aim: f32,
    now: f64,
    events: &mut EventQueue,
) -> usize {
    let Some(origin) = queries::get_entity_position(world, shooter) else {
        return 0;
    };

    let (shots, weapon_kind, reload_started) = {
        let Ok(mut loadout) = world.get::<&mut Loadout>(shooter) else {
            return 0;
        };
        let reserve = loadout.reserve;
        let Some(weapon) = loadout.equipped_mut() else {
            return 0;
        };
        if weapon.is_reloading() {
            return 0;
        }
        if weapon.ammo > 0 {
            (weapon.fire(aim, now), weapon.kind, false)
        } else {
            (Vec::new(), weapon.kind, weapon.start_reload(&reserve, now))
        }
    };

    if reload_started {
        debug!(?shooter, weapon = weapon_kind.name(), "auto reload started");
        events.push(GameEvent::ReloadStarted {
            entity: shooter,
            weapon: weapon_kind,
        });
    }
    if shots.is_empty() {
        return 0;
    }

    for shot in &shots {
        spawning::spawn_projectile(world, config, shooter, faction, origin, *shot);
    }
    events.push(GameEvent::WeaponFired {
        shooter,
        weapon: weapon_kind,
        pellets: shots.len(),
    });
    shots.len()
}

/// Start reloading the equipped weapon.
pub fn start_reload(world: &mut World, entity: Entity, now: f64, events: &mut EventQueue) -> bool {
    let started = {
        let Ok(mut loadout) = world.get::<&mut Loadout>(entity) else {
            return false;
        };
        let started = loadout.reload(now);
        started.then(|| loadout.equipped().map(|w| w.kind)).flatten()
    };
    match started {
        Some(weapon) => {
            debug!(?entity, weapon = weapon.name(), "reload started");
            events.push(GameEvent::ReloadStarted { entity, weapon });
            true
        }
        None => false,
    }
}

/// Finish every due reload on every held weapon, equipped or not.
pub fn poll_reloads(world: &mut World, now: f64, events: &mut EventQueue) {
    for (entity, loadout) in world.query_mut::<&mut Loadout>() {
        let reloading = |l: &Loadout| l.weapons.iter().filter(|w| w.is_reloading()).count();
        let before = reloading(loadout);
        if before == 0 {
            continue;
        }
        let loaded = loadout.poll_reloads(now);
        if reloading(loadout) < before {
            debug!(?entity, loaded, "reload finished");
            events.push(GameEvent::ReloadFinished { entity, loaded });
        }
    }
}

/// Outcome counts of one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub wall_hits: usize,
    pub player_hits: usize,
    pub enemy_hits: usize,
    pub chests_opened: usize,
}

/// Resolve this frame's collisions in a fixed order:
/// 1. projectiles touching a wall are destroyed;
/// 2. enemy projectiles touching the player are destroyed and damage the player;
/// 3. player projectiles touching an enemy are destroyed and damage that enemy;
/// 4. chests touching the player are consumed and their item applied.
///
/// Dead enemies are left in place; they are removed at the start of their
/// own update next frame.
pub fn resolve_collisions(
    world: &mut World,
    grid: &Grid,
    walls: &SpatialCache,
    config: &GameConfig,
    player: Entity,
    events: &mut EventQueue,
) -> CollisionReport {
    puffin::profile_function!();

    let mut report = CollisionReport::default();
    let projectiles: Vec<(Entity, Aabb, Projectile)> = world
        .query::<(&Position, &Body, &Projectile)>()
        .iter()
        .map(|(id, (pos, body, projectile))| (id, body.aabb(pos.0), *projectile))
        .collect();
    let mut consumed: HashSet<Entity> = HashSet::new();

    for (id, hitbox, _) in &projectiles {
        if walls.hits_wall(grid, hitbox) {
            consumed.insert(*id);
            report.wall_hits += 1;
        }
    }

    if let Some(player_box) = queries::get_entity_aabb(world, player) {
        for (id, hitbox, projectile) in &projectiles {
            if projectile.faction != Faction::Enemy
                || consumed.contains(id)
                || !hitbox.overlaps(&player_box)
            {
                continue;
            }
            consumed.insert(*id);
            apply_damage(world, player, projectile.damage);
            events.push(GameEvent::ProjectileHit {
                target: player,
                faction: projectile.faction,
                damage: projectile.damage,
                position: hitbox.center(),
            });
            report.player_hits += 1;
        }
    }

    let enemies: Vec<(Entity, Aabb)> = world
        .query::<(&Enemy, &Position, &Body)>()
        .iter()
        .map(|(id, (_, pos, body))| (id, body.aabb(pos.0)))
        .collect();
    for (id, hitbox, projectile) in &projectiles {
        if projectile.faction != Faction::Player || consumed.contains(id) {
            continue;
        }
        let Some((target, _)) = enemies.iter().find(|(_, enemy_box)| enemy_box.overlaps(hitbox)) else {
            continue;
        };
        consumed.insert(*id);
        apply_damage(world, *target, projectile.damage);
        events.push(GameEvent::ProjectileHit {
            target: *target,
            faction: projectile.faction,
            damage: projectile.damage,
            position: hitbox.center(),
        });
        report.enemy_hits += 1;
    }

    for id in consumed {
        let _ = world.despawn(id);
    }

    report.chests_opened = open_touched_chests(world, config, player, events);
    report
}

/// Consume every chest the player overlaps and apply its item.
fn open_touched_chests(
    world: &mut World,
    config: &GameConfig,
    player: Entity,
    events: &mut EventQueue,
) -> usize {
    let Some(player_box) = queries::get_entity_aabb(world, player) else {
        return 0;
    };
    let touched: Vec<(Entity, Item)> = world
        .query::<(&Chest, &Position, &Body)>()
        .iter()
        .filter(|(_, (_, pos, body))| body.aabb(pos.0).overlaps(&player_box))
        .map(|(id, (chest, _, _))| (id, chest.item))
        .collect();

    for (chest, item) in &touched {
        let _ = world.despawn(*chest);
        let result = items::use_item(world, player, *item, &config.weapons);
        debug!(item = %items::item_name(*item), ?result, "chest opened");
        events.push(GameEvent::ChestOpened {
            item: *item,
            applied: result.applied(),
        });
    }
    touched.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Wall;
    use crate::components::GridCell;
    use crate::grid::Cell;
    use crate::spawning::{spawn_enemy, spawn_player, EnemyKind};
    use crate::tile::TileType;
    use crate::weapons::{AmmoReserve, Shot, WeaponKind};
    use glam::Vec2;

    struct Arena {
        world: World,
        grid: Grid,
        walls: SpatialCache,
        config: GameConfig,
        player: Entity,
        events: EventQueue,
    }

    /// 5x5 cells of floor ringed by walls, player at the center cell.
    fn arena() -> Arena {
        let config = GameConfig::default();
        let mut grid = Grid::new(7, 7, 90.0);
        let mut world = World::new();
        for y in 0..7 {
            for x in 0..7 {
                if x == 0 || y == 0 || x == 6 || y == 6 {
                    world.spawn((GridCell(Cell::new(x, y)), Wall));
                } else {
                    grid.set(x, y, TileType::Floor);
                }
            }
        }
        let walls = SpatialCache::rebuild_from_world(&world);
        let player = spawn_player(&mut world, &config, grid.cell_center(Cell::new(3, 3)));
        Arena {
            world,
            grid,
            walls,
            config,
            player,
            events: EventQueue::new(),
        }
    }

    fn enemy_shot_at(arena: &mut Arena, at: Vec2, damage: f32) {
        let source = arena.world.spawn(());
        arena.world.spawn((
            Position(at),
            Body::new(Vec2::splat(8.0)),
            Projectile {
                direction: Vec2::X,
                speed: 20.0,
                damage,
                faction: Faction::Enemy,
                source,
            },
        ));
    }

    fn resolve(arena: &mut Arena) -> CollisionReport {
        resolve_collisions(
            &mut arena.world,
            &arena.grid,
            &arena.walls,
            &arena.config,
            arena.player,
            &mut arena.events,
        )
    }

    #[test]
    fn test_two_hits_in_one_frame_clamp_health_at_zero() {
        let mut arena = arena();
        arena.world.get::<&mut Health>(arena.player).unwrap().current = 10.0;
        let center = arena.grid.cell_center(Cell::new(3, 3));
        enemy_shot_at(&mut arena, center, 15.0);
        enemy_shot_at(&mut arena, center + Vec2::new(5.0, 0.0), 20.0);

        let report = resolve(&mut arena);
        assert_eq!(report.player_hits, 2);
        let health = *arena.world.get::<&Health>(arena.player).unwrap();
        assert_eq!(health.current, 0.0);
        assert_eq!(arena.world.query::<&Projectile>().iter().count(), 0);
    }

    #[test]
    fn test_wall_destroys_projectile_before_it_can_hit() {
        let mut arena = arena();
        // Player pressed against the left wall; shot overlaps both
        let left = Vec2::new(90.0 + 31.0, arena.grid.cell_center(Cell::new(3, 3)).y);
        arena.world.get::<&mut Position>(arena.player).unwrap().0 = left;
        enemy_shot_at(&mut arena, Vec2::new(88.0, left.y), 50.0);

        let report = resolve(&mut arena);
        assert_eq!(report.wall_hits, 1);
        assert_eq!(report.player_hits, 0);
        assert_eq!(arena.world.get::<&Health>(arena.player).unwrap().current, 150.0);
    }

    #[test]
    fn test_enemy_takes_every_overlapping_projectile() {
        let mut arena = arena();
        let at = arena.grid.cell_center(Cell::new(1, 1));
        let enemy = spawn_enemy(&mut arena.world, &arena.config, EnemyKind::Grunt, 1, at);
        for _ in 0..3 {
            spawning::spawn_projectile(
                &mut arena.world,
                &arena.config,
                arena.player,
                Faction::Player,
                at - Vec2::new(arena.config.projectile.muzzle_offset, 0.0),
                Shot { angle: 0.0, damage: 15.0 },
            );
        }

        let report = resolve(&mut arena);
        assert_eq!(report.enemy_hits, 3);
        let health = *arena.world.get::<&Health>(enemy).unwrap();
        assert_eq!(health.current, 0.0);
        // Still present until its own update removes it
        assert!(arena.world.contains(enemy));
    }

    #[test]
    fn test_player_projectiles_ignore_player() {
        let mut arena = arena();
        let center = arena.grid.cell_center(Cell::new(3, 3));
        spawning::spawn_projectile(
            &mut arena.world,
            &arena.config,
            arena.player,
            Faction::Player,
            center,
            Shot { angle: 0.0, damage: 15.0 },
        );
        let report = resolve(&mut arena);
        assert_eq!(report, CollisionReport::default());
        assert_eq!(arena.world.query::<&Projectile>().iter().count(), 1);
    }

    #[test]
    fn test_chest_consumed_on_contact() {
        let mut arena = arena();
        let center = arena.grid.cell_center(Cell::new(3, 3));
        arena.world.spawn((
            Chest { item: Item::Ammo(30) },
            Position(center + Vec2::new(20.0, 0.0)),
            Body::new(Vec2::splat(50.0)),
        ));

        let report = resolve(&mut arena);
        assert_eq!(report.chests_opened, 1);
        assert_eq!(arena.world.query::<&Chest>().iter().count(), 0);
        let loadout = arena.world.get::<&Loadout>(arena.player).unwrap();
        assert_eq!(loadout.reserve, AmmoReserve::Finite(80));
    }

    #[test]
    fn test_fire_with_empty_magazine_starts_reload() {
        let mut arena = arena();
        {
            let mut loadout = arena.world.get::<&mut Loadout>(arena.player).unwrap();
            loadout.weapons[0].ammo = 0;
        }
        let fired = fire_weapon(
            &mut arena.world,
            &arena.config,
            arena.player,
            Faction::Player,
            0.0,
            1.0,
            &mut arena.events,
        );
        assert_eq!(fired, 0);
        let loadout = arena.world.get::<&Loadout>(arena.player).unwrap();
        assert!(loadout.weapons[0].is_reloading());
    }

    #[test]
    fn test_fire_spawns_projectiles_and_reload_completes() {
        let mut arena = arena();
        let player = arena.player;
        let fired = fire_weapon(&mut arena.world, &arena.config, player, Faction::Player, 0.0, 1.0, &mut arena.events);
        assert_eq!(fired, 1);
        assert_eq!(arena.world.query::<&Projectile>().iter().count(), 1);

        assert!(start_reload(&mut arena.world, player, 1.1, &mut arena.events));
        poll_reloads(&mut arena.world, 1.5, &mut arena.events);
        assert_eq!(arena.world.get::<&Loadout>(player).unwrap().weapons[0].ammo, 14);
        poll_reloads(&mut arena.world, 2.5, &mut arena.events);
        let loadout = arena.world.get::<&Loadout>(player).unwrap();
        assert_eq!(loadout.weapons[0].ammo, 15);
        assert_eq!(loadout.reserve, AmmoReserve::Finite(49));
        assert_eq!(loadout.weapons[0].kind, WeaponKind::Pistol);
    }
}
