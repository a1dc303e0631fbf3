//! Read-only per-frame view of the run for the render collaborator.
//!
//! All positions are in screen space, derived from the camera at capture
//! time. Nothing here is read back by the simulation.

use glam::Vec2;
use hecs::{Entity, World};
use serde::Serialize;

use crate::camera::Camera;
use crate::components::{Body, Chest, Enemy, Faction, Health, Item, Loadout, Position, Projectile};
use crate::grid::{Cell, Grid};
use crate::spatial_cache::SpatialCache;
use crate::spawning::EnemyKind;
use crate::weapons::WeaponKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub facing: f32,
    pub health: f32,
    pub max_health: f32,
    pub magazine: u32,
    /// `None` for an infinite reserve
    pub reserve: Option<u32>,
    pub weapon: Option<WeaponKind>,
    pub reloading: bool,
    pub inventory: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub position: Vec2,
    pub facing: f32,
    pub health: f32,
    pub max_health: f32,
    pub kind: EnemyKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectileView {
    pub position: Vec2,
    pub faction: Faction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChestView {
    pub position: Vec2,
    pub item: Item,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WallView {
    pub cell: Cell,
    /// Screen position of the cell's top-left corner
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub level: u32,
    pub score: u32,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub chests: Vec<ChestView>,
    pub walls: Vec<WallView>,
}

/// Everything a capture reads besides the world
pub struct SnapshotSource<'a> {
    pub grid: &'a Grid,
    pub walls: &'a SpatialCache,
    pub camera: &'a Camera,
    pub player: Entity,
    pub frame: u64,
    pub level: u32,
    pub score: u32,
}

pub fn capture(world: &World, source: &SnapshotSource) -> FrameSnapshot {
    puffin::profile_function!();

    let camera = source.camera;
    let player = player_view(world, source.player, camera);

    let enemies = world
        .query::<(&Enemy, &Position, &Body, &Health)>()
        .iter()
        .map(|(_, (enemy, pos, body, health))| EnemyView {
            position: camera.world_to_screen(pos.0),
            facing: body.facing,
            health: health.current,
            max_health: health.max,
            kind: enemy.kind,
        })
        .collect();

    let projectiles = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(_, (projectile, pos))| ProjectileView {
            position: camera.world_to_screen(pos.0),
            faction: projectile.faction,
        })
        .collect();

    let chests = world
        .query::<(&Chest, &Position)>()
        .iter()
        .map(|(_, (chest, pos))| ChestView {
            position: camera.world_to_screen(pos.0),
            item: chest.item,
        })
        .collect();

    let walls = source
        .grid
        .cells_overlapping(&camera.visible_bounds())
        .filter(|cell| source.walls.is_blocked(*cell))
        .map(|cell| WallView {
            cell,
            position: camera.world_to_screen(source.grid.cell_rect(cell).min),
        })
        .collect();

    FrameSnapshot {
        frame: source.frame,
        level: source.level,
        score: source.score,
        player,
        enemies,
        projectiles,
        chests,
        walls,
    }
}

fn player_view(world: &World, player: Entity, camera: &Camera) -> Option<PlayerView> {
    let pos = world.get::<&Position>(player).ok()?;
    let body = world.get::<&Body>(player).ok()?;
    let health = world.get::<&Health>(player).ok()?;
    let loadout = world.get::<&Loadout>(player).ok()?;
    let equipped = loadout.equipped();

    Some(PlayerView {
        position: camera.world_to_screen(pos.0),
        facing: body.facing,
        health: health.current,
        max_health: health.max,
        magazine: equipped.map_or(0, |w| w.ammo),
        reserve: loadout.reserve.count(),
        weapon: equipped.map(|w| w.kind),
        reloading: equipped.map_or(false, |w| w.is_reloading()),
        inventory: loadout.weapons.iter().map(|w| w.kind.name().to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{GridCell, Wall};
    use crate::config::GameConfig;
    use crate::spawning::spawn_player;

    #[test]
    fn test_player_drawn_at_screen_center() {
        let config = GameConfig::default();
        let grid = Grid::new(60, 40, 90.0);
        let mut world = World::new();
        world.spawn((GridCell(Cell::new(20, 10)), Wall));
        world.spawn((GridCell(Cell::new(59, 39)), Wall));
        let walls = SpatialCache::rebuild_from_world(&world);
        let player_pos = grid.cell_center(Cell::new(22, 11));
        let player = spawn_player(&mut world, &config, player_pos);
        let mut camera = Camera::new(config.screen.width, config.screen.height);
        camera.recenter(player_pos);

        let snapshot = capture(
            &world,
            &SnapshotSource {
                grid: &grid,
                walls: &walls,
                camera: &camera,
                player,
                frame: 7,
                level: 2,
                score: 40,
            },
        );

        let view = snapshot.player.clone().unwrap();
        assert_eq!(view.position, camera.screen_center());
        assert_eq!(view.magazine, 15);
        assert_eq!(view.reserve, Some(50));
        assert_eq!(view.inventory, vec!["pistol".to_string()]);
        // Only the wall near the player is on screen
        assert_eq!(snapshot.walls.len(), 1);
        assert_eq!(snapshot.walls[0].cell, Cell::new(20, 10));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["level"], 2);
        assert_eq!(json["score"], 40);
    }
}
