//! Enemy behavior.
//!
//! Every enemy runs the same loop each frame: chase the player along the
//! walk graph, turn to face them, and shoot once they are within range.
//! Variants differ only by the stats set at spawn time.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use tracing::debug;

use crate::components::{Enemy, Faction, Health, Position, Speed};
use crate::config::GameConfig;
use crate::events::{EventQueue, GameEvent};
use crate::grid::Grid;
use crate::pathfinding;
use crate::queries;
use crate::spatial_cache::SpatialCache;
use crate::systems::{combat, movement};
use crate::walk_graph::WalkGraph;

/// Shared read-only state an enemy update looks at
pub struct AiContext<'a> {
    pub grid: &'a Grid,
    pub graph: &'a WalkGraph,
    pub walls: &'a SpatialCache,
    pub config: &'a GameConfig,
    pub player: Entity,
    pub now: f64,
}

/// Remove enemies whose health reached zero, emitting one elimination each.
pub fn remove_dead_enemies(world: &mut World, events: &mut EventQueue) -> usize {
    let dead: Vec<(Entity, Enemy, Vec2)> = world
        .query::<(&Enemy, &Health, &Position)>()
        .iter()
        .filter(|(_, (_, health, _))| health.is_dead())
        .map(|(id, (enemy, _, pos))| (id, *enemy, pos.0))
        .collect();

    for (id, enemy, position) in &dead {
        let _ = world.despawn(*id);
        debug!(kind = enemy.kind.name(), "enemy eliminated");
        events.push(GameEvent::EnemyEliminated {
            kind: enemy.kind,
            position: *position,
        });
    }
    dead.len()
}

/// Aim error (radians, either side) for an enemy of the given accuracy.
pub fn aim_error(max_error_degrees: f32, accuracy: f32) -> f32 {
    max_error_degrees.to_radians() * (1.0 - accuracy.clamp(0.0, 1.0))
}

/// Run one frame of every enemy. Dead enemies are removed first and take no
/// further part. Returns the projectiles fired.
pub fn update_enemies(
    world: &mut World,
    ctx: &AiContext,
    events: &mut EventQueue,
    rng: &mut impl Rng,
) -> usize {
    puffin::profile_function!();

    remove_dead_enemies(world, events);

    let Some(player_pos) = queries::get_entity_position(world, ctx.player) else {
        return 0;
    };
    let player_cell = ctx.grid.cell_at(player_pos);

    let enemies: Vec<(Entity, Enemy, Vec2, f32)> = world
        .query::<(&Enemy, &Position, &Speed)>()
        .iter()
        .map(|(id, (enemy, pos, speed))| (id, *enemy, pos.0, speed.0))
        .collect();

    let mut fired = 0;
    for (entity, enemy, pos, speed) in enemies {
        let next = ctx
            .grid
            .cell_at(pos)
            .zip(player_cell)
            .and_then(|(from, to)| pathfinding::next_step(ctx.graph, from, to));
        let pos = match next {
            Some(cell) => {
                let moved = movement::step_toward(pos, ctx.grid.cell_center(cell), speed);
                if let Ok(mut p) = world.get::<&mut Position>(entity) {
                    p.0 = moved;
                }
                moved
            }
            None => pos,
        };

        let facing = movement::angle_between(pos, player_pos);
        movement::try_rotate(world, ctx.grid, ctx.walls, entity, facing);

        if pos.distance(player_pos) <= enemy.range {
            let error = aim_error(ctx.config.projectile.enemy_max_aim_error_degrees, enemy.accuracy);
            let aim = if error > 0.0 {
                facing + rng.gen_range(-error..=error)
            } else {
                facing
            };
            fired += combat::fire_weapon(world, ctx.config, entity, Faction::Enemy, aim, ctx.now, events);
        }
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{GridCell, Projectile, Wall};
    use crate::grid::Cell;
    use crate::spawning::{spawn_enemy, spawn_player, EnemyKind};
    use crate::tile::TileType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Level {
        world: World,
        grid: Grid,
        graph: WalkGraph,
        walls: SpatialCache,
        config: GameConfig,
        player: Entity,
    }

    /// One corridor of floor along row 1, x in 1..=8.
    fn corridor(player_at: Cell) -> Level {
        let config = GameConfig::default();
        let mut grid = Grid::new(10, 3, 90.0);
        let mut world = World::new();
        for (cell, _) in grid.clone().cells() {
            if cell.y == 1 && (1..=8).contains(&cell.x) {
                grid.set(cell.x, cell.y, TileType::Floor);
            } else {
                world.spawn((GridCell(cell), Wall));
            }
        }
        let graph = WalkGraph::build(&grid);
        let walls = SpatialCache::rebuild_from_world(&world);
        let player = spawn_player(&mut world, &config, grid.cell_center(player_at));
        Level {
            world,
            grid,
            graph,
            walls,
            config,
            player,
        }
    }

    fn run(level: &mut Level, events: &mut EventQueue, now: f64) -> usize {
        let ctx = AiContext {
            grid: &level.grid,
            graph: &level.graph,
            walls: &level.walls,
            config: &level.config,
            player: level.player,
            now,
        };
        let mut rng = StdRng::seed_from_u64(3);
        update_enemies(&mut level.world, &ctx, events, &mut rng)
    }

    #[test]
    fn test_enemy_steps_toward_next_cell_on_path() {
        let mut level = corridor(Cell::new(8, 1));
        let start = level.grid.cell_center(Cell::new(1, 1));
        let enemy = spawn_enemy(&mut level.world, &level.config, EnemyKind::Grunt, 1, start);
        let mut events = EventQueue::new();

        run(&mut level, &mut events, 0.0);
        let pos = level.world.get::<&Position>(enemy).unwrap().0;
        assert_eq!(pos, start + Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_enemy_out_of_range_holds_fire() {
        let mut level = corridor(Cell::new(8, 1));
        let start = level.grid.cell_center(Cell::new(1, 1));
        spawn_enemy(&mut level.world, &level.config, EnemyKind::Grunt, 1, start);
        let mut events = EventQueue::new();
        assert_eq!(run(&mut level, &mut events, 0.0), 0);
        assert_eq!(level.world.query::<&Projectile>().iter().count(), 0);
    }

    #[test]
    fn test_enemy_in_range_fires_at_player() {
        let mut level = corridor(Cell::new(4, 1));
        let start = level.grid.cell_center(Cell::new(2, 1));
        spawn_enemy(&mut level.world, &level.config, EnemyKind::Shotgunner, 1, start);
        let mut events = EventQueue::new();

        assert_eq!(run(&mut level, &mut events, 0.0), 3);
        for (_, projectile) in level.world.query::<&Projectile>().iter() {
            assert_eq!(projectile.faction, Faction::Enemy);
            assert!(projectile.direction.x > 0.9);
        }
    }

    #[test]
    fn test_dead_enemy_removed_once() {
        let mut level = corridor(Cell::new(8, 1));
        let enemy = spawn_enemy(
            &mut level.world,
            &level.config,
            EnemyKind::Sniper,
            1,
            level.grid.cell_center(Cell::new(1, 1)),
        );
        level.world.get::<&mut Health>(enemy).unwrap().current = 0.0;
        let mut events = EventQueue::new();

        run(&mut level, &mut events, 0.0);
        run(&mut level, &mut events, 0.1);
        assert!(!level.world.contains(enemy));
        assert_eq!(events.eliminations(), 1);
    }

    #[test]
    fn test_aim_error_shrinks_with_accuracy() {
        assert_eq!(aim_error(10.0, 1.0), 0.0);
        assert!((aim_error(10.0, 0.0) - 10f32.to_radians()).abs() < 1e-6);
        assert!(aim_error(10.0, 0.8) < aim_error(10.0, 0.6));
    }
}
