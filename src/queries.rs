//! Common entity query helpers.
//!
//! Pure read-only queries shared by the systems and the engine.

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{Body, Enemy, Health, Position};
use crate::geometry::Aabb;

/// Get an entity's world position.
pub fn get_entity_position(world: &World, entity: Entity) -> Option<Vec2> {
    world.get::<&Position>(entity).ok().map(|p| p.0)
}

/// Current collision box of an entity with a body.
pub fn get_entity_aabb(world: &World, entity: Entity) -> Option<Aabb> {
    let pos = world.get::<&Position>(entity).ok()?;
    let body = world.get::<&Body>(entity).ok()?;
    Some(body.aabb(pos.0))
}

/// Check if an entity is dead (health <= 0). Entities without health count as dead.
pub fn is_entity_dead(world: &World, entity: Entity) -> bool {
    world
        .get::<&Health>(entity)
        .map(|h| h.is_dead())
        .unwrap_or(true)
}

pub fn enemy_count(world: &World) -> usize {
    world.query::<&Enemy>().iter().count()
}

/// Enemy entities with their positions, nearest to `from` first.
pub fn enemies_by_distance(world: &World, from: Vec2) -> Vec<(Entity, Vec2)> {
    let mut enemies: Vec<(Entity, Vec2)> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(id, (_, pos))| (id, pos.0))
        .collect();
    enemies.sort_by(|a, b| a.1.distance_squared(from).total_cmp(&b.1.distance_squared(from)));
    enemies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::spawning::{spawn_enemy, EnemyKind};

    #[test]
    fn test_enemies_sorted_nearest_first() {
        let config = GameConfig::default();
        let mut world = World::new();
        let far = spawn_enemy(&mut world, &config, EnemyKind::Grunt, 1, Vec2::new(500.0, 0.0));
        let near = spawn_enemy(&mut world, &config, EnemyKind::Sniper, 1, Vec2::new(50.0, 0.0));
        let order: Vec<Entity> = enemies_by_distance(&world, Vec2::ZERO)
            .into_iter()
            .map(|(e, _)| e)
            .collect();
        assert_eq!(order, vec![near, far]);
        assert_eq!(enemy_count(&world), 2);
    }

    #[test]
    fn test_entity_without_health_counts_as_dead() {
        let mut world = World::new();
        let entity = world.spawn((Position(Vec2::ZERO),));
        assert!(is_entity_dead(&world, entity));
        assert_eq!(get_entity_aabb(&world, entity), None);
    }
}
