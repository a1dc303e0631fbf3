//! Actor motion and collision-gated rotation.

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{Body, Position};
use crate::geometry::Aabb;
use crate::grid::Grid;
use crate::spatial_cache::SpatialCache;

/// Resolve a desired displacement against obstacles, one axis at a time.
///
/// Each axis is tested on its own with the box swept from its current place
/// to the offset place; an axis whose sweep overlaps any obstacle is zeroed.
/// Diagonal moves into a wall therefore slide along it.
pub fn resolve_motion(hitbox: &Aabb, delta: Vec2, obstacles: &[Aabb]) -> Vec2 {
    let blocked = |swept: Aabb| obstacles.iter().any(|o| o.overlaps(&swept));

    let mut applied = delta;
    if delta.x != 0.0 {
        let swept = Aabb::new(
            Vec2::new(hitbox.min.x + delta.x.min(0.0), hitbox.min.y),
            Vec2::new(hitbox.max.x + delta.x.max(0.0), hitbox.max.y),
        );
        if blocked(swept) {
            applied.x = 0.0;
        }
    }
    if delta.y != 0.0 {
        let swept = Aabb::new(
            Vec2::new(hitbox.min.x, hitbox.min.y + delta.y.min(0.0)),
            Vec2::new(hitbox.max.x, hitbox.max.y + delta.y.max(0.0)),
        );
        if blocked(swept) {
            applied.y = 0.0;
        }
    }
    applied
}

/// Move an actor by `delta` with wall sliding. Returns the displacement applied.
pub fn move_actor(
    world: &mut World,
    grid: &Grid,
    walls: &SpatialCache,
    entity: Entity,
    delta: Vec2,
) -> Vec2 {
    if delta == Vec2::ZERO {
        return Vec2::ZERO;
    }
    let Ok((pos, body)) = world.query_one_mut::<(&mut Position, &Body)>(entity) else {
        return Vec2::ZERO;
    };

    let hitbox = body.aabb(pos.0);
    let reach = Aabb::new(hitbox.min - delta.abs(), hitbox.max + delta.abs());
    let obstacles = walls.obstacles_near(grid, &reach);
    let applied = resolve_motion(&hitbox, delta, &obstacles);
    pos.0 += applied;
    applied
}

/// Turn an actor to face `angle` unless its rotated box would overlap a wall.
/// A rejected turn keeps the previous facing and box.
pub fn try_rotate(
    world: &mut World,
    grid: &Grid,
    walls: &SpatialCache,
    entity: Entity,
    angle: f32,
) -> bool {
    let Ok((pos, body)) = world.query_one_mut::<(&Position, &mut Body)>(entity) else {
        return false;
    };
    let turned = body.rotated_aabb(pos.0, angle);
    if walls.hits_wall(grid, &turned) {
        return false;
    }
    body.set_facing(angle);
    true
}

/// Advance `from` toward `target` by at most `speed`, landing exactly on the
/// target when it is within reach.
pub fn step_toward(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let offset = target - from;
    let distance = offset.length();
    if distance <= speed {
        target
    } else {
        from + offset / distance * speed
    }
}

/// Angle from `from` to `to` in radians (y down).
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
