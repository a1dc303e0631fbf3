//! Projectile movement and cleanup.
//!
//! Projectiles fly in a straight line at a fixed per-frame speed. They are
//! consumed by the collision pass (walls, actors) or culled here once they
//! leave the map.

use hecs::{Entity, World};

use crate::components::{Position, Projectile};
use crate::geometry::Aabb;

/// Move every projectile one frame along its direction, then despawn the
/// ones whose center has left `bounds`. Returns how many were culled.
pub fn update_projectiles(world: &mut World, bounds: &Aabb) -> usize {
    puffin::profile_function!();

    let mut out_of_bounds: Vec<Entity> = Vec::new();
    for (entity, (pos, projectile)) in world.query_mut::<(&mut Position, &Projectile)>() {
        pos.0 += projectile.direction * projectile.speed;
        if !bounds.contains_point(pos.0) {
            out_of_bounds.push(entity);
        }
    }

    despawn_projectiles(world, &out_of_bounds)
}

/// Despawn the given projectiles. Returns how many were actually removed.
pub fn despawn_projectiles(world: &mut World, projectiles: &[Entity]) -> usize {
    projectiles
        .iter()
        .filter(|entity| world.despawn(**entity).is_ok())
        .count()
}
