//! Game systems organized by domain.
//!
//! This module contains all per-frame game logic, split into focused submodules:
//! - `movement`: Actor motion, wall sliding and collision-gated rotation
//! - `ai`: Enemy chase, aim and fire
//! - `combat`: Firing, reloads, damage and the collision pass
//! - `projectile`: Projectile flight and culling
//! - `items`: Applying chest items to the player

pub mod ai;
pub mod combat;
pub mod items;
pub mod movement;
pub mod projectile;

// Re-export commonly used items
pub use ai::{remove_dead_enemies, update_enemies, AiContext};
pub use combat::{apply_damage, fire_weapon, poll_reloads, resolve_collisions, start_reload, CollisionReport};
pub use items::{apply_item, item_name, use_item, ItemUseResult};
pub use movement::{angle_between, move_actor, resolve_motion, step_toward, try_rotate};
pub use projectile::{despawn_projectiles, update_projectiles};
