//! Game constants organized by domain.
//!
//! These are the defaults behind [`crate::config::GameConfig`]; the engine
//! itself only ever reads the config.

mod camera;
mod combat;
mod dungeon;
mod enemies;
mod gameplay;

pub use camera::*;
pub use combat::*;
pub use dungeon::*;
pub use enemies::*;
pub use gameplay::*;
