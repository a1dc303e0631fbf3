//! Scripted player for headless runs.
//!
//! Walks the walk graph toward the nearest enemy, points at it, switches to
//! the newest weapon and pulls the trigger once the enemy is close.

use glam::Vec2;

use crate::components::Loadout;
use crate::engine::GameState;
use crate::input::{Command, InputFrame, MoveKeys};
use crate::pathfinding;
use crate::queries;

/// Distance at which the autopilot starts shooting
pub const ENGAGE_DISTANCE: f32 = 400.0;

/// Hold the keys that move `from` toward `to`, ignoring offsets within `slack`.
pub fn keys_toward(from: Vec2, to: Vec2, slack: f32) -> MoveKeys {
    let d = to - from;
    MoveKeys {
        up: d.y < -slack,
        down: d.y > slack,
        left: d.x < -slack,
        right: d.x > slack,
    }
}

/// Decide this frame's input from the current state.
pub fn drive(state: &GameState) -> InputFrame {
    let camera = &state.camera;
    let Some(pos) = state.player_position() else {
        return InputFrame::idle(camera.screen_center());
    };
    let Some((_, target)) = queries::enemies_by_distance(&state.world, pos).into_iter().next() else {
        return InputFrame::idle(camera.screen_center());
    };

    let mut frame = InputFrame::idle(camera.world_to_screen(target));

    let next = state
        .grid
        .cell_at(pos)
        .zip(state.grid.cell_at(target))
        .and_then(|(from, to)| pathfinding::next_step(&state.graph, from, to));
    if let Some(cell) = next {
        frame.movement = keys_toward(pos, state.grid.cell_center(cell), 2.5);
    }

    if let Ok(loadout) = state.world.get::<&Loadout>(state.player) {
        let newest = loadout.weapons.len();
        if loadout.equipped + 1 != newest {
            frame.commands.push(Command::Equip(newest));
        }
    }
    if pos.distance(target) <= ENGAGE_DISTANCE {
        frame.commands.push(Command::Fire);
    }
    frame
}
