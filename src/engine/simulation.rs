//! Frame stages. Each runs to completion before the next starts; the engine
//! calls them in a fixed order.

use crate::components::{Faction, Loadout, Speed};
use crate::config::GameConfig;
use crate::events::{EventQueue, GameEvent};
use crate::input::{self, Command, InputFrame};
use crate::queries;
use crate::systems::{self, AiContext, CollisionReport};

use rand::Rng;
use tracing::{debug, info};

use super::floor_transition;
use super::game_state::GameState;

/// Apply this frame's discrete commands in the order they were issued.
///
/// The aim for `Fire` is taken from the player's center toward the pointer,
/// mapped to world space through the camera as it stood when the frame began.
pub fn process_commands(
    state: &mut GameState,
    config: &GameConfig,
    input: &InputFrame,
    events: &mut EventQueue,
) {
    puffin::profile_function!();

    let player = state.player;
    for command in &input.commands {
        match *command {
            Command::Equip(slot) => {
                let switched = state
                    .world
                    .get::<&mut Loadout>(player)
                    .map_or(false, |mut loadout| loadout.equip(slot));
                debug!(slot, switched, "equip requested");
            }
            Command::Reload => {
                systems::start_reload(&mut state.world, player, state.clock, events);
            }
            Command::Fire => {
                let Some(pos) = state.player_position() else {
                    continue;
                };
                let target = state.camera.screen_to_world(input.pointer);
                let aim = systems::angle_between(pos, target);
                systems::fire_weapon(&mut state.world, config, player, Faction::Player, aim, state.clock, events);
            }
        }
    }
}

/// Move the player with wall sliding, keep the camera on them, and turn them
/// toward the pointer when the turn is clear of walls.
pub fn move_player(state: &mut GameState, input: &InputFrame) {
    puffin::profile_function!();

    let player = state.player;
    let speed = state.world.get::<&Speed>(player).map_or(0.0, |s| s.0);
    let delta = input::movement_delta(input.movement, speed);
    systems::move_actor(&mut state.world, &state.grid, &state.walls, player, delta);

    state.recenter_camera();

    if let Some(pos) = state.player_position() {
        let target = state.camera.screen_to_world(input.pointer);
        if target != pos {
            let angle = systems::angle_between(pos, target);
            systems::try_rotate(&mut state.world, &state.grid, &state.walls, player, angle);
        }
    }
}

/// Chase, aim and fire for every enemy. Returns the projectiles they fired.
pub fn update_enemies(
    state: &mut GameState,
    config: &GameConfig,
    events: &mut EventQueue,
    rng: &mut impl Rng,
) -> usize {
    let ctx = AiContext {
        grid: &state.grid,
        graph: &state.graph,
        walls: &state.walls,
        config,
        player: state.player,
        now: state.clock,
    };
    systems::update_enemies(&mut state.world, &ctx, events, rng)
}

/// Reload timers, projectile flight, then the ordered collision pass.
pub fn run_combat(state: &mut GameState, config: &GameConfig, events: &mut EventQueue) -> CollisionReport {
    puffin::profile_function!();

    systems::poll_reloads(&mut state.world, state.clock, events);
    systems::update_projectiles(&mut state.world, &state.grid.bounds());
    systems::resolve_collisions(
        &mut state.world,
        &state.grid,
        &state.walls,
        config,
        state.player,
        events,
    )
}

/// Credit minute and elimination points for this frame.
pub fn update_score(state: &mut GameState, dt: f64, events: &EventQueue) -> u32 {
    state.score.update(dt, events.eliminations())
}

/// End the run if the player died; otherwise advance the level once every
/// enemy is gone.
pub fn check_progress(
    state: &mut GameState,
    config: &GameConfig,
    events: &mut EventQueue,
    rng: &mut impl Rng,
) {
    if queries::is_entity_dead(&state.world, state.player) {
        state.over = true;
        info!(level = state.level, score = state.score.score, "run ended");
        events.push(GameEvent::RunEnded {
            level: state.level,
            score: state.score.score,
        });
        return;
    }

    if queries::enemy_count(&state.world) == 0 {
        floor_transition::advance_level(state, config, events, rng);
    }
}
