//! Level progression: wave spawning, level advance and dungeon regeneration.

use crate::config::GameConfig;
use crate::events::{EventQueue, GameEvent};
use crate::spawning::{self, WaveReport};

use rand::Rng;
use tracing::{info, warn};

use super::game_state::GameState;
use super::initialization;

/// Spawn the wave for the current level around the player's position.
pub fn spawn_current_wave(
    state: &mut GameState,
    config: &GameConfig,
    events: &mut EventQueue,
    rng: &mut impl Rng,
) -> WaveReport {
    let player_pos = state.player_position().unwrap_or_default();
    let report = spawning::spawn_wave(
        &mut state.world,
        config,
        &state.rooms,
        player_pos,
        state.level,
        rng,
    );

    if report.spawned < report.requested {
        warn!(
            requested = report.requested,
            spawned = report.spawned,
            "not enough free rooms for the full wave"
        );
    }
    info!(level = state.level, kind = report.kind.name(), count = report.spawned, "wave spawned");
    events.push(GameEvent::WaveSpawned {
        level: state.level,
        kind: report.kind,
        count: report.spawned,
    });
    report
}

/// Whether reaching `level` replaces the dungeon.
pub fn regenerates_at(config: &GameConfig, level: u32) -> bool {
    level % config.difficulty.regeneration_interval.max(1) == 0
}

/// Throw away the current dungeon and everything in it, generate a new one
/// and re-create the player in its first room. Level and score carry over;
/// the minute timer restarts.
pub fn regenerate_dungeon(
    state: &mut GameState,
    config: &GameConfig,
    events: &mut EventQueue,
    rng: &mut impl Rng,
) {
    puffin::profile_function!();

    let setup = initialization::build_level(config, rng);
    state.install(setup);
    state.score.restart_timer();
    info!(level = state.level, rooms = state.rooms.len(), "dungeon regenerated");
    events.push(GameEvent::DungeonRegenerated { level: state.level });
}

/// Move to the next level after a cleared wave: regenerate the dungeon on
/// every regeneration interval, then spawn the new level's wave.
pub fn advance_level(
    state: &mut GameState,
    config: &GameConfig,
    events: &mut EventQueue,
    rng: &mut impl Rng,
) {
    state.level += 1;
    info!(level = state.level, "level advanced");
    events.push(GameEvent::LevelAdvanced { level: state.level });

    if regenerates_at(config, state.level) {
        regenerate_dungeon(state, config, events, rng);
    }
    spawn_current_wave(state, config, events, rng);
}
