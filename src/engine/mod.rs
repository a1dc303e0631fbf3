//! Game engine - owns all game state and provides a clean API to the application shell.
//!
//! The engine handles:
//! - Game state (world, dungeon, camera, score)
//! - Semantic input processing
//! - Fixed-order frame simulation
//! - Level progression and dungeon regeneration
//!
//! The shell (the binary, or a windowed front end) only handles:
//! - Turning device state into an [`InputFrame`]
//! - Calling [`GameEngine::step`] once per frame
//! - Drawing the [`FrameSnapshot`] and reporting the final score

pub mod floor_transition;
mod game_state;
pub mod initialization;
mod simulation;

pub use game_state::GameState;

use crate::config::GameConfig;
use crate::events::EventQueue;
use crate::input::InputFrame;
use crate::snapshot::{self, FrameSnapshot, SnapshotSource};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// A single run of the game.
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    events: EventQueue,
    rng: StdRng,
}

impl GameEngine {
    /// Build the first dungeon and spawn the level 1 wave. The config is
    /// fixed for the lifetime of the engine.
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        info!(seed, "starting run");
        let mut rng = StdRng::seed_from_u64(seed);

        let mut state = GameState::new(&config, &mut rng);
        let mut events = EventQueue::new();
        floor_transition::spawn_current_wave(&mut state, &config, &mut events, &mut rng);

        Self {
            config,
            state,
            events,
            rng,
        }
    }

    /// Advance the simulation by one frame of `dt` seconds.
    ///
    /// Stages run in a fixed order: commands, player motion and camera,
    /// enemies, combat, score, then the end-of-run and level checks. The
    /// returned queue holds only this frame's events. Once the run is over
    /// further steps do nothing.
    pub fn step(&mut self, input: &InputFrame, dt: f32) -> &EventQueue {
        puffin::profile_function!();

        self.events.clear();
        if self.state.over {
            return &self.events;
        }

        let dt = f64::from(dt.max(0.0));
        self.state.clock += dt;
        self.state.frame += 1;

        let Self {
            config,
            state,
            events,
            rng,
        } = &mut *self;

        simulation::process_commands(state, config, input, events);
        simulation::move_player(state, input);
        {
            puffin::profile_scope!("enemies");
            simulation::update_enemies(state, config, events, rng);
        }
        simulation::run_combat(state, config, events);
        simulation::update_score(state, dt, events);
        simulation::check_progress(state, config, events, rng);

        &self.events
    }

    /// Read-only view of the current frame for rendering.
    pub fn snapshot(&self) -> FrameSnapshot {
        snapshot::capture(
            &self.state.world,
            &SnapshotSource {
                grid: &self.state.grid,
                walls: &self.state.walls,
                camera: &self.state.camera,
                player: self.state.player,
                frame: self.state.frame,
                level: self.state.level,
                score: self.state.score.score,
            },
        )
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for shells and tests that stage situations directly.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn score(&self) -> u32 {
        self.state.score.score
    }

    pub fn is_over(&self) -> bool {
        self.state.over
    }

    /// The score to report once the run has ended.
    pub fn final_score(&self) -> Option<u32> {
        self.state.over.then_some(self.state.score.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Body, Chest, Enemy, Faction, Health, Position, Projectile};
    use crate::events::GameEvent;
    use crate::queries;
    use crate::walk_graph::WalkGraph;
    use glam::Vec2;
    use hecs::Entity;

    fn engine(seed: u64) -> GameEngine {
        GameEngine::new(GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        })
    }

    fn idle(engine: &GameEngine) -> InputFrame {
        InputFrame::idle(engine.state().camera.screen_center() + Vec2::new(100.0, 0.0))
    }

    fn clear_enemies(engine: &mut GameEngine) {
        let world = &mut engine.state_mut().world;
        let enemies: Vec<Entity> = world.query::<&Enemy>().iter().map(|(e, _)| e).collect();
        for enemy in enemies {
            world.despawn(enemy).unwrap();
        }
    }

    #[test]
    fn test_new_run_starts_with_one_grunt() {
        let engine = engine(1);
        assert_eq!(engine.level(), 1);
        assert_eq!(queries::enemy_count(&engine.state().world), 1);
        assert!(!engine.is_over());
        assert_eq!(engine.final_score(), None);
    }

    #[test]
    fn test_player_stays_at_screen_center() {
        let mut engine = engine(2);
        let mut input = idle(&engine);
        input.movement.right = true;
        for _ in 0..10 {
            engine.step(&input, 1.0 / 60.0);
        }
        let view = engine.snapshot().player.unwrap();
        let center = engine.state().camera.screen_center();
        assert!((view.position - center).length() < 1e-3);
    }

    #[test]
    fn test_run_ends_when_two_hits_drain_health() {
        let mut engine = engine(3);
        let player = engine.state().player;
        let at = engine.state().player_position().unwrap();
        let speed = engine.config().projectile.speed;
        {
            let world = &mut engine.state_mut().world;
            world.get::<&mut Health>(player).unwrap().current = 10.0;
            // No chest may heal the player back up this frame
            let chests: Vec<Entity> = world.query::<&Chest>().iter().map(|(e, _)| e).collect();
            for chest in chests {
                world.despawn(chest).unwrap();
            }
            for damage in [15.0, 20.0] {
                let source = world.spawn(());
                world.spawn((
                    Position(at - Vec2::new(speed, 0.0)),
                    Body::new(Vec2::splat(8.0)),
                    Projectile {
                        direction: Vec2::X,
                        speed,
                        damage,
                        faction: Faction::Enemy,
                        source,
                    },
                ));
            }
        }

        let input = idle(&engine);
        let events: Vec<GameEvent> = engine.step(&input, 1.0 / 60.0).iter().cloned().collect();

        assert_eq!(engine.state().world.get::<&Health>(player).unwrap().current, 0.0);
        assert!(engine.is_over());
        assert!(events.iter().any(|e| matches!(e, GameEvent::RunEnded { level: 1, .. })));
        assert_eq!(engine.final_score(), Some(engine.score()));

        // A finished run no longer advances
        let frame = engine.state().frame;
        assert!(engine.step(&input, 1.0 / 60.0).is_empty());
        assert_eq!(engine.state().frame, frame);
    }

    #[test]
    fn test_cleared_wave_advances_level_and_spawns_next() {
        let mut engine = engine(4);
        clear_enemies(&mut engine);
        let input = idle(&engine);
        let events: Vec<GameEvent> = engine.step(&input, 1.0 / 60.0).iter().cloned().collect();

        assert_eq!(engine.level(), 2);
        assert!(events.contains(&GameEvent::LevelAdvanced { level: 2 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::DungeonRegenerated { .. })));
        let spawned = queries::enemy_count(&engine.state().world);
        assert!((1..=5).contains(&spawned));
    }

    #[test]
    fn test_fifth_level_regenerates_dungeon() {
        let mut engine = engine(5);
        engine.state_mut().level = 4;
        clear_enemies(&mut engine);
        let old_grid = engine.state().grid.clone();
        let input = idle(&engine);

        let events: Vec<GameEvent> = engine.step(&input, 1.0 / 60.0).iter().cloned().collect();

        assert_eq!(engine.level(), 5);
        assert!(events.contains(&GameEvent::DungeonRegenerated { level: 5 }));
        let state = engine.state();
        assert_ne!(state.grid, old_grid);
        assert_eq!(state.graph, WalkGraph::build(&state.grid));
        let health = *state.world.get::<&Health>(state.player).unwrap();
        assert_eq!(health.current, health.max);
    }

    #[test]
    fn test_elimination_scores_once() {
        let mut engine = engine(6);
        let enemies: Vec<Entity> = engine
            .state()
            .world
            .query::<&Enemy>()
            .iter()
            .map(|(e, _)| e)
            .collect();
        for enemy in &enemies {
            engine.state_mut().world.get::<&mut Health>(*enemy).unwrap().current = 0.0;
        }
        let input = idle(&engine);
        engine.step(&input, 1.0 / 60.0);
        assert_eq!(engine.score(), 10);
        engine.step(&input, 1.0 / 60.0);
        assert_eq!(engine.score(), 10);
    }
}
