//! Game event system for decoupled communication between systems.
//!
//! Systems push events while a frame runs; the score step and outside
//! collaborators (render, audio) read them once the frame is done.

use glam::Vec2;
use hecs::Entity;
use serde::Serialize;

use crate::components::{Faction, Item};
use crate::spawning::EnemyKind;
use crate::weapons::WeaponKind;

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Projectiles left a weapon
    WeaponFired {
        #[serde(skip)]
        shooter: Entity,
        weapon: WeaponKind,
        pellets: usize,
    },
    ReloadStarted {
        #[serde(skip)]
        entity: Entity,
        weapon: WeaponKind,
    },
    ReloadFinished {
        #[serde(skip)]
        entity: Entity,
        loaded: u32,
    },
    /// A projectile struck an actor
    ProjectileHit {
        #[serde(skip)]
        target: Entity,
        faction: Faction,
        damage: f32,
        position: Vec2,
    },
    /// The player picked up a chest
    ChestOpened { item: Item, applied: bool },
    /// A dead enemy was removed from play; counts toward the score once
    EnemyEliminated { kind: EnemyKind, position: Vec2 },
    WaveSpawned {
        level: u32,
        kind: EnemyKind,
        count: usize,
    },
    LevelAdvanced { level: u32 },
    DungeonRegenerated { level: u32 },
    /// Player health reached zero
    RunEnded { level: u32, score: u32 },
}

/// Simple event queue - events are pushed during a frame and read after it
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Enemies removed since the queue was last cleared
    pub fn eliminations(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyEliminated { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
