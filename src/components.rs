use glam::Vec2;
use hecs::Entity;
use serde::Serialize;

use crate::geometry::{rotated_extents, Aabb};
use crate::grid::Cell;
use crate::spawning::EnemyKind;
use crate::weapons::{AmmoReserve, Weapon, WeaponKind};

/// Position component - world coordinates of the entity's center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Grid cell a wall entity was created from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell(pub Cell);

/// Collision body: the unrotated size plus the extents of the box around it
/// at the current facing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub size: Vec2,
    pub facing: f32,
    pub extents: Vec2,
}

impl Body {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            facing: 0.0,
            extents: size,
        }
    }

    pub fn aabb(&self, center: Vec2) -> Aabb {
        Aabb::from_center_size(center, self.extents)
    }

    /// The box this body would occupy if it turned to `angle`.
    pub fn rotated_aabb(&self, center: Vec2, angle: f32) -> Aabb {
        Aabb::from_center_size(center, rotated_extents(self.size, angle))
    }

    pub fn set_facing(&mut self, angle: f32) {
        self.facing = angle;
        self.extents = rotated_extents(self.size, angle);
    }
}

/// Movement speed in world units per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed(pub f32);

/// Player marker component
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Health component, always within `[0, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Reduce health, never below zero.
    pub fn apply_damage(&mut self, amount: f32) {
        self.current = (self.current - amount.max(0.0)).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Held weapons, the equipped slot and the shared ammo reserve
#[derive(Debug, Clone, PartialEq)]
pub struct Loadout {
    pub weapons: Vec<Weapon>,
    pub equipped: usize,
    pub reserve: AmmoReserve,
    pub capacity: usize,
}

impl Loadout {
    pub fn new(weapon: Weapon, reserve: AmmoReserve, capacity: usize) -> Self {
        Self {
            weapons: vec![weapon],
            equipped: 0,
            reserve,
            capacity: capacity.max(1),
        }
    }

    pub fn equipped(&self) -> Option<&Weapon> {
        self.weapons.get(self.equipped)
    }

    pub fn equipped_mut(&mut self) -> Option<&mut Weapon> {
        self.weapons.get_mut(self.equipped)
    }

    pub fn has(&self, kind: WeaponKind) -> bool {
        self.weapons.iter().any(|w| w.kind == kind)
    }

    pub fn is_full(&self) -> bool {
        self.weapons.len() >= self.capacity
    }

    /// Switch to the 1-based `slot`. Out-of-range slots, and switching away
    /// from a weapon mid-reload, are ignored.
    pub fn equip(&mut self, slot: usize) -> bool {
        let Some(index) = slot.checked_sub(1) else {
            return false;
        };
        if index >= self.weapons.len() || self.equipped().map_or(false, Weapon::is_reloading) {
            return false;
        }
        self.equipped = index;
        true
    }

    /// Start a reload of the equipped weapon.
    pub fn reload(&mut self, now: f64) -> bool {
        let reserve = self.reserve;
        self.equipped_mut()
            .map_or(false, |weapon| weapon.start_reload(&reserve, now))
    }

    /// Complete every held weapon's due reload. Returns the rounds loaded.
    pub fn poll_reloads(&mut self, now: f64) -> u32 {
        let Loadout {
            weapons, reserve, ..
        } = self;
        weapons
            .iter_mut()
            .filter_map(|weapon| weapon.poll_reload(reserve, now))
            .sum()
    }
}

/// Enemy component with the stats its AI reads each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub accuracy: f32,
    pub range: f32,
}

/// Blocks actor movement and destroys projectiles
#[derive(Debug, Clone, Copy)]
pub struct Wall;

/// Chest contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "category", content = "value", rename_all = "snake_case")]
pub enum Item {
    Weapon(WeaponKind),
    Health(u32),
    Ammo(u32),
}

/// Container component (for chests); consumed on first player contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chest {
    pub item: Item,
}

/// Who fired a projectile, and so who it can hurt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Player,
    Enemy,
}

/// Flying projectile; moves `speed` units per frame along `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub faction: Faction,
    pub source: Entity,
}
