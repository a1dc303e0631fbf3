//! Weapon definitions and the fire/reload state machine.
//!
//! Reloads are polled deadlines: starting one records the clock time, and
//! [`Weapon::poll_reload`] finishes it once the duration has elapsed. Nothing
//! here sleeps or spawns, so the frame loop never blocks on a reload.

use serde::{Deserialize, Serialize};

/// Weapon variants. Behaviour differs only by stats and pellet count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    Pistol,
    AssaultRifle,
    Shotgun,
    /// Enemy only
    Sniper,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Pistol,
        WeaponKind::AssaultRifle,
        WeaponKind::Shotgun,
        WeaponKind::Sniper,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Pistol => "pistol",
            WeaponKind::AssaultRifle => "assault rifle",
            WeaponKind::Shotgun => "shotgun",
            WeaponKind::Sniper => "sniper",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Magazine capacity
    pub magazine: u32,
    /// Damage per projectile
    pub damage: f32,
    /// Minimum seconds between trigger pulls
    pub fire_interval: f32,
    /// Seconds from reload start to a refilled magazine
    pub reload_time: f32,
    /// Projectiles per trigger pull
    pub pellets: u32,
    /// Angle between neighbouring pellets (degrees)
    pub spread_degrees: f32,
}

impl WeaponStats {
    /// Stats for a weapon that fires one projectile per shot.
    pub fn single(magazine: u32, damage: f32, fire_interval: f32, reload_time: f32) -> Self {
        Self {
            magazine,
            damage,
            fire_interval,
            reload_time,
            pellets: 1,
            spread_degrees: 0.0,
        }
    }
}

/// An actor's pool of spare rounds used to refill magazines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AmmoReserve {
    Finite(u32),
    /// Enemies never run dry
    Infinite,
}

impl AmmoReserve {
    pub fn is_empty(&self) -> bool {
        matches!(self, AmmoReserve::Finite(0))
    }

    /// Remove up to `wanted` rounds, returning how many were taken.
    pub fn take(&mut self, wanted: u32) -> u32 {
        match self {
            AmmoReserve::Finite(left) => {
                let taken = wanted.min(*left);
                *left -= taken;
                taken
            }
            AmmoReserve::Infinite => wanted,
        }
    }

    pub fn add(&mut self, rounds: u32) {
        if let AmmoReserve::Finite(left) = self {
            *left = left.saturating_add(rounds);
        }
    }

    /// Finite count, `None` for an infinite reserve.
    pub fn count(&self) -> Option<u32> {
        match self {
            AmmoReserve::Finite(left) => Some(*left),
            AmmoReserve::Infinite => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReloadState {
    Idle,
    Reloading { started_at: f64, duration: f64 },
}

/// One projectile leaving a weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    /// Direction in radians (screen convention, y down)
    pub angle: f32,
    pub damage: f32,
}

/// A weapon instance with its magazine and timers.
#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub stats: WeaponStats,
    /// Rounds currently loaded
    pub ammo: u32,
    last_fired: Option<f64>,
    reload: ReloadState,
}

impl Weapon {
    /// A weapon with a full magazine.
    pub fn new(kind: WeaponKind, stats: WeaponStats) -> Self {
        Self {
            kind,
            ammo: stats.magazine,
            stats,
            last_fired: None,
            reload: ReloadState::Idle,
        }
    }

    pub fn is_reloading(&self) -> bool {
        matches!(self.reload, ReloadState::Reloading { .. })
    }

    pub fn reload_state(&self) -> ReloadState {
        self.reload
    }

    fn interval_elapsed(&self, now: f64) -> bool {
        self.last_fired
            .map_or(true, |last| now - last >= f64::from(self.stats.fire_interval))
    }

    /// Pull the trigger at `aim` radians.
    ///
    /// Returns the shots produced; empty when reloading, empty, or still
    /// inside the fire interval. Multi-pellet weapons fan their pellets
    /// symmetrically around `aim` and stop early if the magazine runs out.
    pub fn fire(&mut self, aim: f32, now: f64) -> Vec<Shot> {
        if self.is_reloading() || self.ammo == 0 || !self.interval_elapsed(now) {
            return Vec::new();
        }

        let spread = self.stats.spread_degrees.to_radians();
        let first = -((self.stats.pellets / 2) as i32);
        let mut shots = Vec::with_capacity(self.stats.pellets as usize);
        for i in 0..self.stats.pellets as i32 {
            if self.ammo == 0 {
                break;
            }
            shots.push(Shot {
                angle: aim + spread * (first + i) as f32,
                damage: self.stats.damage,
            });
            self.ammo -= 1;
        }
        self.last_fired = Some(now);
        shots
    }

    /// Begin a reload. No-op (returns false) when the magazine is full, the
    /// reserve is empty, or a reload is already in flight.
    pub fn start_reload(&mut self, reserve: &AmmoReserve, now: f64) -> bool {
        if self.ammo >= self.stats.magazine || reserve.is_empty() || self.is_reloading() {
            return false;
        }
        self.reload = ReloadState::Reloading {
            started_at: now,
            duration: f64::from(self.stats.reload_time),
        };
        true
    }

    /// Finish an in-flight reload whose deadline has passed, moving rounds
    /// from `reserve` into the magazine. Returns the rounds loaded.
    pub fn poll_reload(&mut self, reserve: &mut AmmoReserve, now: f64) -> Option<u32> {
        let ReloadState::Reloading {
            started_at,
            duration,
        } = self.reload
        else {
            return None;
        };
        if now - started_at < duration {
            return None;
        }

        let deficit = self.stats.magazine.saturating_sub(self.ammo);
        let loaded = reserve.take(deficit);
        self.ammo += loaded;
        self.reload = ReloadState::Idle;
        Some(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeaponTable;

    fn pistol() -> Weapon {
        Weapon::new(WeaponKind::Pistol, WeaponTable::default().pistol)
    }

    fn shotgun() -> Weapon {
        Weapon::new(WeaponKind::Shotgun, WeaponTable::default().shotgun)
    }

    #[test]
    fn test_new_weapon_is_full_and_idle() {
        let weapon = pistol();
        assert_eq!(weapon.ammo, 15);
        assert_eq!(weapon.reload_state(), ReloadState::Idle);
    }

    #[test]
    fn test_fire_respects_interval() {
        let mut weapon = pistol();
        assert_eq!(weapon.fire(0.0, 0.0).len(), 1);
        assert!(weapon.fire(0.0, 0.1).is_empty());
        assert_eq!(weapon.fire(0.0, 0.25).len(), 1);
        assert_eq!(weapon.ammo, 13);
    }

    #[test]
    fn test_fire_with_empty_magazine_is_noop() {
        let mut weapon = pistol();
        weapon.ammo = 0;
        assert!(weapon.fire(0.0, 10.0).is_empty());
        assert_eq!(weapon.ammo, 0);
    }

    #[test]
    fn test_shotgun_fans_three_pellets() {
        let mut weapon = shotgun();
        let shots = weapon.fire(1.0, 0.0);
        let spread = 10f32.to_radians();
        assert_eq!(shots.len(), 3);
        assert!((shots[0].angle - (1.0 - spread)).abs() < 1e-6);
        assert!((shots[1].angle - 1.0).abs() < 1e-6);
        assert!((shots[2].angle - (1.0 + spread)).abs() < 1e-6);
        assert_eq!(weapon.ammo, 9);
    }

    #[test]
    fn test_shotgun_stops_when_magazine_runs_out() {
        let mut weapon = shotgun();
        weapon.ammo = 2;
        assert_eq!(weapon.fire(0.0, 0.0).len(), 2);
        assert_eq!(weapon.ammo, 0);
    }

    #[test]
    fn test_reload_at_capacity_is_noop() {
        let mut weapon = pistol();
        let mut reserve = AmmoReserve::Finite(50);
        assert!(!weapon.start_reload(&reserve, 0.0));
        assert_eq!(weapon.reload_state(), ReloadState::Idle);
        assert_eq!(weapon.poll_reload(&mut reserve, 5.0), None);
        assert_eq!(weapon.ammo, 15);
        assert_eq!(reserve, AmmoReserve::Finite(50));
    }

    #[test]
    fn test_reload_without_reserve_is_noop() {
        let mut weapon = pistol();
        weapon.ammo = 3;
        assert!(!weapon.start_reload(&AmmoReserve::Finite(0), 0.0));
        assert!(!weapon.is_reloading());
    }

    #[test]
    fn test_reload_completes_after_duration() {
        let mut weapon = pistol();
        let mut reserve = AmmoReserve::Finite(50);
        weapon.ammo = 5;
        assert!(weapon.start_reload(&reserve, 2.0));
        assert!(weapon.fire(0.0, 2.5).is_empty(), "firing is rejected while reloading");
        assert_eq!(weapon.poll_reload(&mut reserve, 2.9), None);
        assert_eq!(weapon.poll_reload(&mut reserve, 3.0), Some(10));
        assert_eq!(weapon.ammo, 15);
        assert_eq!(reserve, AmmoReserve::Finite(40));
        assert!(!weapon.is_reloading());
    }

    #[test]
    fn test_reload_takes_only_what_reserve_has() {
        let mut weapon = pistol();
        let mut reserve = AmmoReserve::Finite(4);
        weapon.ammo = 0;
        assert!(weapon.start_reload(&reserve, 0.0));
        assert_eq!(weapon.poll_reload(&mut reserve, 1.0), Some(4));
        assert_eq!(weapon.ammo, 4);
        assert_eq!(reserve, AmmoReserve::Finite(0));
    }

    #[test]
    fn test_second_reload_is_rejected_while_one_is_in_flight() {
        let mut weapon = pistol();
        let reserve = AmmoReserve::Finite(50);
        weapon.ammo = 1;
        assert!(weapon.start_reload(&reserve, 0.0));
        assert!(!weapon.start_reload(&reserve, 0.5));
        assert_eq!(
            weapon.reload_state(),
            ReloadState::Reloading {
                started_at: 0.0,
                duration: 1.0
            }
        );
    }

    #[test]
    fn test_infinite_reserve_always_refills() {
        let mut weapon = Weapon::new(WeaponKind::Sniper, WeaponTable::default().sniper);
        let mut reserve = AmmoReserve::Infinite;
        assert_eq!(weapon.fire(0.0, 0.0).len(), 1);
        assert!(weapon.start_reload(&reserve, 0.0));
        assert_eq!(weapon.poll_reload(&mut reserve, 2.5), Some(1));
        assert_eq!(reserve.count(), None);
    }

    /// A 15 round magazine driven through 20 shots with automatic reloads.
    #[test]
    fn test_twenty_shots_cycle_one_magazine_and_five_rounds() {
        let mut weapon = pistol();
        let mut reserve = AmmoReserve::Finite(100);
        let mut now = 0.0;
        let mut shots_fired = 0;
        let mut reloads = 0;

        while shots_fired < 20 {
            if weapon.poll_reload(&mut reserve, now).is_some() {
                reloads += 1;
            }
            if !weapon.is_reloading() {
                if weapon.ammo > 0 {
                    shots_fired += weapon.fire(0.0, now).len();
                } else {
                    weapon.start_reload(&reserve, now);
                }
            }
            assert!(weapon.ammo <= 15);
            now += 0.25;
        }

        assert_eq!(reloads, 1);
        assert_eq!(weapon.ammo, 10);
        assert_eq!(reserve, AmmoReserve::Finite(85));

        // Topping up moves exactly the five spent rounds.
        assert!(weapon.start_reload(&reserve, now));
        assert_eq!(weapon.poll_reload(&mut reserve, now + 1.0), Some(5));
        assert_eq!(weapon.ammo, 15);
        assert_eq!(reserve, AmmoReserve::Finite(80));
    }
}
