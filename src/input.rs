//! Semantic player input.
//!
//! The input collaborator samples device state once per frame and hands the
//! engine an [`InputFrame`]; raw key codes never reach the core.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A discrete action requested this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Fire,
    Reload,
    /// Equip the weapon in this 1-based inventory slot
    Equip(usize),
}

/// Held movement directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    /// Unit-step direction before normalization, y down.
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.up {
            axis.y -= 1.0;
        }
        if self.down {
            axis.y += 1.0;
        }
        if self.left {
            axis.x -= 1.0;
        }
        if self.right {
            axis.x += 1.0;
        }
        axis
    }
}

/// Everything the player asked for in one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    pub movement: MoveKeys,
    /// Pointer position in screen space
    pub pointer: Vec2,
    pub commands: Vec<Command>,
}

impl InputFrame {
    pub fn idle(pointer: Vec2) -> Self {
        Self {
            pointer,
            ..Self::default()
        }
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }
}

/// Per-frame displacement for the held keys: `speed` along each axis, scaled
/// down on diagonals so the combined speed never exceeds `speed`.
pub fn movement_delta(keys: MoveKeys, speed: f32) -> Vec2 {
    let axis = keys.axis();
    if axis.x != 0.0 && axis.y != 0.0 {
        axis * speed * std::f32::consts::FRAC_1_SQRT_2
    } else {
        axis * speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_keys_cancel() {
        let keys = MoveKeys {
            up: true,
            down: true,
            ..MoveKeys::default()
        };
        assert_eq!(movement_delta(keys, 5.0), Vec2::ZERO);
    }

    #[test]
    fn test_diagonal_speed_is_normalized() {
        let keys = MoveKeys {
            up: true,
            right: true,
            ..MoveKeys::default()
        };
        let delta = movement_delta(keys, 5.0);
        assert!((delta.length() - 5.0).abs() < 1e-4);
        assert!(delta.x > 0.0 && delta.y < 0.0);
    }

    #[test]
    fn test_straight_speed_is_unscaled() {
        let keys = MoveKeys {
            left: true,
            ..MoveKeys::default()
        };
        assert_eq!(movement_delta(keys, 5.0), Vec2::new(-5.0, 0.0));
    }
}
