//! Run score: flat points per elapsed minute and per enemy eliminated.

use crate::config::ScoreConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreKeeper {
    pub score: u32,
    /// Seconds since the minute timer was last restarted
    elapsed: f64,
    /// Whole minutes already paid out
    minutes_paid: u64,
    minute_points: u32,
    elimination_points: u32,
}

impl ScoreKeeper {
    pub fn new(config: &ScoreConfig) -> Self {
        Self {
            score: 0,
            elapsed: 0.0,
            minutes_paid: 0,
            minute_points: config.minute_points,
            elimination_points: config.elimination_points,
        }
    }

    /// Advance the minute timer by `dt` seconds and credit `eliminations`.
    /// Returns the points earned this call.
    pub fn update(&mut self, dt: f64, eliminations: usize) -> u32 {
        self.elapsed += dt.max(0.0);
        let minutes = (self.elapsed / 60.0).floor() as u64;
        let new_minutes = minutes.saturating_sub(self.minutes_paid);
        self.minutes_paid = minutes;

        let earned = (new_minutes as u32)
            .saturating_mul(self.minute_points)
            .saturating_add((eliminations as u32).saturating_mul(self.elimination_points));
        self.score = self.score.saturating_add(earned);
        earned
    }

    /// Start counting minutes from zero again; the score is kept.
    pub fn restart_timer(&mut self) {
        self.elapsed = 0.0;
        self.minutes_paid = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keeper() -> ScoreKeeper {
        ScoreKeeper::new(&ScoreConfig::default())
    }

    #[test]
    fn test_minute_points_paid_once_per_minute() {
        let mut score = keeper();
        // 3600 frames at 60 Hz make one minute
        for _ in 0..3599 {
            score.update(1.0 / 60.0, 0);
        }
        assert_eq!(score.score, 0);
        score.update(0.5, 0);
        assert_eq!(score.score, 5);
        score.update(1.0, 0);
        assert_eq!(score.score, 5);
    }

    #[test]
    fn test_eliminations_add_flat_points() {
        let mut score = keeper();
        assert_eq!(score.update(0.0, 3), 30);
        assert_eq!(score.score, 30);
    }

    #[test]
    fn test_restart_timer_keeps_score() {
        let mut score = keeper();
        score.update(90.0, 1);
        assert_eq!(score.score, 15);
        score.restart_timer();
        score.update(30.0, 0);
        assert_eq!(score.score, 15);
        score.update(30.0, 0);
        assert_eq!(score.score, 20);
    }
}
