//! Fixed-interval Leitner ladder.
//!
//! A correct answer climbs one rung, a wrong answer drops two. Each rung maps
//! to a fixed delay; rung 0 is retried after a short fixed delay.

use chrono::Duration;

use super::ReviewScheduler;
use crate::types::ReviewOutcome;

/// Review delays in hours, indexed by `level - 1`.
pub const DEFAULT_INTERVALS_HOURS: [i64; 7] = [4, 8, 24, 72, 168, 336, 720];

/// Delay for words at level 0.
pub const DEFAULT_RETRY_HOURS: i64 = 1;

/// Levels lost on a wrong answer.
pub const DEFAULT_LAPSE_PENALTY: u8 = 2;

/// Leitner ladder with configurable rungs.
#[derive(Debug, Clone)]
pub struct Ladder {
    pub intervals_hours: Vec<i64>,
    pub retry_hours: i64,
    pub lapse_penalty: u8,
}

impl Default for Ladder {
    fn default() -> Self {
        Self {
            intervals_hours: DEFAULT_INTERVALS_HOURS.to_vec(),
            retry_hours: DEFAULT_RETRY_HOURS,
            lapse_penalty: DEFAULT_LAPSE_PENALTY,
        }
    }
}

impl ReviewScheduler for Ladder {
    fn name(&self) -> &'static str {
        "ladder"
    }

    fn max_level(&self) -> u8 {
        self.intervals_hours.len() as u8
    }

    fn next_level(&self, current: u8, outcome: ReviewOutcome) -> u8 {
        match outcome {
            ReviewOutcome::Correct => current.saturating_add(1).min(self.max_level()),
            ReviewOutcome::Incorrect => current.saturating_sub(self.lapse_penalty),
        }
    }

    fn interval_for(&self, level: u8) -> Duration {
        let hours = match level {
            0 => self.retry_hours,
            n => self
                .intervals_hours
                .get(usize::from(n) - 1)
                .or(self.intervals_hours.last())
                .copied()
                .unwrap_or(self.retry_hours),
        };
        Duration::hours(hours)
    }
}
