//! Spaced repetition scheduling.

pub mod ladder;

use chrono::{DateTime, Duration, Utc};

use crate::error::{CoreError, Result};
use crate::types::ReviewOutcome;

/// Result of scheduling a word after review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingResult {
    pub new_level: u8,
    pub interval: Duration,
    pub next_review_at: DateTime<Utc>,
}

/// Trait for level-based review schedulers.
pub trait ReviewScheduler: Send + Sync {
    /// Scheduler identifier.
    fn name(&self) -> &'static str;

    /// Highest reachable level.
    fn max_level(&self) -> u8;

    /// Level after a review. Must depend only on the two inputs.
    fn next_level(&self, current: u8, outcome: ReviewOutcome) -> u8;

    /// Delay until the next review for a word sitting at `level`.
    fn interval_for(&self, level: u8) -> Duration;

    /// Calculate the next level and review time after a review.
    fn schedule(&self, current: u8, outcome: ReviewOutcome, now: DateTime<Utc>) -> SchedulingResult {
        let new_level = self.next_level(current, outcome);
        let interval = self.interval_for(new_level);

        SchedulingResult {
            new_level,
            interval,
            next_review_at: now + interval,
        }
    }

    /// Validate a level read back from storage.
    fn check_level(&self, stored: i64) -> Result<u8> {
        let max = self.max_level();
        if (0..=i64::from(max)).contains(&stored) {
            Ok(stored as u8)
        } else {
            Err(CoreError::LevelOutOfRange { level: stored, max })
        }
    }
}
