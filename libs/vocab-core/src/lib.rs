//! Core vocabulary library shared by the backend and its tests.
//!
//! Provides:
//! - Spaced repetition ladder (level transitions and review intervals)
//! - Position planning for ordered topics and words
//! - Bulk import planning for collection documents
//! - Shared types (ClientId, ReviewOutcome, etc.)

pub mod algorithm;
pub mod error;
pub mod import;
pub mod position;
pub mod types;

pub use algorithm::{ladder::Ladder, ReviewScheduler, SchedulingResult};
pub use error::{CoreError, Result};
pub use import::{ImportDocument, ImportPlan, ImportTopic, ImportWord, PlannedTopic, PlannedWord};
pub use position::{next_position, plan_reorder, PositionUpdate};
pub use types::{ClientId, ReviewOutcome};
