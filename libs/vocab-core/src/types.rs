//! Core types for the vocabulary application.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Outcome of a single review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    Correct,
    Incorrect,
}

impl ReviewOutcome {
    /// Map the learner's boolean answer to an outcome.
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// An identifier as a client sent it.
///
/// Browsers hand back `dataset.id` strings while import documents usually
/// carry numbers, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientId {
    Int(i64),
    Text(String),
}

impl ClientId {
    /// Resolve to a database id. Only positive integers qualify.
    pub fn to_row_id(&self) -> Result<i64> {
        let id = match self {
            Self::Int(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<i64>().ok(),
        };

        match id {
            Some(n) if n > 0 => Ok(n),
            _ => Err(CoreError::InvalidId {
                value: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for ClientId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
