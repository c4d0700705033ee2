//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{ApiError, Result};

// Re-export shared types from vocab-core
pub use vocab_core::{ClientId, ImportDocument, ReviewOutcome};

// === Database Entity Types ===

/// Collection of topics
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub is_visible: bool,
}

/// Topic inside a collection
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Topic {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub position: i32,
    pub collection_id: i64,
}

/// Topic joined with its collection's name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TopicWithCollection {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub topic: Topic,
    pub collection_name: String,
}

/// Word inside a topic
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Word {
    pub id: i64,
    pub topic_id: i64,
    pub word: String,
    pub ipa: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub word_type: Option<String>,
    pub meaning: String,
    pub example: Option<String>,
    pub position: i32,
}

/// Review progress for a word
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserWordData {
    pub word_id: i64,
    pub srs_level: i32,
    pub next_review_at: Option<DateTime<Utc>>,
    pub is_favorite: bool,
}

// === API Request/Response Types ===

/// Everything the learner app needs in one payload
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse {
    pub collections: Vec<Collection>,
    pub topics: Vec<Topic>,
    pub words: Vec<Word>,
    pub user_data: Vec<UserWordData>,
}

/// POST /api/update_srs request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSrsRequest {
    #[serde(default)]
    pub word_id: Option<ClientId>,
    #[serde(default)]
    pub is_correct: bool,
}

impl UpdateSrsRequest {
    /// Resolve the reviewed word's id; absent, zero or unparsable ids are rejected.
    pub fn resolve_word_id(&self) -> Result<i64> {
        let raw = self
            .word_id
            .as_ref()
            .ok_or_else(|| ApiError::InvalidInput("Missing word_id".to_string()))?;
        raw.to_row_id()
            .map_err(|_| ApiError::InvalidInput(format!("Invalid word_id: {}", raw)))
    }
}

/// POST /api/update_srs response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSrsResponse {
    pub status: String,
    pub word_id: i64,
    pub new_level: u8,
    pub next_review_at: DateTime<Utc>,
}

/// Outcome of applying a review inside the repository
#[derive(Debug, Clone)]
pub struct ReviewApplied {
    pub previous_level: u8,
    pub new_level: u8,
    pub next_review_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CollectionListResponse {
    pub collections: Vec<Collection>,
}

/// POST /api/admin/collections/import request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    pub collection_name: String,
    #[serde(default)]
    pub document: ImportDocument,
}

/// Rows created by an import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub collection_id: i64,
    pub collection_name: String,
    pub topics_created: usize,
    pub words_created: usize,
    pub words_dropped: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VisibilityResponse {
    pub status: String,
    pub is_visible: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CollectionTopicsResponse {
    pub collection: Collection,
    pub topics: Vec<Topic>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicWordsResponse {
    pub topic: TopicWithCollection,
    pub words: Vec<Word>,
}

/// Reorder request; ids may be numbers or numeric strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    #[serde(default)]
    pub ordered_ids: Option<Vec<ClientId>>,
}

impl ReorderRequest {
    pub fn into_ids(self) -> Result<Vec<ClientId>> {
        self.ordered_ids
            .ok_or_else(|| ApiError::InvalidInput("Missing ordered_ids".to_string()))
    }
}

/// Topic create/edit form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
}

impl TopicInput {
    /// Trim fields and reject blanks.
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            name: required("name", &self.name)?,
            category: required("category", &self.category)?,
        })
    }
}

/// Word create/edit form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordInput {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub ipa: Option<String>,
    #[serde(default, rename = "type")]
    pub word_type: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
}

impl WordInput {
    /// Trim fields, reject a blank word or meaning, and clear blank extras.
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            word: required("word", &self.word)?,
            meaning: required("meaning", &self.meaning)?,
            ipa: optional(self.ipa),
            word_type: optional(self.word_type),
            example: optional(self.example),
        })
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_topic_input_trims() {
        let input = TopicInput {
            name: "  Food ".to_string(),
            category: "Daily".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(input.name, "Food");
    }

    #[test]
    fn test_topic_input_rejects_blank_category() {
        let input = TopicInput {
            name: "Food".to_string(),
            category: "   ".to_string(),
        };
        assert!(matches!(input.validate(), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_word_input_clears_blank_extras() {
        let input: WordInput = serde_json::from_str(
            r#"{"word": "apple", "meaning": "táo", "ipa": "", "type": " noun ", "example": null}"#,
        )
        .unwrap();
        let input = input.validate().unwrap();
        assert_eq!(input.ipa, None);
        assert_eq!(input.word_type.as_deref(), Some("noun"));
        assert_eq!(input.example, None);
    }

    #[test]
    fn test_word_input_requires_meaning() {
        let input: WordInput = serde_json::from_str(r#"{"word": "apple"}"#).unwrap();
        assert!(matches!(input.validate(), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_reorder_request_missing_ids() {
        let request: ReorderRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(request.into_ids(), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_update_srs_request_defaults() {
        let request: UpdateSrsRequest = serde_json::from_str(r#"{"word_id": 3}"#).unwrap();
        assert_eq!(request.resolve_word_id().unwrap(), 3);
        assert!(!request.is_correct);
    }

    #[test]
    fn test_update_srs_request_accepts_string_id() {
        let request: UpdateSrsRequest =
            serde_json::from_str(r#"{"word_id": "42", "is_correct": true}"#).unwrap();
        assert_eq!(request.resolve_word_id().unwrap(), 42);
        assert!(request.is_correct);
    }

    #[test]
    fn test_update_srs_request_rejects_bad_ids() {
        for body in [r#"{}"#, r#"{"word_id": 0}"#, r#"{"word_id": "abc"}"#, r#"{"word_id": ""}"#] {
            let request: UpdateSrsRequest = serde_json::from_str(body).unwrap();
            assert!(
                matches!(request.resolve_word_id(), Err(ApiError::InvalidInput(_))),
                "{} should be invalid input",
                body
            );
        }
    }

    #[test]
    fn test_word_serializes_type_field() {
        let word = Word {
            id: 1,
            topic_id: 2,
            word: "run".to_string(),
            ipa: None,
            word_type: Some("verb".to_string()),
            meaning: "chạy".to_string(),
            example: None,
            position: 0,
        };
        let value = serde_json::to_value(&word).unwrap();
        assert_eq!(value["type"], "verb");
    }
}
