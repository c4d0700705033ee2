//! Bulk import planning.
//!
//! Document format:
//! ```json
//! {
//!   "topics": [{ "id": 1, "name": "Food", "category": "Daily life" }],
//!   "vocabulary": [{ "topic_id": 1, "word": "apple", "meaning": "quả táo" }]
//! }
//! ```
//!
//! Topic ids are local to the document. Vocabulary entries pointing at an
//! unknown local id are dropped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::ClientId;

/// A collection document as uploaded by an admin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportDocument {
    #[serde(default)]
    pub topics: Vec<ImportTopic>,
    #[serde(default)]
    pub vocabulary: Vec<ImportWord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportTopic {
    pub id: ClientId,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportWord {
    #[serde(default)]
    pub topic_id: Option<ClientId>,
    pub word: String,
    #[serde(default)]
    pub ipa: Option<String>,
    #[serde(default, rename = "type")]
    pub word_type: Option<String>,
    pub meaning: String,
    #[serde(default)]
    pub example: Option<String>,
}

/// Word ready to insert, with its position inside the new topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWord {
    pub word: String,
    pub ipa: Option<String>,
    pub word_type: Option<String>,
    pub meaning: String,
    pub example: Option<String>,
    pub position: i32,
}

/// Topic ready to insert, with its position inside the new collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTopic {
    pub name: String,
    pub category: String,
    pub position: i32,
    pub words: Vec<PlannedWord>,
}

/// Rows to create for one import, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPlan {
    pub topics: Vec<PlannedTopic>,
    pub dropped_words: usize,
}

impl ImportPlan {
    /// Lay out topics and words with dense positions.
    ///
    /// When two topics share a local id the later one receives the words.
    pub fn from_document(document: ImportDocument) -> Self {
        let mut local_ids: HashMap<ClientId, usize> = HashMap::new();
        let mut topics = Vec::with_capacity(document.topics.len());

        for (index, topic) in document.topics.into_iter().enumerate() {
            local_ids.insert(topic.id, index);
            topics.push(PlannedTopic {
                name: topic.name,
                category: topic.category,
                position: index as i32,
                words: Vec::new(),
            });
        }

        let mut dropped_words = 0;
        for entry in document.vocabulary {
            let target = entry
                .topic_id
                .as_ref()
                .and_then(|local| local_ids.get(local))
                .copied();

            let Some(index) = target else {
                dropped_words += 1;
                continue;
            };

            let topic = &mut topics[index];
            let position = topic.words.len() as i32;
            topic.words.push(PlannedWord {
                word: entry.word,
                ipa: entry.ipa,
                word_type: entry.word_type,
                meaning: entry.meaning,
                example: entry.example,
                position,
            });
        }

        Self {
            topics,
            dropped_words,
        }
    }

    /// Total number of words that will be inserted.
    pub fn word_count(&self) -> usize {
        self.topics.iter().map(|t| t.words.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> ImportDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn plans_topics_and_words_in_order() {
        let doc = parse(
            r#"{
                "topics": [
                    {"id": 1, "name": "Food", "category": "Daily"},
                    {"id": 2, "name": "Travel", "category": "Daily"}
                ],
                "vocabulary": [
                    {"topic_id": 2, "word": "ticket", "meaning": "vé"},
                    {"topic_id": 1, "word": "apple", "ipa": "/ˈæp.əl/", "type": "noun", "meaning": "táo"},
                    {"topic_id": 2, "word": "luggage", "meaning": "hành lý", "example": "Pack your luggage."}
                ]
            }"#,
        );

        let plan = ImportPlan::from_document(doc);

        assert_eq!(plan.topics.len(), 2);
        assert_eq!(plan.topics[0].position, 0);
        assert_eq!(plan.topics[1].position, 1);
        assert_eq!(plan.word_count(), 3);
        assert_eq!(plan.dropped_words, 0);

        let food = &plan.topics[0];
        assert_eq!(food.words[0].word, "apple");
        assert_eq!(food.words[0].word_type.as_deref(), Some("noun"));
        assert_eq!(food.words[0].position, 0);

        let travel: Vec<(&str, i32)> = plan.topics[1]
            .words
            .iter()
            .map(|w| (w.word.as_str(), w.position))
            .collect();
        assert_eq!(travel, vec![("ticket", 0), ("luggage", 1)]);
    }

    #[test]
    fn drops_unmatched_and_missing_topic_ids() {
        let doc = parse(
            r#"{
                "topics": [{"id": "a", "name": "Food", "category": "Daily"}],
                "vocabulary": [
                    {"topic_id": "a", "word": "bread", "meaning": "bánh mì"},
                    {"topic_id": "b", "word": "ghost", "meaning": "ma"},
                    {"word": "orphan", "meaning": "mồ côi"}
                ]
            }"#,
        );

        let plan = ImportPlan::from_document(doc);
        assert_eq!(plan.word_count(), 1);
        assert_eq!(plan.dropped_words, 2);
    }

    #[test]
    fn numeric_and_string_local_ids_are_distinct() {
        let doc = parse(
            r#"{
                "topics": [{"id": 1, "name": "Food", "category": "Daily"}],
                "vocabulary": [{"topic_id": "1", "word": "rice", "meaning": "cơm"}]
            }"#,
        );

        let plan = ImportPlan::from_document(doc);
        assert_eq!(plan.word_count(), 0);
        assert_eq!(plan.dropped_words, 1);
    }

    #[test]
    fn repeated_local_id_maps_to_later_topic() {
        let doc = parse(
            r#"{
                "topics": [
                    {"id": 1, "name": "First", "category": "x"},
                    {"id": 1, "name": "Second", "category": "x"}
                ],
                "vocabulary": [{"topic_id": 1, "word": "word", "meaning": "từ"}]
            }"#,
        );

        let plan = ImportPlan::from_document(doc);
        assert_eq!(plan.topics.len(), 2);
        assert!(plan.topics[0].words.is_empty());
        assert_eq!(plan.topics[1].words.len(), 1);
    }

    #[test]
    fn empty_document_defaults() {
        let plan = ImportPlan::from_document(parse("{}"));
        assert_eq!(plan, ImportPlan::default());
    }
}
