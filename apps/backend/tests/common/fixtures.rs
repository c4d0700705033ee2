//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

use vocab_backend::models::ImportDocument;

/// Generate a unique collection name to avoid collisions between runs.
pub fn unique_name(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().to_string()[..8])
}

/// Build a document with `num_topics` topics of `words_per_topic` words each.
pub fn sample_document(num_topics: usize, words_per_topic: usize) -> ImportDocument {
    let topics: Vec<_> = (0..num_topics)
        .map(|t| json!({ "id": t + 1, "name": format!("Topic {}", t + 1), "category": "General" }))
        .collect();

    let vocabulary: Vec<_> = (0..num_topics)
        .flat_map(|t| {
            (0..words_per_topic).map(move |w| {
                json!({
                    "topic_id": t + 1,
                    "word": format!("word-{}-{}", t + 1, w + 1),
                    "ipa": "/wɜːd/",
                    "type": "noun",
                    "meaning": format!("meaning {}", w + 1),
                })
            })
        })
        .collect();

    serde_json::from_value(json!({ "topics": topics, "vocabulary": vocabulary })).unwrap()
}

/// Create an import request body.
pub fn import_request(name: &str, document: &ImportDocument) -> serde_json::Value {
    json!({ "collection_name": name, "document": document })
}

/// Create an update_srs request body.
pub fn review_request(word_id: i64, is_correct: bool) -> serde_json::Value {
    json!({ "word_id": word_id, "is_correct": is_correct })
}

/// Create a reorder request body.
pub fn reorder_request(ids: &[i64]) -> serde_json::Value {
    json!({ "ordered_ids": ids })
}

/// Create a topic form body.
pub fn topic_input(name: &str, category: &str) -> serde_json::Value {
    json!({ "name": name, "category": category })
}

/// Create a word form body.
pub fn word_input(word: &str, meaning: &str) -> serde_json::Value {
    json!({ "word": word, "meaning": meaning })
}
