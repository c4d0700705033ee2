//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Helpers for seeding collections through the import path
//! - Direct row queries for asserting on persisted state
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL env var).

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use vocab_core::ImportPlan;

use vocab_backend::db::Database;
use vocab_backend::models::{ImportDocument, ImportSummary, UserWordData};
use vocab_backend::{build_router, AppState};

/// Test context containing database connection and router.
///
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url, 5)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let db = Arc::new(db);
        let app = build_router(AppState::new(db.clone()));

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Start an in-process test server.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Seed a collection directly through the repository.
    pub async fn seed_collection(&self, name: &str, document: ImportDocument) -> ImportSummary {
        let plan = ImportPlan::from_document(document);
        self.db
            .import_collection(name, &plan)
            .await
            .expect("Failed to seed collection")
    }

    /// Topic ids of a collection in display order.
    pub async fn topic_ids(&self, collection_id: i64) -> Vec<i64> {
        self.db
            .list_topics(collection_id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect()
    }

    /// Word ids of a topic in display order.
    pub async fn word_ids(&self, topic_id: i64) -> Vec<i64> {
        self.db
            .list_words(topic_id)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect()
    }

    /// Review progress for a word, if any.
    pub async fn progress(&self, word_id: i64) -> Option<UserWordData> {
        self.db.get_progress(word_id).await.unwrap()
    }

    /// Count rows in `table` matching `column = value`.
    pub async fn count_rows(&self, table: &str, column: &str, value: i64) -> i64 {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE {} = $1", table, column);
        sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_one(self.db.pool())
            .await
            .unwrap()
    }

    /// Remove a collection and everything under it.
    pub async fn cleanup_collection(&self, collection_id: i64) {
        let _ = self.db.delete_collection(collection_id).await;
    }
}
