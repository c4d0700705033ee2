//! PostgreSQL database operations

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, Transaction};
use vocab_core::{next_position, plan_reorder, ImportPlan, ReviewScheduler};

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

/// An ordered child table and the parent that scopes its positions.
#[derive(Debug, Clone, Copy)]
enum OrderedScope {
    /// Topics within a collection
    Topics,
    /// Words within a topic
    Words,
}

impl OrderedScope {
    fn label(self) -> &'static str {
        match self {
            Self::Topics => "Collection",
            Self::Words => "Topic",
        }
    }

    fn lock_parent_sql(self) -> &'static str {
        match self {
            Self::Topics => "SELECT id FROM collections WHERE id = $1 FOR UPDATE",
            Self::Words => "SELECT id FROM topics WHERE id = $1 FOR UPDATE",
        }
    }

    fn max_position_sql(self) -> &'static str {
        match self {
            Self::Topics => "SELECT MAX(position) FROM topics WHERE collection_id = $1",
            Self::Words => "SELECT MAX(position) FROM words WHERE topic_id = $1",
        }
    }

    fn members_sql(self) -> &'static str {
        match self {
            Self::Topics => {
                "SELECT id FROM topics WHERE collection_id = $1 ORDER BY position, id FOR UPDATE"
            }
            Self::Words => "SELECT id FROM words WHERE topic_id = $1 ORDER BY position, id FOR UPDATE",
        }
    }

    fn rewrite_positions_sql(self) -> &'static str {
        match self {
            Self::Topics => {
                r#"
                UPDATE topics AS t
                SET position = u.position
                FROM UNNEST($2::BIGINT[], $3::INT[]) AS u(id, position)
                WHERE t.id = u.id AND t.collection_id = $1
                "#
            }
            Self::Words => {
                r#"
                UPDATE words AS w
                SET position = u.position
                FROM UNNEST($2::BIGINT[], $3::INT[]) AS u(id, position)
                WHERE w.id = u.id AND w.topic_id = $1
                "#
            }
        }
    }
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Position Management ===

    /// Lock the scope's parent row and return the next append position.
    async fn lock_scope_for_append(
        tx: &mut Transaction<'_, Postgres>,
        scope: OrderedScope,
        parent_id: i64,
    ) -> Result<i32> {
        sqlx::query_scalar::<_, i64>(scope.lock_parent_sql())
            .bind(parent_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("{} {} not found", scope.label(), parent_id)))?;

        let max_position: Option<i32> = sqlx::query_scalar(scope.max_position_sql())
            .bind(parent_id)
            .fetch_one(&mut **tx)
            .await?;

        Ok(next_position(max_position))
    }

    /// Rewrite positions in a scope from a full client ordering.
    ///
    /// The ordering must match the scope's membership exactly; on any
    /// mismatch nothing is written.
    async fn reorder_scope(
        &self,
        scope: OrderedScope,
        parent_id: i64,
        ordering: &[ClientId],
    ) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<_, i64>(scope.lock_parent_sql())
            .bind(parent_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("{} {} not found", scope.label(), parent_id)))?;

        let members: Vec<i64> = sqlx::query_scalar(scope.members_sql())
            .bind(parent_id)
            .fetch_all(&mut *tx)
            .await?;

        let updates = plan_reorder(&members, ordering)?;
        let (ids, positions): (Vec<i64>, Vec<i32>) =
            updates.iter().map(|u| (u.id, u.position)).unzip();

        let result = sqlx::query(scope.rewrite_positions_sql())
            .bind(parent_id)
            .bind(ids)
            .bind(positions)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() as usize)
    }

    // === Collection Repository ===

    /// List all collections, newest first
    pub async fn list_collections(&self) -> Result<Vec<Collection>> {
        let collections = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, name, created_at, is_visible
            FROM collections
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }

    /// Get collection by ID
    pub async fn get_collection(&self, collection_id: i64) -> Result<Option<Collection>> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, name, created_at, is_visible
            FROM collections
            WHERE id = $1
            "#,
        )
        .bind(collection_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(collection)
    }

    /// Delete a collection; topics, words and progress cascade
    pub async fn delete_collection(&self, collection_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(collection_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Flip visibility and return the new value
    pub async fn toggle_collection_visibility(&self, collection_id: i64) -> Result<Option<bool>> {
        let is_visible = sqlx::query_scalar::<_, bool>(
            r#"
            UPDATE collections
            SET is_visible = NOT is_visible
            WHERE id = $1
            RETURNING is_visible
            "#,
        )
        .bind(collection_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(is_visible)
    }

    /// Create a collection with all planned topics and words in one transaction
    pub async fn import_collection(&self, name: &str, plan: &ImportPlan) -> Result<ImportSummary> {
        let mut tx = self.pool.begin().await?;

        let collection_id: i64 =
            sqlx::query_scalar("INSERT INTO collections (name) VALUES ($1) RETURNING id")
                .bind(name)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| match ApiError::from(e) {
                    ApiError::Conflict(_) => {
                        ApiError::Conflict(format!("Collection '{}' already exists", name))
                    }
                    other => other,
                })?;

        for topic in &plan.topics {
            let topic_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO topics (name, category, position, collection_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(&topic.name)
            .bind(&topic.category)
            .bind(topic.position)
            .bind(collection_id)
            .fetch_one(&mut *tx)
            .await?;

            for word in &topic.words {
                sqlx::query(
                    r#"
                    INSERT INTO words (topic_id, word, ipa, type, meaning, example, position)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(topic_id)
                .bind(&word.word)
                .bind(&word.ipa)
                .bind(&word.word_type)
                .bind(&word.meaning)
                .bind(&word.example)
                .bind(word.position)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(ImportSummary {
            collection_id,
            collection_name: name.to_string(),
            topics_created: plan.topics.len(),
            words_created: plan.word_count(),
            words_dropped: plan.dropped_words,
        })
    }

    // === Topic Repository ===

    /// Topics of a collection in display order
    pub async fn list_topics(&self, collection_id: i64) -> Result<Vec<Topic>> {
        let topics = sqlx::query_as::<_, Topic>(
            r#"
            SELECT id, name, category, position, collection_id
            FROM topics
            WHERE collection_id = $1
            ORDER BY position, id
            "#,
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(topics)
    }

    /// Get topic by ID
    pub async fn get_topic(&self, topic_id: i64) -> Result<Option<Topic>> {
        let topic = sqlx::query_as::<_, Topic>(
            r#"
            SELECT id, name, category, position, collection_id
            FROM topics
            WHERE id = $1
            "#,
        )
        .bind(topic_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(topic)
    }

    /// Get topic by ID along with its collection's name
    pub async fn get_topic_with_collection(
        &self,
        topic_id: i64,
    ) -> Result<Option<TopicWithCollection>> {
        let topic = sqlx::query_as::<_, TopicWithCollection>(
            r#"
            SELECT t.id, t.name, t.category, t.position, t.collection_id,
                   c.name AS collection_name
            FROM topics t
            JOIN collections c ON t.collection_id = c.id
            WHERE t.id = $1
            "#,
        )
        .bind(topic_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(topic)
    }

    /// Append a topic at the end of its collection
    pub async fn append_topic(&self, collection_id: i64, input: &TopicInput) -> Result<Topic> {
        let mut tx = self.pool.begin().await?;

        let position =
            Self::lock_scope_for_append(&mut tx, OrderedScope::Topics, collection_id).await?;

        let topic = sqlx::query_as::<_, Topic>(
            r#"
            INSERT INTO topics (name, category, position, collection_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, category, position, collection_id
            "#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(position)
        .bind(collection_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(topic)
    }

    /// Rename or recategorize a topic
    pub async fn update_topic(&self, topic_id: i64, input: &TopicInput) -> Result<Option<Topic>> {
        let topic = sqlx::query_as::<_, Topic>(
            r#"
            UPDATE topics
            SET name = $2, category = $3
            WHERE id = $1
            RETURNING id, name, category, position, collection_id
            "#,
        )
        .bind(topic_id)
        .bind(&input.name)
        .bind(&input.category)
        .fetch_optional(&self.pool)
        .await?;

        Ok(topic)
    }

    /// Delete a topic; siblings keep their positions
    pub async fn delete_topic(&self, topic_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM topics WHERE id = $1")
            .bind(topic_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Rewrite topic positions within a collection
    pub async fn reorder_topics(&self, collection_id: i64, ordering: &[ClientId]) -> Result<usize> {
        self.reorder_scope(OrderedScope::Topics, collection_id, ordering)
            .await
    }

    // === Word Repository ===

    /// Words of a topic in display order
    pub async fn list_words(&self, topic_id: i64) -> Result<Vec<Word>> {
        let words = sqlx::query_as::<_, Word>(
            r#"
            SELECT id, topic_id, word, ipa, type, meaning, example, position
            FROM words
            WHERE topic_id = $1
            ORDER BY position, id
            "#,
        )
        .bind(topic_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }

    /// Get word by ID
    pub async fn get_word(&self, word_id: i64) -> Result<Option<Word>> {
        let word = sqlx::query_as::<_, Word>(
            r#"
            SELECT id, topic_id, word, ipa, type, meaning, example, position
            FROM words
            WHERE id = $1
            "#,
        )
        .bind(word_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(word)
    }

    /// Append a word at the end of its topic
    pub async fn append_word(&self, topic_id: i64, input: &WordInput) -> Result<Word> {
        let mut tx = self.pool.begin().await?;

        let position = Self::lock_scope_for_append(&mut tx, OrderedScope::Words, topic_id).await?;

        let word = sqlx::query_as::<_, Word>(
            r#"
            INSERT INTO words (topic_id, word, ipa, type, meaning, example, position)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, topic_id, word, ipa, type, meaning, example, position
            "#,
        )
        .bind(topic_id)
        .bind(&input.word)
        .bind(&input.ipa)
        .bind(&input.word_type)
        .bind(&input.meaning)
        .bind(&input.example)
        .bind(position)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(word)
    }

    /// Edit a word's content; position is left alone
    pub async fn update_word(&self, word_id: i64, input: &WordInput) -> Result<Option<Word>> {
        let word = sqlx::query_as::<_, Word>(
            r#"
            UPDATE words
            SET word = $2, meaning = $3, ipa = $4, type = $5, example = $6
            WHERE id = $1
            RETURNING id, topic_id, word, ipa, type, meaning, example, position
            "#,
        )
        .bind(word_id)
        .bind(&input.word)
        .bind(&input.meaning)
        .bind(&input.ipa)
        .bind(&input.word_type)
        .bind(&input.example)
        .fetch_optional(&self.pool)
        .await?;

        Ok(word)
    }

    /// Delete a word and its progress; siblings keep their positions
    pub async fn delete_word(&self, word_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM words WHERE id = $1")
            .bind(word_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Rewrite word positions within a topic
    pub async fn reorder_words(&self, topic_id: i64, ordering: &[ClientId]) -> Result<usize> {
        self.reorder_scope(OrderedScope::Words, topic_id, ordering)
            .await
    }

    // === Progress Repository ===

    /// Get review progress for a word
    pub async fn get_progress(&self, word_id: i64) -> Result<Option<UserWordData>> {
        let progress = sqlx::query_as::<_, UserWordData>(
            r#"
            SELECT word_id, srs_level, next_review_at, is_favorite
            FROM user_word_data
            WHERE word_id = $1
            "#,
        )
        .bind(word_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(progress)
    }

    /// Apply a review outcome to a word's progress.
    ///
    /// Reads the stored level under a lock on the word row, then inserts or
    /// updates level and due time together. `is_favorite` is never touched.
    pub async fn apply_review(
        &self,
        word_id: i64,
        outcome: ReviewOutcome,
        scheduler: &dyn ReviewScheduler,
        now: DateTime<Utc>,
    ) -> Result<ReviewApplied> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<_, i64>("SELECT id FROM words WHERE id = $1 FOR UPDATE")
            .bind(word_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Word {} not found", word_id)))?;

        let stored: Option<i32> =
            sqlx::query_scalar("SELECT srs_level FROM user_word_data WHERE word_id = $1")
                .bind(word_id)
                .fetch_optional(&mut *tx)
                .await?;

        let previous_level = match stored {
            Some(level) => scheduler.check_level(i64::from(level))?,
            None => 0,
        };
        let result = scheduler.schedule(previous_level, outcome, now);

        let sql = if stored.is_some() {
            r#"
            UPDATE user_word_data
            SET srs_level = $2, next_review_at = $3
            WHERE word_id = $1
            "#
        } else {
            r#"
            INSERT INTO user_word_data (word_id, srs_level, next_review_at)
            VALUES ($1, $2, $3)
            "#
        };

        sqlx::query(sql)
            .bind(word_id)
            .bind(i32::from(result.new_level))
            .bind(result.next_review_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(ReviewApplied {
            previous_level,
            new_level: result.new_level,
            next_review_at: result.next_review_at,
        })
    }

    // === Learner Data ===

    /// Visible collections ordered by name
    pub async fn get_visible_collections(&self) -> Result<Vec<Collection>> {
        let collections = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, name, created_at, is_visible
            FROM collections
            WHERE is_visible
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }

    /// Topics of visible collections in display order
    pub async fn get_visible_topics(&self) -> Result<Vec<Topic>> {
        let topics = sqlx::query_as::<_, Topic>(
            r#"
            SELECT t.id, t.name, t.category, t.position, t.collection_id
            FROM topics t
            JOIN collections c ON t.collection_id = c.id
            WHERE c.is_visible
            ORDER BY t.collection_id, t.position, t.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(topics)
    }

    /// Words of visible collections in display order
    pub async fn get_visible_words(&self) -> Result<Vec<Word>> {
        let words = sqlx::query_as::<_, Word>(
            r#"
            SELECT w.id, w.topic_id, w.word, w.ipa, w.type, w.meaning, w.example, w.position
            FROM words w
            JOIN topics t ON w.topic_id = t.id
            JOIN collections c ON t.collection_id = c.id
            WHERE c.is_visible
            ORDER BY w.topic_id, w.position, w.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }

    /// All review progress rows
    pub async fn get_all_progress(&self) -> Result<Vec<UserWordData>> {
        let progress = sqlx::query_as::<_, UserWordData>(
            r#"
            SELECT word_id, srs_level, next_review_at, is_favorite
            FROM user_word_data
            ORDER BY word_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(progress)
    }
}
