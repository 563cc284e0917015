//! Game repository.
//!
//! Games are seeded out of band; the HTTP surface only reads them, filtered
//! by mood the same way books are.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use moodlift_core::MoodResult;

use super::DbError;

/// Game record from the database
#[derive(Debug, Clone, FromRow)]
pub struct Game {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub play_url: Option<String>,
    pub mood_tags: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Game repository
pub struct GameRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> GameRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active games, optionally filtered by mood (untagged rows match all)
    pub async fn list_public(&self, mood: Option<MoodResult>) -> Result<Vec<Game>, DbError> {
        let rows = sqlx::query_as::<_, Game>(
            r#"
            SELECT id, title, description, play_url, mood_tags,
                   active, created_at, updated_at
            FROM games
            WHERE active
              AND ($1::text IS NULL OR mood_tags = '{}' OR $1 = ANY(mood_tags))
            ORDER BY title
            "#,
        )
        .bind(mood.map(|m| m.slug()))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests - run with DATABASE_URL set:
    // cargo test -p moodlift-server -- --ignored

    async fn pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool");
        crate::db::migrations::run(&pool).await.expect("migrations");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_public_returns_only_active_rows() {
        let pool = pool().await;
        let repo = GameRepo::new(&pool);

        let rows = repo.list_public(None).await.expect("list");
        assert!(rows.iter().all(|g| g.active));
    }
}
