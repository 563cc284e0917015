//! FAQ repository (read-only surface)

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;

/// FAQ record from the database
#[derive(Debug, Clone, FromRow)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub position: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// FAQ repository
pub struct FaqRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> FaqRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active FAQs in display order
    pub async fn list_active(&self) -> Result<Vec<Faq>, DbError> {
        let rows = sqlx::query_as::<_, Faq>(
            r#"
            SELECT id, question, answer, position, active, created_at
            FROM faqs
            WHERE active
            ORDER BY position, created_at
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
