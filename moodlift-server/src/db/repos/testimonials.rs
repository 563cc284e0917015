//! Testimonial repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use super::DbError;
use crate::models::{ListPage, ListQuery};

/// Testimonial record from the database
#[derive(Debug, Clone, FromRow)]
pub struct Testimonial {
    pub id: Uuid,
    pub author_name: String,
    pub quote: String,
    pub rating: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a testimonial
#[derive(Debug, Clone)]
pub struct TestimonialDraft {
    pub author_name: String,
    pub quote: String,
    pub rating: i32,
    pub active: bool,
}

/// Partial update; None leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct TestimonialPatch {
    pub author_name: Option<String>,
    pub quote: Option<String>,
    pub rating: Option<i32>,
    pub active: Option<bool>,
}

/// Testimonial repository
pub struct TestimonialRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TestimonialRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active testimonials, newest first
    pub async fn list_active(&self) -> Result<Vec<Testimonial>, DbError> {
        let rows = sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT id, author_name, quote, rating, active, created_at, updated_at
            FROM testimonials
            WHERE active
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Admin listing with total count
    pub async fn list(&self, query: ListQuery) -> Result<ListPage<Testimonial>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, author_name, quote, rating, active, created_at, updated_at,
                   COUNT(*) OVER() AS total
            FROM testimonials
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(query.limit() as i64)
        .bind(query.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        let items = rows
            .into_iter()
            .map(|r| Testimonial {
                id: r.get("id"),
                author_name: r.get("author_name"),
                quote: r.get("quote"),
                rating: r.get("rating"),
                active: r.get("active"),
                created_at: r.get("created_at"),
                updated_at: r.get("updated_at"),
            })
            .collect();

        Ok(ListPage { items, total })
    }

    pub async fn create(&self, draft: TestimonialDraft) -> Result<Testimonial, DbError> {
        let row = sqlx::query_as::<_, Testimonial>(
            r#"
            INSERT INTO testimonials (author_name, quote, rating, active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_name, quote, rating, active, created_at, updated_at
            "#,
        )
        .bind(&draft.author_name)
        .bind(&draft.quote)
        .bind(draft.rating)
        .bind(draft.active)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: Uuid, patch: TestimonialPatch) -> Result<Testimonial, DbError> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            UPDATE testimonials SET
                author_name = COALESCE($2, author_name),
                quote = COALESCE($3, quote),
                rating = COALESCE($4, rating),
                active = COALESCE($5, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, author_name, quote, rating, active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.author_name)
        .bind(&patch.quote)
        .bind(patch.rating)
        .bind(patch.active)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "testimonial",
            id: id.to_string(),
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "testimonial",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
