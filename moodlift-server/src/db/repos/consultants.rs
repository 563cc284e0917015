//! Consultant repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use super::DbError;
use crate::models::{ListPage, ListQuery};

/// Consultant record from the database
#[derive(Debug, Clone, FromRow)]
pub struct Consultant {
    pub id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a consultant
#[derive(Debug, Clone)]
pub struct ConsultantDraft {
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: bool,
}

/// Partial update; None leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct ConsultantPatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Consultant repository
pub struct ConsultantRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ConsultantRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active consultants in name order
    pub async fn list_active(&self) -> Result<Vec<Consultant>, DbError> {
        let rows = sqlx::query_as::<_, Consultant>(
            r#"
            SELECT id, name, title, bio, photo_url, is_active, created_at, updated_at
            FROM consultants
            WHERE is_active
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Admin listing with total count
    pub async fn list(&self, query: ListQuery) -> Result<ListPage<Consultant>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, title, bio, photo_url, is_active, created_at, updated_at,
                   COUNT(*) OVER() AS total
            FROM consultants
            ORDER BY name
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
            .map(|r| Consultant {
                id: r.get("id"),
                name: r.get("name"),
                title: r.get("title"),
                bio: r.get("bio"),
                photo_url: r.get("photo_url"),
                is_active: r.get("is_active"),
                created_at: r.get("created_at"),
                updated_at: r.get("updated_at"),
            })
            .collect();

        Ok(ListPage { items, total })
    }

    pub async fn create(&self, draft: ConsultantDraft) -> Result<Consultant, DbError> {
        let row = sqlx::query_as::<_, Consultant>(
            r#"
            INSERT INTO consultants (name, title, bio, photo_url, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, title, bio, photo_url, is_active, created_at, updated_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.title)
        .bind(&draft.bio)
        .bind(&draft.photo_url)
        .bind(draft.is_active)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: Uuid, patch: ConsultantPatch) -> Result<Consultant, DbError> {
        sqlx::query_as::<_, Consultant>(
            r#"
            UPDATE consultants SET
                name = COALESCE($2, name),
                title = COALESCE($3, title),
                bio = COALESCE($4, bio),
                photo_url = COALESCE($5, photo_url),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, title, bio, photo_url, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.title)
        .bind(&patch.bio)
        .bind(&patch.photo_url)
        .bind(patch.is_active)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "consultant",
            id: id.to_string(),
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM consultants WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "consultant",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
