//! Book repository.
//!
//! Public reads filter by `active` and mood tags; admin CRUD works on the
//! full table. The mood filter matches the core rule: untagged rows are
//! generic and show for every mood.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use moodlift_core::MoodResult;

use super::DbError;
use crate::models::{ListPage, ListQuery};

/// Book record from the database
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub mood_tags: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a book
#[derive(Debug, Clone)]
pub struct BookDraft {
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub mood_tags: Vec<String>,
    pub active: bool,
}

/// Partial update; None leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub mood_tags: Option<Vec<String>>,
    pub active: Option<bool>,
}

/// Book repository
pub struct BookRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BookRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Public listing: active rows, optionally filtered by mood.
    ///
    /// Untagged rows match every mood; tagged rows must carry the mood slug.
    pub async fn list_public(&self, mood: Option<MoodResult>) -> Result<Vec<Book>, DbError> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, description, cover_url, mood_tags,
                   active, created_at, updated_at
            FROM books
            WHERE active
              AND ($1::text IS NULL OR mood_tags = '{}' OR $1 = ANY(mood_tags))
            ORDER BY created_at DESC
            "#,
        )
        .bind(mood.map(|m| m.slug()))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Admin listing with total count, newest first
    pub async fn list(&self, query: ListQuery) -> Result<ListPage<Book>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, description, cover_url, mood_tags,
                   active, created_at, updated_at,
                   COUNT(*) OVER() AS total
            FROM books
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
            .map(|r| Book {
                id: r.get("id"),
                title: r.get("title"),
                author: r.get("author"),
                description: r.get("description"),
                cover_url: r.get("cover_url"),
                mood_tags: r.get("mood_tags"),
                active: r.get("active"),
                created_at: r.get("created_at"),
                updated_at: r.get("updated_at"),
            })
            .collect();

        Ok(ListPage { items, total })
    }

    pub async fn get(&self, id: Uuid) -> Result<Book, DbError> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, description, cover_url, mood_tags,
                   active, created_at, updated_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "book",
            id: id.to_string(),
        })
    }

    pub async fn create(&self, draft: BookDraft) -> Result<Book, DbError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, description, cover_url, mood_tags, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, author, description, cover_url, mood_tags,
                      active, created_at, updated_at
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.description)
        .bind(&draft.cover_url)
        .bind(&draft.mood_tags)
        .bind(draft.active)
        .fetch_one(self.pool)
        .await?;

        Ok(book)
    }

    /// Apply a partial update; unset fields keep their current value
    pub async fn update(&self, id: Uuid, patch: BookPatch) -> Result<Book, DbError> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                description = COALESCE($4, description),
                cover_url = COALESCE($5, cover_url),
                mood_tags = COALESCE($6, mood_tags),
                active = COALESCE($7, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, author, description, cover_url, mood_tags,
                      active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.author)
        .bind(&patch.description)
        .bind(&patch.cover_url)
        .bind(&patch.mood_tags)
        .bind(patch.active)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "book",
            id: id.to_string(),
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "book",
                id: id.to_string(),
            });
        }
        Ok(())
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
    async fn create_get_update_delete() {
        let pool = pool().await;
        let repo = BookRepo::new(&pool);

        let book = repo
            .create(BookDraft {
                title: "The Upward Spiral".into(),
                author: Some("Alex Korb".into()),
                description: None,
                cover_url: None,
                mood_tags: vec!["needs-support".into()],
                active: true,
            })
            .await
            .expect("create");

        let fetched = repo.get(book.id).await.expect("get");
        assert_eq!(fetched.title, "The Upward Spiral");

        let updated = repo
            .update(
                book.id,
                BookPatch {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .expect("update");
        assert!(!updated.active);
        assert_eq!(updated.title, "The Upward Spiral");

        repo.delete(book.id).await.expect("delete");
        assert!(matches!(
            repo.get(book.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn public_list_filters_by_mood() {
        let pool = pool().await;
        let repo = BookRepo::new(&pool);

        let tagged = repo
            .create(BookDraft {
                title: "mood filter probe".into(),
                author: None,
                description: None,
                cover_url: None,
                mood_tags: vec!["great".into()],
                active: true,
            })
            .await
            .expect("create");

        let for_great = repo.list_public(Some(MoodResult::Great)).await.expect("list");
        assert!(for_great.iter().any(|b| b.id == tagged.id));

        let for_low = repo
            .list_public(Some(MoodResult::NeedsSupport))
            .await
            .expect("list");
        assert!(!for_low.iter().any(|b| b.id == tagged.id));

        repo.delete(tagged.id).await.expect("cleanup");
    }
}
