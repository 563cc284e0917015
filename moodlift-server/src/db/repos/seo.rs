//! SEO metadata repository, keyed by page path

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;
use crate::models::PagePath;

/// SEO metadata record from the database
#[derive(Debug, Clone, FromRow)]
pub struct SeoEntry {
    pub id: Uuid,
    pub page_path: String,
    pub title: String,
    pub description: Option<String>,
    pub og_image: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for upserting a page's metadata
#[derive(Debug, Clone)]
pub struct SeoUpsert {
    pub page_path: PagePath,
    pub title: String,
    pub description: Option<String>,
    pub og_image: Option<String>,
}

/// SEO metadata repository
pub struct SeoRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SeoRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Metadata for one page, if configured
    pub async fn get_by_path(&self, path: &PagePath) -> Result<Option<SeoEntry>, DbError> {
        let row = sqlx::query_as::<_, SeoEntry>(
            r#"
            SELECT id, page_path, title, description, og_image, updated_at
            FROM seo_metadata
            WHERE page_path = $1
            "#,
        )
        .bind(path.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// All configured pages in path order
    pub async fn list(&self) -> Result<Vec<SeoEntry>, DbError> {
        let rows = sqlx::query_as::<_, SeoEntry>(
            r#"
            SELECT id, page_path, title, description, og_image, updated_at
            FROM seo_metadata
            ORDER BY page_path
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert or replace the metadata for a page (idempotent per path)
    pub async fn upsert(&self, entry: SeoUpsert) -> Result<SeoEntry, DbError> {
        let row = sqlx::query_as::<_, SeoEntry>(
            r#"
            INSERT INTO seo_metadata (page_path, title, description, og_image)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (page_path) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                og_image = EXCLUDED.og_image,
                updated_at = NOW()
            RETURNING id, page_path, title, description, og_image, updated_at
            "#,
        )
        .bind(entry.page_path.as_str())
        .bind(&entry.title)
        .bind(&entry.description)
        .bind(&entry.og_image)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM seo_metadata WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "seo entry",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn upsert_is_idempotent_per_path() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool");
        crate::db::migrations::run(&pool).await.expect("migrations");

        let repo = SeoRepo::new(&pool);
        let path = PagePath::new("/seo-upsert-probe").unwrap();

        let first = repo
            .upsert(SeoUpsert {
                page_path: path.clone(),
                title: "First".into(),
                description: None,
                og_image: None,
            })
            .await
            .expect("upsert");

        let second = repo
            .upsert(SeoUpsert {
                page_path: path.clone(),
                title: "Second".into(),
                description: Some("replaced".into()),
                og_image: None,
            })
            .await
            .expect("upsert");

        assert_eq!(first.id, second.id);
        assert_eq!(second.title, "Second");

        repo.delete(first.id).await.expect("cleanup");
    }
}
