//! Postgres implementation of the core favorites store.
//!
//! Rows are keyed (user_id, item_type, item_id); inserts use
//! `ON CONFLICT DO NOTHING` so a repeated toggle-on stays idempotent, and
//! deletes are equality-filtered so toggle-off of an absent row is a no-op.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::str::FromStr;

use moodlift_core::{FavoriteKey, FavoriteStore, ItemKind, StoreError, UserId};

/// Favorites store backed by the `user_favorites` table
#[derive(Clone)]
pub struct PgFavoriteStore {
    pool: PgPool,
}

impl PgFavoriteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn remote(err: sqlx::Error) -> StoreError {
    StoreError::Remote(err.to_string())
}

#[async_trait]
impl FavoriteStore for PgFavoriteStore {
    async fn list_for_user(&self, user: UserId) -> Result<Vec<FavoriteKey>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT item_type, item_id
            FROM user_favorites
            WHERE user_id = $1
            "#,
        )
        .bind(user.0)
        .fetch_all(&self.pool)
        .await
        .map_err(remote)?;

        let mut keys = Vec::with_capacity(rows.len());
        for row in rows {
            let item_type: String = row.get("item_type");
            match ItemKind::from_str(&item_type) {
                Ok(kind) => keys.push(FavoriteKey::new(kind, row.get("item_id"))),
                // Unknown kinds are skipped rather than failing the whole fetch
                Err(_) => tracing::warn!(%user, item_type, "skipping favorite with unknown type"),
            }
        }
        Ok(keys)
    }

    async fn insert(&self, user: UserId, key: FavoriteKey) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO user_favorites (user_id, item_type, item_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, item_type, item_id) DO NOTHING
            "#,
        )
        .bind(user.0)
        .bind(key.kind.as_str())
        .bind(key.item_id)
        .execute(&self.pool)
        .await
        .map_err(remote)?;

        Ok(())
    }

    async fn delete(&self, user: UserId, key: FavoriteKey) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            DELETE FROM user_favorites
            WHERE user_id = $1 AND item_type = $2 AND item_id = $3
            "#,
        )
        .bind(user.0)
        .bind(key.kind.as_str())
        .bind(key.item_id)
        .execute(&self.pool)
        .await
        .map_err(remote)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn round_trip_against_table() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool");
        crate::db::migrations::run(&pool).await.expect("migrations");

        let store = PgFavoriteStore::new(pool);
        let user = UserId(Uuid::new_v4());
        let key = FavoriteKey::new(ItemKind::Book, Uuid::new_v4());

        store.insert(user, key).await.expect("insert");
        // Second insert hits ON CONFLICT DO NOTHING
        store.insert(user, key).await.expect("insert again");

        let listed = store.list_for_user(user).await.expect("list");
        assert_eq!(listed, vec![key]);

        store.delete(user, key).await.expect("delete");
        assert!(store.list_for_user(user).await.expect("list").is_empty());
    }
}
