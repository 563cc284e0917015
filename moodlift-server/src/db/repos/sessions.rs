//! Session lookup.
//!
//! Sessions are issued by the external auth service; this repo only resolves
//! bearer tokens to unexpired sessions.

use sqlx::{PgPool, Row};

use moodlift_core::{Session, UserId};

use super::DbError;

/// Read-only session repository
pub struct SessionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Resolve a bearer token to a live session, None if unknown or expired
    pub async fn find_valid(&self, token: &str) -> Result<Option<Session>, DbError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, display_name, expires_at
            FROM sessions
            WHERE token = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| Session {
            user_id: UserId(r.get("user_id")),
            display_name: r.get("display_name"),
            expires_at: r.get("expires_at"),
        }))
    }
}
