//! Session and user types.
//!
//! Sessions are issued by the external auth collaborator; this app only reads
//! them. The opaque token is looked up server-side and resolved to a
//! [`Session`] carrying the user id and a few profile fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque user identifier owned by the auth provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// An authenticated session, resolved from a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its expiry
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expiry_check() {
        let now = Utc::now();
        let live = Session {
            user_id: UserId(Uuid::new_v4()),
            display_name: None,
            expires_at: now + Duration::hours(1),
        };
        assert!(!live.is_expired(now));

        let dead = Session {
            expires_at: now - Duration::seconds(1),
            ..live.clone()
        };
        assert!(dead.is_expired(now));
    }
}
