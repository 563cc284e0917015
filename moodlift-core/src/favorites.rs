//! Favorites synchronization service.
//!
//! Maintains an in-memory set of favorited item keys for the current user,
//! mirrored to a remote `user_favorites` table behind the [`FavoriteStore`]
//! trait. The service is session-scoped: request handlers construct one per
//! session rather than sharing ambient global state, so mutation is
//! serialized by `&mut self` and rapid repeated toggles cannot interleave.
//!
//! Consistency contract: the local set is an eventually-consistent cache of
//! the remote table filtered by the current user. It is rebuilt in full on
//! user change. Mutations are remote-first: local state changes only after
//! the remote call succeeds. Remote errors are logged and swallowed; the
//! caller sees unchanged membership, and [`FavoritesService::reconcile`]
//! re-fetches the authoritative set to bound any divergence.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::CoreError;
use crate::session::UserId;

/// Kind of item that can be favorited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Game,
    Book,
}

impl ItemKind {
    /// Value stored in the `item_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Book => "book",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "game" => Ok(Self::Game),
            "book" => Ok(Self::Book),
            other => Err(CoreError::invalid_value("item type", other)),
        }
    }
}

/// Identity of a favorited item: (item_type, item_id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteKey {
    pub kind: ItemKind,
    pub item_id: Uuid,
}

impl FavoriteKey {
    pub fn new(kind: ItemKind, item_id: Uuid) -> Self {
        Self { kind, item_id }
    }
}

/// Error from the remote favorites store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("remote store error: {0}")]
    Remote(String),
}

/// Remote persistence for favorites, keyed by (user, item_type, item_id).
///
/// The server crate provides the Postgres implementation; tests use an
/// in-memory double.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn list_for_user(&self, user: UserId) -> Result<Vec<FavoriteKey>, StoreError>;
    async fn insert(&self, user: UserId, key: FavoriteKey) -> Result<(), StoreError>;
    async fn delete(&self, user: UserId, key: FavoriteKey) -> Result<(), StoreError>;
}

/// Session-scoped favorites cache synchronized to a remote store
pub struct FavoritesService<S> {
    store: S,
    user: Option<UserId>,
    local: HashSet<FavoriteKey>,
}

impl<S: FavoriteStore> FavoritesService<S> {
    /// Create a service with no authenticated user (all mutations no-op)
    pub fn new(store: S) -> Self {
        Self {
            store,
            user: None,
            local: HashSet::new(),
        }
    }

    /// Create a service bound to a user; call [`fetch_all`](Self::fetch_all)
    /// to populate it
    pub fn for_user(store: S, user: UserId) -> Self {
        Self {
            store,
            user: Some(user),
            local: HashSet::new(),
        }
    }

    /// Current user, if any
    pub fn user(&self) -> Option<UserId> {
        self.user
    }

    /// Favorited keys, in no particular order
    pub fn favorites(&self) -> impl Iterator<Item = &FavoriteKey> {
        self.local.iter()
    }

    pub fn len(&self) -> usize {
        self.local.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty()
    }

    pub fn contains(&self, key: &FavoriteKey) -> bool {
        self.local.contains(key)
    }

    /// Switch the current user, clearing the previous user's set before
    /// loading the new one. `None` signs out and leaves an empty set.
    pub async fn set_user(&mut self, user: Option<UserId>) {
        self.user = user;
        self.local.clear();
        if self.user.is_some() {
            self.fetch_all().await;
        }
    }

    /// Replace the local set with the remote rows for the current user.
    ///
    /// On error the prior state is left untouched. No-op when signed out.
    pub async fn fetch_all(&mut self) {
        let Some(user) = self.user else {
            return;
        };

        match self.store.list_for_user(user).await {
            Ok(keys) => {
                self.local = keys.into_iter().collect();
            }
            Err(err) => {
                tracing::warn!(%user, "failed to fetch favorites: {err}");
            }
        }
    }

    /// Toggle membership of a key, remote-first.
    ///
    /// Returns the resulting membership. On a remote error the local set is
    /// unchanged and the previous membership is returned.
    pub async fn toggle(&mut self, key: FavoriteKey) -> bool {
        let Some(user) = self.user else {
            return false;
        };

        if self.local.contains(&key) {
            match self.store.delete(user, key).await {
                Ok(()) => {
                    self.local.remove(&key);
                    false
                }
                Err(err) => {
                    tracing::warn!(%user, item = %key.item_id, "favorite delete failed: {err}");
                    true
                }
            }
        } else {
            match self.store.insert(user, key).await {
                Ok(()) => {
                    self.local.insert(key);
                    true
                }
                Err(err) => {
                    tracing::warn!(%user, item = %key.item_id, "favorite insert failed: {err}");
                    false
                }
            }
        }
    }

    /// Unconditional delete plus local removal; idempotent when absent
    pub async fn remove(&mut self, key: FavoriteKey) {
        let Some(user) = self.user else {
            return;
        };

        match self.store.delete(user, key).await {
            Ok(()) => {
                self.local.remove(&key);
            }
            Err(err) => {
                tracing::warn!(%user, item = %key.item_id, "favorite remove failed: {err}");
            }
        }
    }

    /// Re-fetch the authoritative set from the store.
    ///
    /// A failed mutation leaves the cache behind the remote table; this pass
    /// brings the two back together instead of waiting for the next sign-in.
    pub async fn reconcile(&mut self) {
        self.fetch_all().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// In-memory store double; `fail` makes every call error
    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<HashSet<(UserId, FavoriteKey)>>,
        fail: AtomicBool,
    }

    impl MemoryStore {
        fn check(&self) -> Result<(), StoreError> {
            if self.fail.load(Ordering::Relaxed) {
                Err(StoreError::Remote("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl FavoriteStore for &MemoryStore {
        async fn list_for_user(&self, user: UserId) -> Result<Vec<FavoriteKey>, StoreError> {
            self.check()?;
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|(u, _)| *u == user)
                .map(|(_, k)| *k)
                .collect())
        }

        async fn insert(&self, user: UserId, key: FavoriteKey) -> Result<(), StoreError> {
            self.check()?;
            self.rows.lock().unwrap().insert((user, key));
            Ok(())
        }

        async fn delete(&self, user: UserId, key: FavoriteKey) -> Result<(), StoreError> {
            self.check()?;
            self.rows.lock().unwrap().remove(&(user, key));
            Ok(())
        }
    }

    fn user() -> UserId {
        UserId(Uuid::new_v4())
    }

    fn book(n: u128) -> FavoriteKey {
        FavoriteKey::new(ItemKind::Book, Uuid::from_u128(n))
    }

    #[tokio::test]
    async fn double_toggle_round_trips() {
        let store = MemoryStore::default();
        let mut svc = FavoritesService::for_user(&store, user());
        let key = book(1);

        assert!(svc.toggle(key).await);
        assert!(svc.contains(&key));
        assert!(!svc.toggle(key).await);
        assert!(!svc.contains(&key));
        assert!(svc.is_empty());
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_all_mirrors_remote_rows() {
        let store = MemoryStore::default();
        let me = user();
        let someone_else = user();
        {
            let mut rows = store.rows.lock().unwrap();
            rows.insert((me, book(1)));
            rows.insert((me, FavoriteKey::new(ItemKind::Game, Uuid::from_u128(2))));
            rows.insert((someone_else, book(3)));
        }

        let mut svc = FavoritesService::for_user(&store, me);
        svc.fetch_all().await;

        assert_eq!(svc.len(), 2);
        assert!(svc.contains(&book(1)));
        assert!(!svc.contains(&book(3)));
    }

    #[tokio::test]
    async fn switching_users_clears_previous_set() {
        let store = MemoryStore::default();
        let alice = user();
        let bob = user();
        store.rows.lock().unwrap().insert((alice, book(1)));
        store.rows.lock().unwrap().insert((bob, book(2)));

        let mut svc = FavoritesService::for_user(&store, alice);
        svc.fetch_all().await;
        assert!(svc.contains(&book(1)));

        svc.set_user(Some(bob)).await;
        assert!(!svc.contains(&book(1)));
        assert!(svc.contains(&book(2)));

        svc.set_user(None).await;
        assert!(svc.is_empty());
    }

    #[tokio::test]
    async fn unauthenticated_mutations_are_noops() {
        let store = MemoryStore::default();
        let mut svc = FavoritesService::new(&store);

        assert!(!svc.toggle(book(1)).await);
        svc.remove(book(1)).await;
        svc.fetch_all().await;

        assert!(svc.is_empty());
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_errors_leave_local_state_unchanged() {
        let store = MemoryStore::default();
        let mut svc = FavoritesService::for_user(&store, user());
        let key = book(1);

        assert!(svc.toggle(key).await);

        store.fail.store(true, Ordering::Relaxed);
        // Delete fails: membership sticks
        assert!(svc.toggle(key).await);
        assert!(svc.contains(&key));

        // Fetch fails: prior state retained
        svc.fetch_all().await;
        assert!(svc.contains(&key));

        // Insert fails for a new key: nothing added
        assert!(!svc.toggle(book(2)).await);
        assert!(!svc.contains(&book(2)));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = MemoryStore::default();
        let mut svc = FavoritesService::for_user(&store, user());
        let key = book(1);

        svc.toggle(key).await;
        svc.remove(key).await;
        assert!(!svc.contains(&key));

        // Absent already; still fine
        svc.remove(key).await;
        assert!(svc.is_empty());
    }

    #[tokio::test]
    async fn reconcile_repairs_divergence() {
        let store = MemoryStore::default();
        let me = user();
        let mut svc = FavoritesService::for_user(&store, me);

        svc.toggle(book(1)).await;

        // Remote row vanishes behind our back
        store.rows.lock().unwrap().clear();
        assert!(svc.contains(&book(1)));

        svc.reconcile().await;
        assert!(!svc.contains(&book(1)));
    }
}
