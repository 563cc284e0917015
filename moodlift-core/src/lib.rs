//! moodlift-core: domain logic for the MoodLift service
//!
//! Everything here is independent of HTTP and the database:
//! - Mood results and assessment scoring ([`mood`])
//! - The guided-breathing countdown state machine ([`breathing`])
//! - The favorites synchronization service ([`favorites`]), generic over a
//!   remote store trait so the Postgres implementation lives in the server
//!   crate and tests can use an in-memory double
//! - Session/user types read from the external auth collaborator ([`session`])
//! - Configuration loading ([`config`]) and structured errors ([`error`])

pub mod breathing;
pub mod config;
pub mod error;
pub mod favorites;
pub mod mood;
pub mod session;

pub use error::{CoreError, Result};
pub use favorites::{FavoriteKey, FavoriteStore, FavoritesService, ItemKind, StoreError};
pub use mood::MoodResult;
pub use session::{Session, UserId};
