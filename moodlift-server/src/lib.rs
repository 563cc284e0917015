//! moodlift-server: HTTP layer for the MoodLift service.
//!
//! Public read APIs for mood-filtered content, session-scoped favorites
//! endpoints, admin CRUD over the content tables, and a filesystem-backed
//! asset bucket. Database access goes through sqlx repositories; the
//! favorites store implements the trait from moodlift-core.

pub mod db;
pub mod http;
pub mod models;
pub mod storage;
