//! Favorites endpoints.
//!
//! Each request builds a session-scoped [`FavoritesService`] over the
//! Postgres store and primes it from the remote table, so handlers see the
//! same cache-plus-sync semantics the core service defines. Anonymous
//! requests are no-ops that answer with the signed-out shape.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use moodlift_core::{FavoriteKey, FavoritesService, ItemKind, Session};

use crate::db::repos::PgFavoriteStore;
use crate::http::error::ApiError;
use crate::http::extractors::MaybeSession;
use crate::http::server::AppState;
use crate::models::ValidationError;

/// Toggle request body
#[derive(Deserialize)]
pub struct ToggleRequest {
    pub item_type: String,
    pub item_id: Uuid,
}

/// One favorite in responses
#[derive(Serialize)]
pub struct FavoriteEntry {
    pub item_type: &'static str,
    pub item_id: Uuid,
}

impl From<&FavoriteKey> for FavoriteEntry {
    fn from(key: &FavoriteKey) -> Self {
        Self {
            item_type: key.kind.as_str(),
            item_id: key.item_id,
        }
    }
}

/// GET /api/favorites response
#[derive(Serialize)]
pub struct FavoritesResponse {
    pub authenticated: bool,
    pub favorites: Vec<FavoriteEntry>,
}

/// Toggle response
#[derive(Serialize)]
pub struct ToggleResponse {
    pub authenticated: bool,
    pub favorited: bool,
}

fn parse_kind(raw: &str) -> Result<ItemKind, ApiError> {
    ItemKind::from_str(raw).map_err(|_| {
        ApiError::Validation(ValidationError::InvalidVariant {
            field: "item_type",
            value: raw.to_owned(),
        })
    })
}

/// Build a primed service for the session's user
async fn service_for(
    state: &AppState,
    session: &Session,
) -> FavoritesService<PgFavoriteStore> {
    let store = PgFavoriteStore::new(state.pool.clone());
    let mut svc = FavoritesService::for_user(store, session.user_id);
    svc.fetch_all().await;
    svc
}

/// GET /api/favorites - the current user's favorite keys
async fn list_favorites(
    State(state): State<Arc<AppState>>,
    MaybeSession(session): MaybeSession,
) -> Json<FavoritesResponse> {
    let Some(session) = session else {
        return Json(FavoritesResponse {
            authenticated: false,
            favorites: Vec::new(),
        });
    };

    let svc = service_for(&state, &session).await;
    Json(FavoritesResponse {
        authenticated: true,
        favorites: svc.favorites().map(FavoriteEntry::from).collect(),
    })
}

/// POST /api/favorites/toggle - flip membership of one item
async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    MaybeSession(session): MaybeSession,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let kind = parse_kind(&req.item_type)?;

    let Some(session) = session else {
        // Unauthenticated toggles are silent no-ops
        return Ok(Json(ToggleResponse {
            authenticated: false,
            favorited: false,
        }));
    };

    let mut svc = service_for(&state, &session).await;
    let favorited = svc.toggle(FavoriteKey::new(kind, req.item_id)).await;

    Ok(Json(ToggleResponse {
        authenticated: true,
        favorited,
    }))
}

/// DELETE /api/favorites/{item_type}/{item_id} - unconditional removal
async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    MaybeSession(session): MaybeSession,
    Path((item_type, item_id)): Path<(String, Uuid)>,
) -> Result<axum::http::StatusCode, ApiError> {
    let kind = parse_kind(&item_type)?;

    if let Some(session) = session {
        let mut svc = service_for(&state, &session).await;
        svc.remove(FavoriteKey::new(kind, item_id)).await;
    }

    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Favorites routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/favorites", get(list_favorites))
        .route("/api/favorites/toggle", post(toggle_favorite))
        .route(
            "/api/favorites/{item_type}/{item_id}",
            delete(remove_favorite),
        )
}
