//! Game endpoints (public, read-only)

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::{Game, GameRepo};
use crate::http::error::ApiError;
use crate::http::responses::SoftList;
use crate::http::routes::books::parse_mood;
use crate::http::server::AppState;

/// Query params for the public listing
#[derive(Deserialize, Default)]
pub struct GameListParams {
    pub mood: Option<String>,
}

/// Game response
#[derive(Serialize)]
pub struct GameResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub play_url: Option<String>,
    pub mood_tags: Vec<String>,
}

impl From<Game> for GameResponse {
    fn from(g: Game) -> Self {
        Self {
            id: g.id,
            title: g.title,
            description: g.description,
            play_url: g.play_url,
            mood_tags: g.mood_tags,
        }
    }
}

/// GET /api/games?mood= - public listing, soft failure
async fn list_games(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GameListParams>,
) -> Result<Json<SoftList<GameResponse>>, ApiError> {
    let mood = parse_mood(params.mood.as_deref())?;
    let result = GameRepo::new(&state.pool).list_public(mood).await;

    Ok(Json(
        SoftList::from_result("games", result).map(GameResponse::from),
    ))
}

/// Game routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/games", get(list_games))
}
