//! FAQ endpoint (public, read-only).
//!
//! Returns an empty array rather than failing so the marketing page always
//! renders.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use uuid::Uuid;

use crate::db::repos::{Faq, FaqRepo};
use crate::http::server::AppState;

/// FAQ response
#[derive(Serialize)]
pub struct FaqResponse {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub position: i32,
}

impl From<Faq> for FaqResponse {
    fn from(f: Faq) -> Self {
        Self {
            id: f.id,
            question: f.question,
            answer: f.answer,
            position: f.position,
        }
    }
}

/// GET /api/faqs - active FAQs in display order
async fn list_faqs(State(state): State<Arc<AppState>>) -> Json<Vec<FaqResponse>> {
    match FaqRepo::new(&state.pool).list_active().await {
        Ok(rows) => Json(rows.into_iter().map(FaqResponse::from).collect()),
        Err(err) => {
            tracing::error!("faq listing failed: {}", err);
            Json(Vec::new())
        }
    }
}

/// FAQ routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/faqs", get(list_faqs))
}
