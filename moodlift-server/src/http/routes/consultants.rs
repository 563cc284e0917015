//! Consultant endpoints.
//!
//! The public listing returns a plain array and degrades to empty on any
//! failure, matching the FAQ route; admin CRUD gets explicit errors.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::{Consultant, ConsultantDraft, ConsultantPatch, ConsultantRepo};
use crate::http::error::{with_admin_timeout, ApiError};
use crate::http::server::AppState;
use crate::models::{require_text, ListPage, ListQuery};

const MAX_NAME_LEN: usize = 128;
const MAX_TITLE_LEN: usize = 128;
const MAX_URL_LEN: usize = 512;

/// Create request body
#[derive(Deserialize)]
pub struct CreateConsultantRequest {
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update request body
#[derive(Deserialize, Default)]
pub struct UpdateConsultantRequest {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Consultant response
#[derive(Serialize)]
pub struct ConsultantResponse {
    pub id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: bool,
}

impl From<Consultant> for ConsultantResponse {
    fn from(c: Consultant) -> Self {
        Self {
            id: c.id,
            name: c.name,
            title: c.title,
            bio: c.bio,
            photo_url: c.photo_url,
            is_active: c.is_active,
        }
    }
}

/// GET /api/consultants - active consultants; empty array rather than failing
async fn list_consultants(State(state): State<Arc<AppState>>) -> Json<Vec<ConsultantResponse>> {
    match ConsultantRepo::new(&state.pool).list_active().await {
        Ok(rows) => Json(rows.into_iter().map(ConsultantResponse::from).collect()),
        Err(err) => {
            tracing::error!("consultants listing failed: {}", err);
            Json(Vec::new())
        }
    }
}

/// GET /admin/consultants - paged admin listing
async fn admin_list_consultants(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListPage<ConsultantResponse>>, ApiError> {
    with_admin_timeout(async {
        let page = ConsultantRepo::new(&state.pool).list(query).await?;
        Ok(Json(page.map(ConsultantResponse::from)))
    })
    .await
}

/// POST /admin/consultants
async fn create_consultant(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateConsultantRequest>,
) -> Result<(StatusCode, Json<ConsultantResponse>), ApiError> {
    with_admin_timeout(async {
        let name = require_text("name", &req.name, MAX_NAME_LEN)?;
        let title = req
            .title
            .map(|v| require_text("title", &v, MAX_TITLE_LEN))
            .transpose()?;
        let photo_url = req
            .photo_url
            .map(|v| require_text("photo_url", &v, MAX_URL_LEN))
            .transpose()?;

        let row = ConsultantRepo::new(&state.pool)
            .create(ConsultantDraft {
                name,
                title,
                bio: req.bio,
                photo_url,
                is_active: req.is_active,
            })
            .await?;

        Ok((StatusCode::CREATED, Json(ConsultantResponse::from(row))))
    })
    .await
}

/// PUT /admin/consultants/{id}
async fn update_consultant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateConsultantRequest>,
) -> Result<Json<ConsultantResponse>, ApiError> {
    with_admin_timeout(async {
        let name = req
            .name
            .map(|v| require_text("name", &v, MAX_NAME_LEN))
            .transpose()?;
        let title = req
            .title
            .map(|v| require_text("title", &v, MAX_TITLE_LEN))
            .transpose()?;
        let photo_url = req
            .photo_url
            .map(|v| require_text("photo_url", &v, MAX_URL_LEN))
            .transpose()?;

        let row = ConsultantRepo::new(&state.pool)
            .update(
                id,
                ConsultantPatch {
                    name,
                    title,
                    bio: req.bio,
                    photo_url,
                    is_active: req.is_active,
                },
            )
            .await?;

        Ok(Json(ConsultantResponse::from(row)))
    })
    .await
}

/// DELETE /admin/consultants/{id}
async fn delete_consultant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    with_admin_timeout(async {
        ConsultantRepo::new(&state.pool).delete(id).await?;
        Ok(StatusCode::NO_CONTENT)
    })
    .await
}

/// Consultant routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/consultants", get(list_consultants))
        .route(
            "/admin/consultants",
            get(admin_list_consultants).post(create_consultant),
        )
        .route(
            "/admin/consultants/{id}",
            put(update_consultant).delete(delete_consultant),
        )
}
