//! SEO metadata endpoints.
//!
//! Pages ask for their metadata at render time, so the public read is soft:
//! missing or failing lookups answer 200 with `metadata: null`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::{SeoEntry, SeoRepo, SeoUpsert};
use crate::http::error::{with_admin_timeout, ApiError};
use crate::http::server::AppState;
use crate::models::{require_text, PagePath};

const MAX_TITLE_LEN: usize = 256;
const MAX_DESCRIPTION_LEN: usize = 512;

/// Query params for the public lookup
#[derive(Deserialize)]
pub struct SeoLookupParams {
    pub path: String,
}

/// Upsert request body
#[derive(Deserialize)]
pub struct UpsertSeoRequest {
    pub page_path: String,
    pub title: String,
    pub description: Option<String>,
    pub og_image: Option<String>,
}

/// SEO metadata response
#[derive(Serialize)]
pub struct SeoResponse {
    pub id: Uuid,
    pub page_path: String,
    pub title: String,
    pub description: Option<String>,
    pub og_image: Option<String>,
    pub updated_at: String,
}

impl From<SeoEntry> for SeoResponse {
    fn from(e: SeoEntry) -> Self {
        Self {
            id: e.id,
            page_path: e.page_path,
            title: e.title,
            description: e.description,
            og_image: e.og_image,
            updated_at: e.updated_at.to_rfc3339(),
        }
    }
}

/// Nullable wrapper for the public lookup
#[derive(Serialize)]
pub struct SeoLookupResponse {
    pub metadata: Option<SeoResponse>,
}

/// GET /api/seo?path=/about - metadata for one page, soft failure
async fn lookup_seo(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeoLookupParams>,
) -> Result<Json<SeoLookupResponse>, ApiError> {
    let path = PagePath::new(&params.path)?;

    let metadata = match SeoRepo::new(&state.pool).get_by_path(&path).await {
        Ok(entry) => entry.map(SeoResponse::from),
        Err(err) => {
            tracing::error!("seo lookup failed for {}: {}", path, err);
            None
        }
    };

    Ok(Json(SeoLookupResponse { metadata }))
}

/// GET /admin/seo - all configured pages
async fn admin_list_seo(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SeoResponse>>, ApiError> {
    with_admin_timeout(async {
        let rows = SeoRepo::new(&state.pool).list().await?;
        Ok(Json(rows.into_iter().map(SeoResponse::from).collect()))
    })
    .await
}

/// PUT /admin/seo - insert or replace a page's metadata
async fn upsert_seo(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpsertSeoRequest>,
) -> Result<Json<SeoResponse>, ApiError> {
    with_admin_timeout(async {
        let page_path = PagePath::new(&req.page_path)?;
        let title = require_text("title", &req.title, MAX_TITLE_LEN)?;
        let description = req
            .description
            .map(|v| require_text("description", &v, MAX_DESCRIPTION_LEN))
            .transpose()?;

        let row = SeoRepo::new(&state.pool)
            .upsert(SeoUpsert {
                page_path,
                title,
                description,
                og_image: req.og_image,
            })
            .await?;

        Ok(Json(SeoResponse::from(row)))
    })
    .await
}

/// DELETE /admin/seo/{id}
async fn delete_seo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    with_admin_timeout(async {
        SeoRepo::new(&state.pool).delete(id).await?;
        Ok(StatusCode::NO_CONTENT)
    })
    .await
}

/// SEO routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/seo", get(lookup_seo))
        .route("/admin/seo", get(admin_list_seo).put(upsert_seo))
        .route("/admin/seo/{id}", delete(delete_seo))
}
