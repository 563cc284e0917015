//! Asset bucket endpoints (admin).
//!
//! Uploads arrive as base64 payloads and land in the filesystem bucket.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::http::error::{with_admin_timeout, ApiError};
use crate::http::server::AppState;
use crate::models::{AssetName, ValidationError};
use crate::storage::AssetInfo;

/// 8 MiB cap on decoded upload size
const MAX_ASSET_BYTES: usize = 8 * 1024 * 1024;

/// Upload request body
#[derive(Deserialize)]
pub struct UploadAssetRequest {
    pub name: String,
    /// Base64-encoded file content
    pub content: String,
}

/// Upload response
#[derive(Serialize)]
pub struct AssetResponse {
    pub name: String,
    pub size: u64,
}

impl From<AssetInfo> for AssetResponse {
    fn from(a: AssetInfo) -> Self {
        Self {
            name: a.name,
            size: a.size,
        }
    }
}

/// POST /admin/assets - upload an object into the bucket
async fn upload_asset(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UploadAssetRequest>,
) -> Result<(StatusCode, Json<AssetResponse>), ApiError> {
    with_admin_timeout(async {
        let name = AssetName::new(&req.name)?;

        let bytes = BASE64.decode(req.content.as_bytes()).map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "content",
                reason: "must be valid base64",
            })
        })?;

        if bytes.is_empty() {
            return Err(ApiError::Validation(ValidationError::Empty {
                field: "content",
            }));
        }
        if bytes.len() > MAX_ASSET_BYTES {
            return Err(ApiError::Validation(ValidationError::TooLarge {
                field: "content",
                max_bytes: MAX_ASSET_BYTES,
            }));
        }

        let info = state.assets.put(&name, &bytes).await?;
        Ok((StatusCode::CREATED, Json(AssetResponse::from(info))))
    })
    .await
}

/// GET /admin/assets - list bucket contents
async fn list_assets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AssetResponse>>, ApiError> {
    with_admin_timeout(async {
        let infos = state.assets.list().await?;
        Ok(Json(infos.into_iter().map(AssetResponse::from).collect()))
    })
    .await
}

/// DELETE /admin/assets/{name}
async fn delete_asset(
    State(state): State<Arc<AppState>>,
    Path(raw_name): Path<String>,
) -> Result<StatusCode, ApiError> {
    with_admin_timeout(async {
        let name = AssetName::new(&raw_name)?;

        if state.assets.delete(&name).await? {
            Ok(StatusCode::NO_CONTENT)
        } else {
            Err(ApiError::NotFound {
                resource: "asset",
                id: raw_name.clone(),
            })
        }
    })
    .await
}

/// Asset routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/assets", get(list_assets).post(upload_asset))
        .route(
            "/admin/assets/{name}",
            axum::routing::delete(delete_asset),
        )
}
