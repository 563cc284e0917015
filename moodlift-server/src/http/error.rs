//! API error types with IntoResponse.
//!
//! Write paths return explicit `{"error": "..."}` bodies with 400/404/500;
//! database details are logged, never leaked. Admin handlers run under an
//! explicit deadline and surface overruns as 504.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// Deadline applied to every admin handler
pub const ADMIN_TIMEOUT: Duration = Duration::from_secs(10);

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Storage I/O error (500, logged)
    Storage(std::io::Error),

    /// Handler exceeded its deadline (504)
    Timeout { seconds: u64 },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                format!("{} '{}' not found", resource, id),
            ),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
            Self::Timeout { seconds } => (
                StatusCode::GATEWAY_TIMEOUT,
                format!("operation timed out after {} seconds", seconds),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e)
    }
}

/// Run an admin operation under [`ADMIN_TIMEOUT`].
///
/// The original implementation raced each handler against a timer; here the
/// deadline is explicit and maps to a 504.
pub async fn with_admin_timeout<T, F>(fut: F) -> Result<T, ApiError>
where
    F: std::future::Future<Output = Result<T, ApiError>>,
{
    match tokio::time::timeout(ADMIN_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::Timeout {
            seconds: ADMIN_TIMEOUT.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "title" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "title cannot be empty");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::NotFound {
            resource: "book",
            id: "42".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn database_error_is_opaque_500() {
        let err = ApiError::Database(DbError::Sqlx(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "an internal error occurred");
    }

    #[tokio::test]
    async fn timeout_maps_to_504() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        };

        tokio::time::pause();
        let handle = tokio::spawn(with_admin_timeout(slow));
        tokio::time::advance(ADMIN_TIMEOUT + Duration::from_secs(1)).await;

        let result = handle.await.unwrap();
        assert!(matches!(result, Err(ApiError::Timeout { seconds: 10 })));
    }
}
