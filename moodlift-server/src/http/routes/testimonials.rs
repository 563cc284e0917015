//! Testimonial endpoints: public listing plus admin CRUD

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::{Testimonial, TestimonialDraft, TestimonialPatch, TestimonialRepo};
use crate::http::error::{with_admin_timeout, ApiError};
use crate::http::responses::SoftList;
use crate::http::server::AppState;
use crate::models::{require_text, ListPage, ListQuery, ValidationError};

const MAX_NAME_LEN: usize = 128;
const MAX_QUOTE_LEN: usize = 2000;
const MIN_RATING: i64 = 1;
const MAX_RATING: i64 = 5;

/// Create request body
#[derive(Deserialize)]
pub struct CreateTestimonialRequest {
    pub author_name: String,
    pub quote: String,
    #[serde(default = "default_rating")]
    pub rating: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_rating() -> i32 {
    5
}

fn default_active() -> bool {
    true
}

/// Partial update request body
#[derive(Deserialize, Default)]
pub struct UpdateTestimonialRequest {
    pub author_name: Option<String>,
    pub quote: Option<String>,
    pub rating: Option<i32>,
    pub active: Option<bool>,
}

/// Testimonial response
#[derive(Serialize)]
pub struct TestimonialResponse {
    pub id: Uuid,
    pub author_name: String,
    pub quote: String,
    pub rating: i32,
    pub active: bool,
    pub created_at: String,
}

impl From<Testimonial> for TestimonialResponse {
    fn from(t: Testimonial) -> Self {
        Self {
            id: t.id,
            author_name: t.author_name,
            quote: t.quote,
            rating: t.rating,
            active: t.active,
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

fn validate_rating(rating: i32) -> Result<i32, ValidationError> {
    if (MIN_RATING..=MAX_RATING).contains(&(rating as i64)) {
        Ok(rating)
    } else {
        Err(ValidationError::OutOfRange {
            field: "rating",
            min: MIN_RATING,
            max: MAX_RATING,
        })
    }
}

/// GET /api/testimonials - active testimonials, soft failure
async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SoftList<TestimonialResponse>>, ApiError> {
    let result = TestimonialRepo::new(&state.pool).list_active().await;
    Ok(Json(
        SoftList::from_result("testimonials", result).map(TestimonialResponse::from),
    ))
}

/// GET /admin/testimonials - paged admin listing
async fn admin_list_testimonials(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListPage<TestimonialResponse>>, ApiError> {
    with_admin_timeout(async {
        let page = TestimonialRepo::new(&state.pool).list(query).await?;
        Ok(Json(page.map(TestimonialResponse::from)))
    })
    .await
}

/// POST /admin/testimonials
async fn create_testimonial(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTestimonialRequest>,
) -> Result<(StatusCode, Json<TestimonialResponse>), ApiError> {
    with_admin_timeout(async {
        let author_name = require_text("author_name", &req.author_name, MAX_NAME_LEN)?;
        let quote = require_text("quote", &req.quote, MAX_QUOTE_LEN)?;
        let rating = validate_rating(req.rating)?;

        let row = TestimonialRepo::new(&state.pool)
            .create(TestimonialDraft {
                author_name,
                quote,
                rating,
                active: req.active,
            })
            .await?;

        Ok((StatusCode::CREATED, Json(TestimonialResponse::from(row))))
    })
    .await
}

/// PUT /admin/testimonials/{id}
async fn update_testimonial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTestimonialRequest>,
) -> Result<Json<TestimonialResponse>, ApiError> {
    with_admin_timeout(async {
        let author_name = req
            .author_name
            .map(|v| require_text("author_name", &v, MAX_NAME_LEN))
            .transpose()?;
        let quote = req
            .quote
            .map(|v| require_text("quote", &v, MAX_QUOTE_LEN))
            .transpose()?;
        let rating = req.rating.map(validate_rating).transpose()?;

        let row = TestimonialRepo::new(&state.pool)
            .update(
                id,
                TestimonialPatch {
                    author_name,
                    quote,
                    rating,
                    active: req.active,
                },
            )
            .await?;

        Ok(Json(TestimonialResponse::from(row)))
    })
    .await
}

/// DELETE /admin/testimonials/{id}
async fn delete_testimonial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    with_admin_timeout(async {
        TestimonialRepo::new(&state.pool).delete(id).await?;
        Ok(StatusCode::NO_CONTENT)
    })
    .await
}

/// Testimonial routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/testimonials", get(list_testimonials))
        .route(
            "/admin/testimonials",
            get(admin_list_testimonials).post(create_testimonial),
        )
        .route(
            "/admin/testimonials/{id}",
            put(update_testimonial).delete(delete_testimonial),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }
}
