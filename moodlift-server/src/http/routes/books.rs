//! Book endpoints: public mood-filtered listing plus admin CRUD

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use moodlift_core::MoodResult;

use crate::db::repos::{Book, BookDraft, BookPatch, BookRepo};
use crate::http::error::{with_admin_timeout, ApiError};
use crate::http::responses::SoftList;
use crate::http::server::AppState;
use crate::models::{require_text, ListPage, ListQuery, ValidationError};

const MAX_TITLE_LEN: usize = 256;
const MAX_AUTHOR_LEN: usize = 128;
const MAX_URL_LEN: usize = 512;

/// Query params for the public listing
#[derive(Deserialize, Default)]
pub struct BookListParams {
    pub mood: Option<String>,
}

/// Create/replace request body
#[derive(Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    #[serde(default)]
    pub mood_tags: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update request body
#[derive(Deserialize, Default)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub mood_tags: Option<Vec<String>>,
    pub active: Option<bool>,
}

/// Book response
#[derive(Serialize)]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub mood_tags: Vec<String>,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Book> for BookResponse {
    fn from(b: Book) -> Self {
        Self {
            id: b.id,
            title: b.title,
            author: b.author,
            description: b.description,
            cover_url: b.cover_url,
            mood_tags: b.mood_tags,
            active: b.active,
            created_at: b.created_at.to_rfc3339(),
            updated_at: b.updated_at.to_rfc3339(),
        }
    }
}

/// Parse an optional mood slug from query params
pub(crate) fn parse_mood(raw: Option<&str>) -> Result<Option<MoodResult>, ApiError> {
    match raw {
        None => Ok(None),
        Some(s) => MoodResult::from_str(s)
            .map(Some)
            .map_err(|_| {
                ApiError::Validation(ValidationError::InvalidVariant {
                    field: "mood",
                    value: s.to_owned(),
                })
            }),
    }
}

/// Every tag must be a known mood slug
fn validate_mood_tags(tags: &[String]) -> Result<(), ValidationError> {
    for tag in tags {
        if MoodResult::from_str(tag).is_err() {
            return Err(ValidationError::InvalidVariant {
                field: "mood tag",
                value: tag.clone(),
            });
        }
    }
    Ok(())
}

fn optional_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    value.map(|v| require_text(field, &v, max)).transpose()
}

/// GET /api/books?mood= - public listing, soft failure
async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BookListParams>,
) -> Result<Json<SoftList<BookResponse>>, ApiError> {
    let mood = parse_mood(params.mood.as_deref())?;
    let result = BookRepo::new(&state.pool).list_public(mood).await;

    Ok(Json(
        SoftList::from_result("books", result).map(BookResponse::from),
    ))
}

/// GET /admin/books - paged admin listing
async fn admin_list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListPage<BookResponse>>, ApiError> {
    with_admin_timeout(async {
        let page = BookRepo::new(&state.pool).list(query).await?;
        Ok(Json(page.map(BookResponse::from)))
    })
    .await
}

/// POST /admin/books - create a book
async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    with_admin_timeout(async {
        let title = require_text("title", &req.title, MAX_TITLE_LEN)?;
        let author = optional_text("author", req.author, MAX_AUTHOR_LEN)?;
        let cover_url = optional_text("cover_url", req.cover_url, MAX_URL_LEN)?;
        validate_mood_tags(&req.mood_tags)?;

        let book = BookRepo::new(&state.pool)
            .create(BookDraft {
                title,
                author,
                description: req.description,
                cover_url,
                mood_tags: req.mood_tags,
                active: req.active,
            })
            .await?;

        Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
    })
    .await
}

/// PUT /admin/books/{id} - partial update
async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    with_admin_timeout(async {
        let title = optional_text("title", req.title, MAX_TITLE_LEN)?;
        let author = optional_text("author", req.author, MAX_AUTHOR_LEN)?;
        let cover_url = optional_text("cover_url", req.cover_url, MAX_URL_LEN)?;
        if let Some(tags) = &req.mood_tags {
            validate_mood_tags(tags)?;
        }

        let book = BookRepo::new(&state.pool)
            .update(
                id,
                BookPatch {
                    title,
                    author,
                    description: req.description,
                    cover_url,
                    mood_tags: req.mood_tags,
                    active: req.active,
                },
            )
            .await?;

        Ok(Json(BookResponse::from(book)))
    })
    .await
}

/// DELETE /admin/books/{id}
async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    with_admin_timeout(async {
        BookRepo::new(&state.pool).delete(id).await?;
        Ok(StatusCode::NO_CONTENT)
    })
    .await
}

/// Book routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/books", get(list_books))
        .route("/admin/books", get(admin_list_books).post(create_book))
        .route("/admin/books/{id}", put(update_book).delete(delete_book))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mood_accepts_known_slugs() {
        assert_eq!(parse_mood(None).unwrap(), None);
        assert_eq!(
            parse_mood(Some("needs-support")).unwrap(),
            Some(MoodResult::NeedsSupport)
        );
    }

    #[test]
    fn parse_mood_rejects_unknown() {
        assert!(matches!(
            parse_mood(Some("ecstatic")),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn mood_tags_must_be_known() {
        assert!(validate_mood_tags(&["good".into(), "great".into()]).is_ok());
        assert!(validate_mood_tags(&["good".into(), "meh".into()]).is_err());
    }
}
