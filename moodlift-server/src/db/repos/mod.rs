//! Repository implementations for database access.
//!
//! One repository per table, borrowing the shared pool. List queries use
//! `COUNT(*) OVER()` for totals so paging never needs a second round trip,
//! and inserts that must be idempotent use `ON CONFLICT`.

pub mod books;
pub mod consultants;
pub mod faqs;
pub mod favorites;
pub mod games;
pub mod seo;
pub mod sessions;
pub mod testimonials;

pub use books::{Book, BookDraft, BookPatch, BookRepo};
pub use consultants::{Consultant, ConsultantDraft, ConsultantPatch, ConsultantRepo};
pub use faqs::{Faq, FaqRepo};
pub use favorites::PgFavoriteStore;
pub use games::{Game, GameRepo};
pub use seo::{SeoEntry, SeoRepo, SeoUpsert};
pub use sessions::SessionRepo;
pub use testimonials::{Testimonial, TestimonialDraft, TestimonialPatch, TestimonialRepo};

/// Database error type shared by all repositories
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
