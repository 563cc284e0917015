//! Custom Axum extractors.
//!
//! Session resolution follows the favorites store's failure policy: a broken
//! lookup logs and reads as "not signed in" rather than failing the request.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use moodlift_core::Session;

use super::server::AppState;
use crate::db::repos::SessionRepo;

/// The request's session, if a valid bearer token was presented.
///
/// Never rejects: endpoints that are no-ops for anonymous users branch on
/// the inner Option.
pub struct MaybeSession(pub Option<Session>);

impl FromRequestParts<Arc<AppState>> for MaybeSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(Self(None));
        };

        match SessionRepo::new(&state.pool).find_valid(&token).await {
            Ok(session) => Ok(Self(session)),
            Err(err) => {
                tracing::warn!("session lookup failed: {}", err);
                Ok(Self(None))
            }
        }
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
fn bearer_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/favorites");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn extracts_bearer_token() {
        let parts = parts_with_auth(Some("Bearer abc123"));
        assert_eq!(bearer_token(&parts).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_or_malformed_header_is_none() {
        assert_eq!(bearer_token(&parts_with_auth(None)), None);
        assert_eq!(bearer_token(&parts_with_auth(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts_with_auth(Some("Bearer "))), None);
    }
}
