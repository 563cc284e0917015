//! Soft-failure response shapes for the public read paths.
//!
//! Content lists back page rendering, so a broken query must not break the
//! page: the endpoint answers 200 with empty items and an `error` field, and
//! the real cause goes to the server log.

use serde::Serialize;

/// A list that degrades to empty-plus-error instead of failing the request
#[derive(Debug, Serialize)]
pub struct SoftList<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> SoftList<T> {
    pub fn ok(items: Vec<T>) -> Self {
        Self { items, error: None }
    }

    /// Log the failure and produce the degraded shape
    pub fn degraded(context: &'static str, err: impl std::fmt::Display) -> Self {
        tracing::error!("{} failed: {}", context, err);
        Self {
            items: Vec::new(),
            error: Some(format!("failed to load {}", context)),
        }
    }

    /// Map the item type, keeping the error field
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SoftList<U> {
        SoftList {
            items: self.items.into_iter().map(f).collect(),
            error: self.error,
        }
    }

    /// Collapse a repo result into the soft shape
    pub fn from_result<E: std::fmt::Display>(
        context: &'static str,
        result: Result<Vec<T>, E>,
    ) -> Self {
        match result {
            Ok(items) => Self::ok(items),
            Err(err) => Self::degraded(context, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_list_has_no_error_field() {
        let list = SoftList::ok(vec![1, 2]);
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["items"], serde_json::json!([1, 2]));
        assert!(json.get("error").is_none());
    }

    #[test]
    fn degraded_list_is_empty_with_message() {
        let list: SoftList<i32> = SoftList::from_result("books", Err("boom"));
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["items"], serde_json::json!([]));
        assert_eq!(json["error"], "failed to load books");
    }
}
