//! Page path validation for SEO metadata entries

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for page paths
const MAX_PAGE_PATH_LEN: usize = 256;

/// Absolute path of lowercase segments: `/`, `/about`, `/books/self-help`
static PAGE_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/(?:[a-z0-9_-]+(?:/[a-z0-9_-]+)*)?$").expect("invalid path regex"));

/// Validated page path for `seo_metadata` rows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PagePath(String);

impl PagePath {
    /// Create a page path, validating format.
    ///
    /// # Rules
    /// - Must start with `/`
    /// - Lowercase alphanumeric segments with hyphens/underscores
    /// - No trailing slash (except the root path itself)
    /// - Max 256 characters
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "page path" });
        }

        if s.len() > MAX_PAGE_PATH_LEN {
            return Err(ValidationError::TooLong {
                field: "page path",
                max: MAX_PAGE_PATH_LEN,
            });
        }

        if !PAGE_PATH_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "page path",
                reason: "must be an absolute path of lowercase segments, like /books/self-help",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PagePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_paths() {
        assert!(PagePath::new("/").is_ok());
        assert!(PagePath::new("/about").is_ok());
        assert!(PagePath::new("/books/self-help").is_ok());
        assert!(PagePath::new("/mood_check").is_ok());
    }

    #[test]
    fn rejects_invalid_paths() {
        assert!(PagePath::new("").is_err());
        assert!(PagePath::new("about").is_err()); // relative
        assert!(PagePath::new("/About").is_err()); // uppercase
        assert!(PagePath::new("/about/").is_err()); // trailing slash
        assert!(PagePath::new("/a b").is_err()); // space
    }

    #[test]
    fn rejects_oversize() {
        let long = format!("/{}", "a".repeat(300));
        assert!(matches!(
            PagePath::new(&long),
            Err(ValidationError::TooLong { .. })
        ));
    }
}
