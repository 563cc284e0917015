//! Asset name validation for the storage bucket.
//!
//! Names become filenames under the bucket root, so path separators and
//! traversal sequences are rejected outright.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for asset names
const MAX_ASSET_NAME_LEN: usize = 128;

/// Filename pattern: starts alphanumeric, then word chars, dots, hyphens
static ASSET_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("invalid asset name regex"));

/// Validated name of an object in the asset bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetName(String);

impl AssetName {
    /// Create an asset name, validating it is a safe bare filename.
    ///
    /// # Rules
    /// - Max 128 characters
    /// - Alphanumeric plus `.`, `-`, `_`; must start alphanumeric
    /// - No path separators, no `..` sequences
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "asset name" });
        }

        if s.len() > MAX_ASSET_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "asset name",
                max: MAX_ASSET_NAME_LEN,
            });
        }

        if !ASSET_NAME_RE.is_match(s) || s.contains("..") {
            return Err(ValidationError::InvalidFormat {
                field: "asset name",
                reason: "must be a bare filename without path separators",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_filenames() {
        assert!(AssetName::new("hero.png").is_ok());
        assert!(AssetName::new("book-cover_2.webp").is_ok());
    }

    #[test]
    fn rejects_traversal_and_separators() {
        assert!(AssetName::new("../etc/passwd").is_err());
        assert!(AssetName::new("a/../b").is_err());
        assert!(AssetName::new("dir/file.png").is_err());
        assert!(AssetName::new("a..b").is_err());
        assert!(AssetName::new(".hidden").is_err());
        assert!(AssetName::new("").is_err());
    }
}
