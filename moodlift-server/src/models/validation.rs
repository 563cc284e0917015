//! Validation error types for request-side domain models

use std::fmt;

/// Validation error for admin and public request payloads
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Binary payload exceeds its size cap
    TooLarge {
        field: &'static str,
        max_bytes: usize,
    },

    /// String doesn't match required format
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Invalid enum variant (e.g. unknown mood slug or item type)
    InvalidVariant { field: &'static str, value: String },

    /// Numeric field outside its allowed range
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::TooLarge { field, max_bytes } => {
                write!(f, "{} exceeds maximum size of {} bytes", field, max_bytes)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Require a non-empty string no longer than `max` characters
pub fn require_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.len() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::OutOfRange {
            field: "rating",
            min: 1,
            max: 5,
        };
        assert_eq!(err.to_string(), "rating must be between 1 and 5");
    }

    #[test]
    fn too_large_reports_bytes() {
        let err = ValidationError::TooLarge {
            field: "content",
            max_bytes: 8 * 1024 * 1024,
        };
        assert_eq!(
            err.to_string(),
            "content exceeds maximum size of 8388608 bytes"
        );
    }

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("title", "  hi  ", 10).unwrap(), "hi");
    }

    #[test]
    fn require_text_rejects_blank() {
        assert!(matches!(
            require_text("title", "   ", 10),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn require_text_rejects_oversize() {
        assert!(matches!(
            require_text("title", "abcdef", 5),
            Err(ValidationError::TooLong { .. })
        ));
    }
}
