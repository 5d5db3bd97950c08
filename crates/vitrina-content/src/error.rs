//! Error types for content decoding.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding CMS entries into typed models.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is absent from an entry's field map.
    #[error("missing field '{field}' on {content_type} entry")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
        /// Content type the entry claimed to be.
        content_type: &'static str,
    },

    /// A slug value is empty or contains characters unsafe for URLs.
    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_display() {
        let err = Error::MissingField {
            field: "slug",
            content_type: "project",
        };
        let msg = err.to_string();
        assert!(msg.contains("slug"));
        assert!(msg.contains("project"));
    }

    #[test]
    fn invalid_slug_display() {
        let err = Error::InvalidSlug("no spaces allowed".to_string());
        assert!(err.to_string().contains("no spaces allowed"));
    }

    #[test]
    fn from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().contains("JSON error"));
    }
}
