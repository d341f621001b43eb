//! Error types for the extractor.
//!
//! Only collaborator-boundary failures surface here: configuration decoding,
//! document loading and document fetching. Selector, type and formatter edge
//! cases are absorbed during resolution and never become errors.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error produced by a transport implementation.
pub type TransportSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Configuration text is not a valid field mapping.
    #[error("Invalid configuration: {0}")]
    ConfigFormat(#[from] serde_yaml_ng::Error),

    /// Configuration file could not be read.
    #[error("Failed to read configuration {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document file could not be read.
    #[error("Failed to load document {}: {source}", .path.display())]
    DocumentLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport failed to retrieve the document.
    #[error("Failed to fetch document from {url}: {source}")]
    DocumentFetch {
        url: String,
        #[source]
        source: TransportSource,
    },

    /// All retry attempts failed.
    #[error("Failed to fetch {url} after {attempts} attempts: {message}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        message: String,
    },

    /// Formatter does not satisfy the registration contract.
    #[error("Invalid formatter name: '{0}'. Expected a non-empty name without whitespace")]
    InvalidFormatter(String),

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractorError {
    /// Wrap any transport error as a [`ExtractorError::DocumentFetch`].
    pub fn fetch(url: impl Into<String>, source: impl Into<TransportSource>) -> Self {
        Self::DocumentFetch {
            url: url.into(),
            source: source.into(),
        }
    }

    /// True for "bad config" failures.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigFormat(_) | Self::ConfigRead { .. } | Self::InvalidFormatter(_)
        )
    }

    /// True for "bad file" failures.
    #[must_use]
    pub fn is_document_error(&self) -> bool {
        matches!(self, Self::DocumentLoad { .. })
    }

    /// True for "bad network" failures.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::DocumentFetch { .. } | Self::RetriesExhausted { .. }
        )
    }
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExtractorError::InvalidFormatter("bad name".to_string());
        assert!(err.to_string().contains("bad name"));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_document_load_display() {
        let err = ExtractorError::DocumentLoad {
            path: PathBuf::from("missing.html"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load document missing.html: not found"
        );
        assert!(err.is_document_error());
        assert!(!err.is_fetch_error());
    }

    #[test]
    fn test_fetch_helper() {
        let err = ExtractorError::fetch("https://example.com/", "connection refused");
        assert_eq!(
            err.to_string(),
            "Failed to fetch document from https://example.com/: connection refused"
        );
        assert!(err.is_fetch_error());
        assert!(!err.is_config_error());
    }
}
