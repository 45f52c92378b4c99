//! Error types for sample acquisition

use codecbench_core::{Error, ErrorCode};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for acquisition operations
pub type SampleResult<T> = Result<T, SampleError>;

/// Sample acquisition errors
#[derive(Error, Debug)]
pub enum SampleError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("GET {url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MediaWiki reported an error for the requested page
    #[error("MediaWiki error for page {page:?}: {info}")]
    MediaWiki {
        /// Requested page title
        page: String,
        /// Error description returned by the API
        info: String,
    },

    /// JSON response lacked a required field
    #[error("Response from {url} has no {field} field")]
    MissingField {
        /// Requested URL
        url: String,
        /// JSON pointer of the missing field
        field: &'static str,
    },

    /// Local sample could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Two samples share a name
    #[error("Duplicate sample name {0:?}")]
    DuplicateName(String),

    /// All retry attempts exhausted
    #[error("Fetching {name} failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Sample being fetched
        name: String,
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },
}

impl SampleError {
    /// Check if this error is worth another attempt
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Json(_)
            | Self::MediaWiki { .. }
            | Self::MissingField { .. }
            | Self::Io { .. }
            | Self::DuplicateName(_)
            | Self::RetriesExhausted { .. } => false,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            Self::Request(_) | Self::Status { .. } | Self::RetriesExhausted { .. } => {
                ErrorCode::FetchFailed
            }
            Self::Json(_) | Self::MediaWiki { .. } | Self::MissingField { .. } => {
                ErrorCode::InvalidSample
            }
            Self::Io { .. } | Self::DuplicateName(_) => ErrorCode::AcquisitionFailed,
        }
    }
}

impl From<SampleError> for Error {
    fn from(err: SampleError) -> Self {
        let code = err.code();
        let mut error = Error::acquisition(err.to_string())
            .with_context("Sample acquisition")
            .with_source(err);
        error.code = code;
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codecbench_core::error::exit_codes;

    #[test]
    fn test_retryable_statuses() {
        let status = |status| SampleError::Status {
            url: "https://example.org".to_string(),
            status,
        };
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(404).is_retryable());
        assert!(!SampleError::DuplicateName("lorem".into()).is_retryable());
    }

    #[test]
    fn test_converts_to_acquisition_exit_code() {
        let err: Error = SampleError::Status {
            url: "https://example.org".to_string(),
            status: 500,
        }
        .into();
        assert_eq!(err.code, ErrorCode::FetchFailed);
        assert_eq!(err.exit_code(), exit_codes::ACQUISITION_ERROR);
        assert!(err.suggestion.is_some());
    }
}
