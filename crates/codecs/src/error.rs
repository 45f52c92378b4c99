//! Error types for the codecs crate.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CompressionError>;

/// Errors that can occur while running a codec.
#[derive(Debug, Error)]
pub enum CompressionError {
    /// Compression failed
    #[error("Compression failed: {0}")]
    CompressionFailed(String),

    /// Decompression failed
    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),

    /// IO error reported by an encoder or decoder
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A background worker panicked before producing output
    #[error("{codec} worker panicked")]
    WorkerPanicked {
        /// Codec that was running
        codec: String,
    },

    /// A background worker was cancelled before producing output
    #[error("{codec} worker was cancelled")]
    WorkerCancelled {
        /// Codec that was running
        codec: String,
    },

    /// An asynchronous codec was dispatched outside a tokio runtime
    #[error("{codec} requires a tokio runtime")]
    NoRuntime {
        /// Codec that was dispatched
        codec: String,
    },

    /// Two codecs were registered under the same name
    #[error("Codec {0:?} is already registered")]
    DuplicateName(String),
}
