//! Core utilities for codec-bench
//!
//! Shared functionality used by the sample provider, the harness and the CLI:
//!
//! - **Error handling**: structured errors with codes, context, suggestions and exit codes
//! - **Configuration**: TOML configuration with validation and environment overrides
//! - **Retry**: exponential backoff for flaky async operations (sample fetches)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod retry;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::retry::{retry_async, RetryConfig, RetryResult};
}
