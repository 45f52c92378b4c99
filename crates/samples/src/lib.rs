//! Sample acquisition for codec-bench
//!
//! Produces the named byte buffers the harness compresses:
//!
//! - **lorem**: generated lorem-ipsum text, deterministic per seed
//! - **wikipedia**: an article's rendered HTML from the MediaWiki parse API
//! - **stylesheet** / **script**: raw HTTP bodies
//! - local files listed in the configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use codecbench_core::config::ConfigSchema;
//! use codecbench_samples::SamplePlan;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let samples = SamplePlan::from_config(&ConfigSchema::default(), true)
//!     .acquire()
//!     .await?;
//! for sample in &samples {
//!     println!("{}: {} bytes", sample.name, sample.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod error;
pub mod fetch;
pub mod lorem;
pub mod provider;

use bytes::Bytes;

pub use error::{SampleError, SampleResult};
pub use fetch::Fetcher;
pub use provider::{SamplePlan, SampleSource};

/// A named input buffer. Cloning shares the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Unique name within a run
    pub name: String,
    /// Bytes to compress
    pub payload: Bytes,
}

impl Sample {
    /// Create a sample
    pub fn new(name: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
