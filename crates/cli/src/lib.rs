//! Terminal helpers for codec-bench
//!
//! Everything here writes to stderr; stdout is reserved for the report.
//! - Status lines
//! - Progress indicators
//! - Size, duration and ratio formatting

#![warn(missing_docs)]

pub mod output;
pub mod progress;
