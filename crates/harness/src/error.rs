//! Harness error types

use crate::pending::PairKey;
use thiserror::Error;

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Harness errors
///
/// Bookkeeping variants mean a pair was dispatched or recorded twice. The
/// runner logs them and keeps going; they never abort a run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("pair {0} is already in flight")]
    DuplicatePair(PairKey),

    #[error("pair {0} is not in flight")]
    UnknownPair(PairKey),

    #[error("result for sample '{sample}' and codec '{codec}' was already recorded")]
    DuplicateResult { sample: String, codec: String },

    #[error("codec index {0} is out of range")]
    UnknownCodec(usize),

    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}
