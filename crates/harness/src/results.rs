//! Per-run result table.
//!
//! Records are write-once: the first settlement of a (sample, codec) pair
//! wins and any later write is rejected.

use crate::error::{HarnessError, Result};
use crate::pending::PairKey;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::time::Duration;

/// Outcome of one (sample, codec) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecRecord {
    Completed {
        elapsed_ms: u64,
        result_size: usize,
        compression_ratio_percent: u64,
    },
    Failed {
        elapsed_ms: u64,
        reason: String,
    },
}

impl CodecRecord {
    /// Build a completed record, computing the ratio against `original_size`
    pub fn completed(elapsed: Duration, result_size: usize, original_size: usize) -> Self {
        Self::Completed {
            elapsed_ms: elapsed_ms(elapsed),
            result_size,
            compression_ratio_percent: compression_ratio_percent(result_size, original_size),
        }
    }

    pub fn failed(elapsed: Duration, reason: impl Into<String>) -> Self {
        Self::Failed {
            elapsed_ms: elapsed_ms(elapsed),
            reason: reason.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn elapsed_ms(&self) -> u64 {
        match self {
            Self::Completed { elapsed_ms, .. } | Self::Failed { elapsed_ms, .. } => *elapsed_ms,
        }
    }
}

/// `round(result / original * 100)`, or 0 for an empty original.
///
/// Halves round up. Integer arithmetic, so huge sizes don't lose precision.
#[allow(clippy::cast_possible_truncation)]
pub fn compression_ratio_percent(result_size: usize, original_size: usize) -> u64 {
    if original_size == 0 {
        return 0;
    }
    let result = result_size as u128;
    let original = original_size as u128;
    ((result * 200 + original) / (original * 2)) as u64
}

/// Milliseconds, rounded to nearest
#[allow(clippy::cast_possible_truncation)]
pub fn elapsed_ms(elapsed: Duration) -> u64 {
    ((elapsed.as_nanos() + 500_000) / 1_000_000) as u64
}

/// Everything recorded for one sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub name: String,
    pub original_size: usize,
    /// Keyed by codec index, so iteration follows registration order
    pub records: BTreeMap<usize, CodecRecord>,
}

/// Results of one run, in sample order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    codec_names: Vec<String>,
    entries: BTreeMap<usize, ResultEntry>,
}

impl ResultTable {
    /// Empty table for a run over `codec_names`, in registration order
    pub fn new(codec_names: Vec<String>) -> Self {
        Self {
            codec_names,
            entries: BTreeMap::new(),
        }
    }

    pub fn codec_name(&self, index: usize) -> Option<&str> {
        self.codec_names.get(index).map(String::as_str)
    }

    pub fn codec_names(&self) -> &[String] {
        &self.codec_names
    }

    /// Record the outcome of a pair. The sample's entry is created on first use.
    pub fn record(
        &mut self,
        key: PairKey,
        sample_name: &str,
        original_size: usize,
        record: CodecRecord,
    ) -> Result<()> {
        let codec = self
            .codec_names
            .get(key.codec)
            .ok_or(HarnessError::UnknownCodec(key.codec))?;

        let entry = self.entries.entry(key.sample).or_insert_with(|| ResultEntry {
            name: sample_name.to_string(),
            original_size,
            records: BTreeMap::new(),
        });

        match entry.records.entry(key.codec) {
            Entry::Occupied(_) => Err(HarnessError::DuplicateResult {
                sample: entry.name.clone(),
                codec: codec.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    /// Entries in sample order
    pub fn entries(&self) -> impl Iterator<Item = &ResultEntry> {
        self.entries.values()
    }

    /// Entry for a sample, by name
    pub fn get(&self, sample_name: &str) -> Option<&ResultEntry> {
        self.entries().find(|e| e.name == sample_name)
    }

    /// Record for a (sample, codec) pair, by name
    pub fn record_for(&self, sample_name: &str, codec_name: &str) -> Option<&CodecRecord> {
        let codec = self.codec_names.iter().position(|n| n == codec_name)?;
        self.get(sample_name)?.records.get(&codec)
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.entries.values().map(|e| e.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(|e| e.records.values())
            .filter(|r| r.is_failed())
            .count()
    }
}
