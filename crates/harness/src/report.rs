//! Report rendering.
//!
//! Rendering is a pure function of the table: samples in acquisition order,
//! `originalSize` first, then codecs in registration order.

use crate::error::Result;
use crate::results::{CodecRecord, ResultEntry, ResultTable};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt::Write;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Aligned plain text, one block per sample
    Text,
}

/// Renders a finalized [`ResultTable`]
pub struct Reporter;

impl Reporter {
    pub fn render(table: &ResultTable, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => Self::json(table),
            ReportFormat::Text => Ok(Self::text(table)),
        }
    }

    /// `{"<sample>": {"originalSize": n, "<codec>": {...}}}`
    pub fn json(table: &ResultTable) -> Result<String> {
        Ok(serde_json::to_string_pretty(&JsonReport(table))?)
    }

    pub fn text(table: &ResultTable) -> String {
        let width = table
            .codec_names()
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for entry in table.entries() {
            let _ = writeln!(out, "{} ({} bytes)", entry.name, entry.original_size);
            for (codec, record) in named_records(table, entry) {
                let _ = match record {
                    CodecRecord::Completed {
                        elapsed_ms,
                        result_size,
                        compression_ratio_percent,
                    } => writeln!(
                        out,
                        "  {:<width$}  {:>8}  {:>12}  {:>5}",
                        codec,
                        format!("{}ms", elapsed_ms),
                        result_size,
                        format!("{}%", compression_ratio_percent),
                    ),
                    CodecRecord::Failed { reason, .. } => {
                        writeln!(out, "  {:<width$}  failed: {}", codec, reason)
                    }
                };
            }
        }
        out
    }
}

fn named_records<'a>(
    table: &'a ResultTable,
    entry: &'a ResultEntry,
) -> impl Iterator<Item = (&'a str, &'a CodecRecord)> {
    entry
        .records
        .iter()
        .filter_map(move |(index, record)| Some((table.codec_name(*index)?, record)))
}

struct JsonReport<'a>(&'a ResultTable);

impl Serialize for JsonReport<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for entry in self.0.entries() {
            map.serialize_entry(&entry.name, &JsonEntry(self.0, entry))?;
        }
        map.end()
    }
}

struct JsonEntry<'a>(&'a ResultTable, &'a ResultEntry);

impl Serialize for JsonEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("originalSize", &self.1.original_size)?;
        for (codec, record) in named_records(self.0, self.1) {
            map.serialize_entry(codec, &JsonRecord(record))?;
        }
        map.end()
    }
}

struct JsonRecord<'a>(&'a CodecRecord);

impl Serialize for JsonRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self.0 {
            CodecRecord::Completed {
                elapsed_ms,
                result_size,
                compression_ratio_percent,
            } => {
                map.serialize_entry("elapsed", &format!("{}ms", elapsed_ms))?;
                map.serialize_entry("resultSize", result_size)?;
                let ratio = format!("{}%", compression_ratio_percent);
                map.serialize_entry("compressionRatio", &ratio)?;
            }
            CodecRecord::Failed { reason, .. } => {
                map.serialize_entry("failed", reason)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pending::PairKey;
    use std::time::Duration;

    fn sample_table() -> ResultTable {
        let mut table = ResultTable::new(vec![
            "deflate".to_string(),
            "brotli".to_string(),
            "lzma".to_string(),
        ]);
        table
            .record(
                PairKey::new(0, 2),
                "lorem",
                1000,
                CodecRecord::failed(Duration::from_millis(1), "lzma worker panicked"),
            )
            .unwrap();
        table
            .record(
                PairKey::new(0, 0),
                "lorem",
                1000,
                CodecRecord::completed(Duration::from_millis(3), 410, 1000),
            )
            .unwrap();
        table
            .record(
                PairKey::new(1, 1),
                "script",
                0,
                CodecRecord::completed(Duration::ZERO, 1, 0),
            )
            .unwrap();
        table
    }

    #[test]
    fn test_json_shape() {
        let json = Reporter::json(&sample_table()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["lorem"]["originalSize"], 1000);
        assert_eq!(value["lorem"]["deflate"]["elapsed"], "3ms");
        assert_eq!(value["lorem"]["deflate"]["resultSize"], 410);
        assert_eq!(value["lorem"]["deflate"]["compressionRatio"], "41%");
        assert_eq!(value["lorem"]["lzma"]["failed"], "lzma worker panicked");
        assert!(value["lorem"].get("brotli").is_none());
        assert_eq!(value["script"]["brotli"]["compressionRatio"], "0%");
    }

    #[test]
    fn test_json_key_order() {
        let json = Reporter::json(&sample_table()).unwrap();
        let keys = [
            "\"lorem\"",
            "\"originalSize\"",
            "\"deflate\"",
            "\"lzma\"",
            "\"script\"",
        ];
        let positions: Vec<_> = keys
            .iter()
            .map(|key| json.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_is_idempotent() {
        let table = sample_table();
        for format in [ReportFormat::Json, ReportFormat::Text] {
            let first = Reporter::render(&table, format).unwrap();
            let second = Reporter::render(&table, format).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_empty_table_renders_empty_object() {
        let json = Reporter::json(&ResultTable::new(vec![])).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_text_format() {
        let text = Reporter::text(&sample_table());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "lorem (1000 bytes)");
        assert!(lines[1].starts_with("  deflate"));
        assert!(lines[1].contains("3ms"));
        assert!(lines[1].ends_with("41%"));
        assert_eq!(lines[2], "  lzma     failed: lzma worker panicked");
        assert_eq!(lines[3], "script (0 bytes)");
    }
}
