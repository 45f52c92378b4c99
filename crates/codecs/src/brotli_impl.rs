//! Brotli compression implementation.

use crate::Result;
use brotli::enc::BrotliEncoderParams;
use std::io::Read;

/// Fixed Brotli encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrotliSettings {
    /// Compression quality (0-11)
    pub quality: u32,
    /// Base-2 log of the sliding window size (10-24)
    pub lgwin: u32,
    /// Base-2 log of the input block size; 0 lets the encoder choose
    pub lgblock: u32,
}

impl Default for BrotliSettings {
    /// Quality 6 with a 4 MiB window.
    fn default() -> Self {
        Self {
            quality: 6,
            lgwin: 22,
            lgblock: 0,
        }
    }
}

/// Compress data using Brotli.
///
/// # Arguments
/// * `data` - Data to compress
/// * `settings` - Encoder settings; out-of-range values are clamped
///
/// # Returns
/// Compressed data
#[allow(clippy::cast_possible_wrap)]
pub fn brotli_compress(data: &[u8], settings: &BrotliSettings) -> Result<Vec<u8>> {
    let mut params = BrotliEncoderParams::default();
    params.quality = settings.quality.min(11) as i32;
    params.lgwin = settings.lgwin.clamp(10, 24) as i32;
    if settings.lgblock != 0 {
        params.lgblock = settings.lgblock.clamp(16, 24) as i32;
    }

    let mut input = data;
    let mut output = Vec::new();
    brotli::BrotliCompress(&mut input, &mut output, &params)?;

    Ok(output)
}

/// Decompress Brotli data.
///
/// # Arguments
/// * `data` - Compressed data
///
/// # Returns
/// Decompressed data
pub fn brotli_decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    let mut decoder = brotli::Decompressor::new(data, 4096);
    decoder.read_to_end(&mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let original = b"Hello, World! This is a test of Brotli compression.";
        let compressed = brotli_compress(original, &BrotliSettings::default()).unwrap();
        let decompressed = brotli_decompress(&compressed).unwrap();
        assert_eq!(original.as_slice(), decompressed.as_slice());
    }

    #[test]
    fn test_compression_ratio() {
        let data = "a".repeat(1000);
        let compressed = brotli_compress(data.as_bytes(), &BrotliSettings::default()).unwrap();
        assert!(compressed.len() < data.len() / 10);
    }

    #[test]
    fn test_empty_input() {
        let compressed = brotli_compress(b"", &BrotliSettings::default()).unwrap();
        assert!(!compressed.is_empty());
        assert!(brotli_decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_settings_are_clamped() {
        let settings = BrotliSettings {
            quality: 99,
            lgwin: 99,
            lgblock: 99,
        };
        let data = b"clamped settings still produce a valid stream";
        let compressed = brotli_compress(data, &settings).unwrap();
        assert_eq!(brotli_decompress(&compressed).unwrap(), data);
    }
}
