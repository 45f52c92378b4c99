//! Gzip and Deflate compression implementations.
//!
//! "Deflate" here is the zlib-wrapped stream (RFC 1950), the format HTTP's
//! `Content-Encoding: deflate` and most zlib bindings produce.

use crate::Result;
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::io::{Read, Write};

/// zlib's default level.
pub const DEFAULT_LEVEL: u32 = 6;

/// Compress data using Gzip.
///
/// # Arguments
/// * `data` - Data to compress
/// * `level` - Compression level (0-9)
///
/// # Returns
/// Compressed data
pub fn gzip_compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let level = Compression::new(level.min(9));
    let mut encoder = GzEncoder::new(Vec::new(), level);
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress Gzip data.
pub fn gzip_decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut output = Vec::new();
    decoder.read_to_end(&mut output)?;
    Ok(output)
}

/// Compress data using zlib-wrapped Deflate.
///
/// # Arguments
/// * `data` - Data to compress
/// * `level` - Compression level (0-9)
///
/// # Returns
/// Compressed data
pub fn deflate_compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let level = Compression::new(level.min(9));
    let mut encoder = ZlibEncoder::new(Vec::new(), level);
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress zlib-wrapped Deflate data.
pub fn deflate_decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut output = Vec::new();
    decoder.read_to_end(&mut output)?;
    Ok(output)
}
