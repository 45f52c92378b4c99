//! LZMA compression in the xz container.

use crate::Result;
use std::io::{Read, Write};
use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

/// liblzma's default preset.
pub const DEFAULT_PRESET: u32 = 6;

/// Compress data into an `.xz` stream.
///
/// # Arguments
/// * `data` - Data to compress
/// * `preset` - liblzma preset (0-9)
pub fn lzma_compress(data: &[u8], preset: u32) -> Result<Vec<u8>> {
    let mut encoder = XzEncoder::new(Vec::new(), preset.min(9));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress an `.xz` stream.
pub fn lzma_decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = XzDecoder::new(data);
    let mut output = Vec::new();
    decoder.read_to_end(&mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let original = b"Hello, LZMA! Hello, LZMA! Hello, LZMA!";
        let compressed = lzma_compress(original, DEFAULT_PRESET).unwrap();
        assert_eq!(lzma_decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_xz_magic() {
        let compressed = lzma_compress(b"", DEFAULT_PRESET).unwrap();
        assert_eq!(&compressed[..6], &[0xfd, b'7', b'z', b'X', b'Z', 0x00]);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(lzma_decompress(b"not an xz stream").is_err());
    }
}
