//! Compression codec adapters for codec-bench.
//!
//! This crate provides:
//! - Deflate (zlib-wrapped) and Gzip via `flate2`
//! - Brotli via `brotli`
//! - LZMA (xz container) via `xz2`
//! - [`Codec`] adapters with a unified future-based completion contract
//! - [`CodecSet`], the ordered registry the harness dispatches from

mod brotli_impl;
mod error;
mod gzip;
mod lzma;
pub mod registry;

pub use brotli_impl::{brotli_compress, brotli_decompress, BrotliSettings};
pub use error::{CompressionError, Result};
pub use gzip::{deflate_compress, deflate_decompress, gzip_compress, gzip_decompress};
pub use lzma::{lzma_compress, lzma_decompress};
pub use registry::{BlockingCodec, Codec, CodecSet, Completion, CompressFuture, SyncCodec};

/// Compression algorithm with its fixed benchmark configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// zlib-wrapped Deflate, level 6
    Deflate,
    /// Brotli, quality 6, 4 MiB window
    Brotli,
    /// LZMA in an xz container, preset 6
    Lzma,
    /// Gzip, level 6
    Gzip,
}

impl Algorithm {
    /// All algorithms in dispatch order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Deflate,
        Algorithm::Brotli,
        Algorithm::Lzma,
        Algorithm::Gzip,
    ];

    /// Report name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Deflate => "deflate",
            Algorithm::Brotli => "brotli",
            Algorithm::Lzma => "lzma",
            Algorithm::Gzip => "gzip",
        }
    }

    /// Look an algorithm up by report name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// How the standard adapter for this algorithm completes
    pub fn completion(self) -> Completion {
        match self {
            Algorithm::Lzma => Completion::Async,
            _ => Completion::Sync,
        }
    }

    /// Compress with the fixed benchmark configuration
    pub fn compress(self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Algorithm::Deflate => deflate_compress(data, gzip::DEFAULT_LEVEL),
            Algorithm::Brotli => brotli_compress(data, &BrotliSettings::default()),
            Algorithm::Lzma => lzma_compress(data, lzma::DEFAULT_PRESET),
            Algorithm::Gzip => gzip_compress(data, gzip::DEFAULT_LEVEL),
        }
    }

    /// Decompress data produced by [`Algorithm::compress`]
    pub fn decompress(self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Algorithm::Deflate => deflate_decompress(data),
            Algorithm::Brotli => brotli_decompress(data),
            Algorithm::Lzma => lzma_decompress(data),
            Algorithm::Gzip => gzip_decompress(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_names_roundtrip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(Algorithm::from_name(algorithm.name()), Some(algorithm));
        }
        assert_eq!(Algorithm::from_name("zstd"), None);
    }

    proptest! {
        #[test]
        fn prop_every_algorithm_is_lossless(
            data in proptest::collection::vec(any::<u8>(), 0..2048),
        ) {
            for algorithm in Algorithm::ALL {
                let compressed = algorithm.compress(&data).unwrap();
                prop_assert_eq!(algorithm.decompress(&compressed).unwrap(), data.clone());
            }
        }
    }
}
