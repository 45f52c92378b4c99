//! Codec adapters and the ordered codec set.
//!
//! Every adapter honours one completion contract: [`Codec::dispatch`] returns a
//! future of the compressed bytes. Synchronous adapters do their work inside
//! `dispatch` and hand back an already-resolved future; asynchronous adapters
//! start the work on tokio's blocking pool and resolve when it finishes.

use crate::{Algorithm, CompressionError, Result};
use bytes::Bytes;
use futures::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Future returned by [`Codec::dispatch`].
pub type CompressFuture = BoxFuture<'static, Result<Vec<u8>>>;

/// Shared compression routine.
pub type CompressFn = Arc<dyn Fn(&[u8]) -> Result<Vec<u8>> + Send + Sync>;

/// How a codec delivers its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Runs to completion inside `dispatch`
    Sync,
    /// Runs in the background; the returned future resolves later
    Async,
}

/// A named compression routine with fixed configuration.
pub trait Codec: Send + Sync {
    /// Unique name, used as the report key
    fn name(&self) -> &str;

    /// Whether `dispatch` blocks until the work is done
    fn completion(&self) -> Completion;

    /// Start compressing `payload`.
    ///
    /// The payload is never mutated. Failures surface through the future.
    fn dispatch(&self, payload: Bytes) -> CompressFuture;
}

/// Codec that compresses inline on the caller's thread.
#[derive(Clone)]
pub struct SyncCodec {
    name: String,
    compress: CompressFn,
}

impl SyncCodec {
    /// Wrap a compression routine
    pub fn new<F>(name: impl Into<String>, compress: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Vec<u8>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            compress: Arc::new(compress),
        }
    }
}

impl Codec for SyncCodec {
    fn name(&self) -> &str {
        &self.name
    }

    fn completion(&self) -> Completion {
        Completion::Sync
    }

    fn dispatch(&self, payload: Bytes) -> CompressFuture {
        // A panicking routine settles its pair like any other failure
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (self.compress)(&payload)))
            .unwrap_or_else(|_| {
                Err(CompressionError::WorkerPanicked {
                    codec: self.name.clone(),
                })
            });
        future::ready(outcome).boxed()
    }
}

/// Codec that compresses on tokio's blocking pool.
#[derive(Clone)]
pub struct BlockingCodec {
    name: String,
    compress: CompressFn,
}

impl BlockingCodec {
    /// Wrap a compression routine
    pub fn new<F>(name: impl Into<String>, compress: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Vec<u8>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            compress: Arc::new(compress),
        }
    }
}

impl Codec for BlockingCodec {
    fn name(&self) -> &str {
        &self.name
    }

    fn completion(&self) -> Completion {
        Completion::Async
    }

    fn dispatch(&self, payload: Bytes) -> CompressFuture {
        let codec = self.name.clone();

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => return future::ready(Err(CompressionError::NoRuntime { codec })).boxed(),
        };

        let compress = Arc::clone(&self.compress);
        handle
            .spawn_blocking(move || compress(&payload))
            .map(move |joined| match joined {
                Ok(result) => result,
                Err(e) if e.is_panic() => Err(CompressionError::WorkerPanicked { codec }),
                Err(_) => Err(CompressionError::WorkerCancelled { codec }),
            })
            .boxed()
    }
}

/// Ordered set of codecs with unique names.
///
/// Iteration order is registration order, which is the dispatch order.
#[derive(Clone, Default)]
pub struct CodecSet {
    codecs: Vec<Arc<dyn Codec>>,
}

impl CodecSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The four standard codecs: deflate, brotli, lzma, gzip.
    ///
    /// LZMA is the asynchronous one; the rest compress inline.
    #[must_use]
    pub fn standard() -> Self {
        let codecs = Algorithm::ALL
            .into_iter()
            .map(|algorithm| -> Arc<dyn Codec> {
                let compress = move |data: &[u8]| algorithm.compress(data);
                match algorithm.completion() {
                    Completion::Sync => Arc::new(SyncCodec::new(algorithm.name(), compress)),
                    Completion::Async => Arc::new(BlockingCodec::new(algorithm.name(), compress)),
                }
            })
            .collect();

        Self { codecs }
    }

    /// Register a codec, rejecting duplicate names
    pub fn register(&mut self, codec: impl Codec + 'static) -> Result<()> {
        if self.get(codec.name()).is_some() {
            return Err(CompressionError::DuplicateName(codec.name().to_string()));
        }
        self.codecs.push(Arc::new(codec));
        Ok(())
    }

    /// Builder-style [`CodecSet::register`]
    pub fn with(mut self, codec: impl Codec + 'static) -> Result<Self> {
        self.register(codec)?;
        Ok(self)
    }

    /// Look a codec up by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Codec>> {
        self.codecs.iter().find(|c| c.name() == name)
    }

    /// Codecs in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Codec>> {
        self.codecs.iter()
    }

    /// Codec names in registration order
    pub fn names(&self) -> Vec<String> {
        self.codecs.iter().map(|c| c.name().to_string()).collect()
    }

    /// Number of registered codecs
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Whether no codec is registered
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl fmt::Debug for CodecSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.codecs.iter().map(|c| c.name())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order_and_completion() {
        let set = CodecSet::standard();
        assert_eq!(set.names(), vec!["deflate", "brotli", "lzma", "gzip"]);

        let async_codecs: Vec<_> = set
            .iter()
            .filter(|c| c.completion() == Completion::Async)
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(async_codecs, vec!["lzma"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = CodecSet::standard().with(SyncCodec::new("gzip", |d| Ok(d.to_vec())));
        assert!(matches!(result, Err(CompressionError::DuplicateName(name)) if name == "gzip"));
    }

    #[tokio::test]
    async fn test_sync_codec_resolves_immediately() {
        let codec = SyncCodec::new("null-codec", |d| Ok(d.to_vec()));
        let fut = codec.dispatch(Bytes::from_static(b"abc"));
        assert_eq!(fut.now_or_never().unwrap().unwrap(), b"abc");
    }

    #[tokio::test]
    async fn test_blocking_codec_runs_in_background() {
        let codec = BlockingCodec::new("upper", |d| Ok(d.to_ascii_uppercase()));
        let out = codec.dispatch(Bytes::from_static(b"abc")).await.unwrap();
        assert_eq!(out, b"ABC");
    }

    #[test]
    fn test_sync_codec_panic_is_an_error() {
        let codec = SyncCodec::new("boom", |_| panic!("encoder exploded"));
        let err = codec
            .dispatch(Bytes::new())
            .now_or_never()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, CompressionError::WorkerPanicked { codec } if codec == "boom"));
    }

    #[tokio::test]
    async fn test_blocking_codec_panic_is_an_error() {
        let codec = BlockingCodec::new("boom", |_| panic!("encoder exploded"));
        let err = codec.dispatch(Bytes::new()).await.unwrap_err();
        assert!(matches!(err, CompressionError::WorkerPanicked { codec } if codec == "boom"));
    }

    #[test]
    fn test_blocking_codec_outside_runtime() {
        let codec = BlockingCodec::new("lonely", |d| Ok(d.to_vec()));
        let err = codec
            .dispatch(Bytes::new())
            .now_or_never()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, CompressionError::NoRuntime { .. }));
    }

    #[tokio::test]
    async fn test_standard_codecs_roundtrip() {
        let payload = Bytes::from("lorem ipsum dolor sit amet ".repeat(64));
        for codec in CodecSet::standard().iter() {
            let compressed = codec.dispatch(payload.clone()).await.unwrap();
            let algorithm = Algorithm::from_name(codec.name()).unwrap();
            assert_eq!(algorithm.decompress(&compressed).unwrap(), payload.to_vec());
        }
    }
}
