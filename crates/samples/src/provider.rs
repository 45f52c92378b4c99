//! Turning configuration into an ordered list of named samples

use crate::error::{SampleError, SampleResult};
use crate::fetch::Fetcher;
use crate::{lorem, Sample};
use bytes::Bytes;
use codecbench_core::config::ConfigSchema;
use codecbench_core::retry::RetryConfig;
use futures::future::try_join_all;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Where a sample comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleSource {
    /// Generated lorem-ipsum text
    Lorem {
        name: String,
        sentences: usize,
        seed: u64,
    },
    /// Body of an HTTP GET
    Http { name: String, url: String },
    /// Rendered HTML of a wiki page
    MediaWiki {
        name: String,
        api: String,
        page: String,
    },
    /// A local file
    File { name: String, path: PathBuf },
}

impl SampleSource {
    /// Sample name this source produces
    pub fn name(&self) -> &str {
        match self {
            Self::Lorem { name, .. }
            | Self::Http { name, .. }
            | Self::MediaWiki { name, .. }
            | Self::File { name, .. } => name,
        }
    }

    /// Whether acquiring this sample needs the network
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::MediaWiki { .. })
    }

    /// Past-tense verb for progress lines
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Lorem { .. } => "generated",
            Self::Http { .. } | Self::MediaWiki { .. } => "fetched",
            Self::File { .. } => "read",
        }
    }
}

/// Ordered acquisition plan
#[derive(Debug, Clone, Default)]
pub struct SamplePlan {
    sources: Vec<SampleSource>,
    http_timeout: Duration,
    retry: RetryConfig,
}

impl SamplePlan {
    /// Build the plan described by the configuration.
    ///
    /// Order: lorem, wikipedia, stylesheet, script, then configured files.
    /// `offline` drops every remote source.
    pub fn from_config(schema: &ConfigSchema, offline: bool) -> Self {
        let mut sources = Vec::new();

        if schema.lorem.enabled {
            sources.push(SampleSource::Lorem {
                name: "lorem".to_string(),
                sentences: schema.lorem.sentences,
                seed: schema.lorem.seed,
            });
        }

        let remote = &schema.remote;
        if remote.enabled && !offline {
            if !remote.wikipedia_page.is_empty() {
                sources.push(SampleSource::MediaWiki {
                    name: "wikipedia".to_string(),
                    api: remote.wikipedia_api.clone(),
                    page: remote.wikipedia_page.clone(),
                });
            }
            if !remote.stylesheet_url.is_empty() {
                sources.push(SampleSource::Http {
                    name: "stylesheet".to_string(),
                    url: remote.stylesheet_url.clone(),
                });
            }
            if !remote.script_url.is_empty() {
                sources.push(SampleSource::Http {
                    name: "script".to_string(),
                    url: remote.script_url.clone(),
                });
            }
        }

        sources.extend(schema.files.iter().map(|file| SampleSource::File {
            name: file.name.clone(),
            path: file.path.clone(),
        }));

        Self {
            sources,
            http_timeout: Duration::from_secs(remote.http_timeout_secs),
            retry: RetryConfig::with_max_attempts(remote.max_attempts),
        }
    }

    /// Plan with explicit sources
    pub fn new(sources: Vec<SampleSource>) -> Self {
        Self {
            sources,
            http_timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }

    /// Planned sources in acquisition order
    pub fn sources(&self) -> &[SampleSource] {
        &self.sources
    }

    /// Acquire every sample.
    ///
    /// Remote samples are fetched concurrently; the result keeps plan order.
    /// Any failure aborts the whole acquisition.
    pub async fn acquire(&self) -> SampleResult<Vec<Sample>> {
        let mut seen = HashSet::new();
        for source in &self.sources {
            if !seen.insert(source.name()) {
                return Err(SampleError::DuplicateName(source.name().to_string()));
            }
        }

        let fetcher = Fetcher::new(self.http_timeout, self.retry.clone())?;

        let samples = try_join_all(
            self.sources
                .iter()
                .map(|source| acquire_one(source, &fetcher)),
        )
        .await?;

        Ok(samples)
    }
}

async fn acquire_one(source: &SampleSource, fetcher: &Fetcher) -> SampleResult<Sample> {
    let payload = match source {
        SampleSource::Lorem { sentences, seed, .. } => {
            Bytes::from(lorem::generate(*sentences, *seed))
        }
        SampleSource::File { path, .. } => {
            let data = std::fs::read(path).map_err(|source| SampleError::Io {
                path: path.clone(),
                source,
            })?;
            Bytes::from(data)
        }
        SampleSource::Http { name, url } => fetcher.fetch_raw(name, url).await?,
        SampleSource::MediaWiki { name, api, page } => {
            fetcher.fetch_mediawiki(name, api, page).await?
        }
    };

    info!(
        sample = source.name(),
        bytes = payload.len(),
        "Sample {}",
        source.describe()
    );

    Ok(Sample::new(source.name(), payload))
}
