//! HTTP fetching of remote samples

use crate::error::{SampleError, SampleResult};
use bytes::Bytes;
use codecbench_core::retry::{retry_async, RetryConfig};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument};

/// HTTP client wrapper with per-request timeout and retry
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    retry: RetryConfig,
}

impl Fetcher {
    /// Create a fetcher
    pub fn new(timeout: Duration, retry: RetryConfig) -> SampleResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("codec-bench/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, retry })
    }

    /// GET a URL and return the body as-is
    #[instrument(skip(self))]
    pub async fn fetch_raw(&self, name: &str, url: &str) -> SampleResult<Bytes> {
        self.with_retry(name, || async move {
            let response = self.client.get(url).send().await?;
            let response = check_status(url, response)?;
            Ok(response.bytes().await?)
        })
        .await
    }

    /// Fetch the rendered HTML of a wiki page through the MediaWiki parse API
    #[instrument(skip(self))]
    pub async fn fetch_mediawiki(&self, name: &str, api: &str, page: &str) -> SampleResult<Bytes> {
        let body = self
            .with_retry(name, || async move {
                let response = self
                    .client
                    .get(api)
                    .query(&[
                        ("action", "parse"),
                        ("page", page),
                        ("prop", "text"),
                        ("format", "json"),
                        ("formatversion", "1"),
                    ])
                    .send()
                    .await?;
                let response = check_status(api, response)?;
                Ok(response.bytes().await?)
            })
            .await?;

        extract_mediawiki_text(api, page, &body)
    }

    async fn with_retry<F, Fut>(&self, name: &str, operation: F) -> SampleResult<Bytes>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = SampleResult<Bytes>>,
    {
        match retry_async(&self.retry, SampleError::is_retryable, operation).await {
            Ok(result) => {
                debug!(
                    sample = name,
                    attempts = result.attempts,
                    elapsed_ms = result.total_duration.as_millis(),
                    bytes = result.value.len(),
                    "Fetched"
                );
                Ok(result.value)
            }
            Err(failure) if failure.attempts > 1 => Err(SampleError::RetriesExhausted {
                name: name.to_string(),
                attempts: failure.attempts,
                last_error: failure.error.to_string(),
            }),
            Err(failure) => Err(failure.error),
        }
    }
}

fn check_status(url: &str, response: Response) -> SampleResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SampleError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

/// Pull `parse.text["*"]` out of a MediaWiki parse response.
pub fn extract_mediawiki_text(api: &str, page: &str, body: &[u8]) -> SampleResult<Bytes> {
    let value: serde_json::Value = serde_json::from_slice(body)?;

    if let Some(error) = value.get("error") {
        let info = error
            .get("info")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(SampleError::MediaWiki {
            page: page.to_string(),
            info,
        });
    }

    value
        .pointer("/parse/text/*")
        .and_then(serde_json::Value::as_str)
        .map(|html| Bytes::copy_from_slice(html.as_bytes()))
        .ok_or_else(|| SampleError::MissingField {
            url: api.to_string(),
            field: "/parse/text/*",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const API: &str = "https://en.wikipedia.org/w/api.php";

    #[test]
    fn test_extract_mediawiki_text() {
        let body = br#"{"parse":{"title":"Example","pageid":1,"text":{"*":"<p>Hello</p>"}}}"#;
        let text = extract_mediawiki_text(API, "Example", body).unwrap();
        assert_eq!(text, Bytes::from_static(b"<p>Hello</p>"));
    }

    #[test]
    fn test_extract_mediawiki_error() {
        let body = br#"{"error":{"code":"missingtitle","info":"The page doesn't exist."}}"#;
        let err = extract_mediawiki_text(API, "Nope", body).unwrap_err();
        assert!(matches!(err, SampleError::MediaWiki { ref page, .. } if page == "Nope"));
    }

    #[test]
    fn test_extract_mediawiki_missing_field() {
        let err = extract_mediawiki_text(API, "Example", br#"{"parse":{}}"#).unwrap_err();
        assert!(matches!(err, SampleError::MissingField { .. }));
    }

    #[test]
    fn test_extract_mediawiki_not_json() {
        let err = extract_mediawiki_text(API, "Example", b"<html>").unwrap_err();
        assert!(matches!(err, SampleError::Json(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_fails() {
        let fetcher = Fetcher::new(Duration::from_secs(2), RetryConfig::no_retry()).unwrap();
        // Port 9 (discard) is essentially never listening on loopback
        let result = fetcher.fetch_raw("nothing", "http://127.0.0.1:9/").await;
        assert!(result.is_err());
    }
}
