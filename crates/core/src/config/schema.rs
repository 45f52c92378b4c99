//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub lorem: LoremConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    /// Local files benchmarked alongside the generated and fetched samples
    #[serde(default)]
    pub files: Vec<FileSampleConfig>,
}

/// Run-wide settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Wall-clock limit for draining all dispatched work
    #[serde(default = "default_run_timeout")]
    pub timeout_secs: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_run_timeout(),
        }
    }
}

fn default_run_timeout() -> u64 {
    300
}

/// Synthetic lorem-ipsum sample
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoremConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Number of sentences to generate
    #[serde(default = "default_sentences")]
    pub sentences: usize,

    /// Generator seed; the same seed yields the same text
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for LoremConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sentences: default_sentences(),
            seed: default_seed(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sentences() -> usize {
    10_000
}

fn default_seed() -> u64 {
    1
}

/// Remote samples fetched over HTTP
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Per-request timeout
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Attempts per remote sample before acquisition fails
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// MediaWiki API endpoint
    #[serde(default = "default_wikipedia_api")]
    pub wikipedia_api: String,

    /// Article rendered through the MediaWiki parse API; empty disables it
    #[serde(default = "default_wikipedia_page")]
    pub wikipedia_page: String,

    /// Stylesheet fetched as-is; empty disables it
    #[serde(default = "default_stylesheet_url")]
    pub stylesheet_url: String,

    /// Script fetched as-is; empty disables it
    #[serde(default = "default_script_url")]
    pub script_url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            http_timeout_secs: default_http_timeout(),
            max_attempts: default_max_attempts(),
            wikipedia_api: default_wikipedia_api(),
            wikipedia_page: default_wikipedia_page(),
            stylesheet_url: default_stylesheet_url(),
            script_url: default_script_url(),
        }
    }
}

fn default_http_timeout() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

fn default_wikipedia_api() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_wikipedia_page() -> String {
    "Marthandavarma_(novel)".to_string()
}

fn default_stylesheet_url() -> String {
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.css".to_string()
}

fn default_script_url() -> String {
    "https://cdn.jsdelivr.net/npm/jquery@3.7.1/dist/jquery.js".to_string()
}

/// A sample read from the local filesystem
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileSampleConfig {
    pub name: String,
    pub path: PathBuf,
}
