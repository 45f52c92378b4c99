//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Environment variable overriding `run.timeout_secs`
pub const ENV_TIMEOUT_SECS: &str = "CODEC_BENCH_TIMEOUT_SECS";

/// Environment variable overriding `remote.http_timeout_secs`
pub const ENV_HTTP_TIMEOUT_SECS: &str = "CODEC_BENCH_HTTP_TIMEOUT_SECS";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path, a standard location, or defaults.
    ///
    /// An explicit path must exist. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let mut schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        apply_env_overrides(&mut schema, |key| std::env::var(key).ok())?;
        validate(&schema)?;

        tracing::debug!(path = ?config_path, "Configuration loaded");

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file, no environment)
    pub fn defaults() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        "codec-bench.toml",
        ".codec-bench.toml",
        ".config/codec-bench.toml",
    ];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    let schema: ConfigSchema = toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))?;

    Ok(schema)
}

fn apply_env_overrides(
    schema: &mut ConfigSchema,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
        schema.run.timeout_secs = parse_secs(ENV_TIMEOUT_SECS, &value)?;
    }
    if let Some(value) = lookup(ENV_HTTP_TIMEOUT_SECS) {
        schema.remote.http_timeout_secs = parse_secs(ENV_HTTP_TIMEOUT_SECS, &value)?;
    }
    Ok(())
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        Error::config_invalid(format!("{key} must be a whole number of seconds, got {value:?}"))
    })
}

fn validate(schema: &ConfigSchema) -> Result<()> {
    if schema.run.timeout_secs == 0 {
        return Err(Error::config_invalid("run.timeout_secs cannot be zero"));
    }
    if schema.remote.http_timeout_secs == 0 {
        return Err(Error::config_invalid("remote.http_timeout_secs cannot be zero"));
    }
    if schema.remote.max_attempts == 0 {
        return Err(Error::config_invalid("remote.max_attempts cannot be zero"));
    }

    let mut names = HashSet::new();
    for file in &schema.files {
        if file.name.trim().is_empty() {
            return Err(Error::config_invalid("files[].name cannot be empty"));
        }
        if !names.insert(file.name.as_str()) {
            return Err(Error::config_invalid(format!(
                "duplicate file sample name {:?}",
                file.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert!(config.path.is_none());
        assert_eq!(config.schema.run.timeout_secs, 300);
        assert_eq!(config.schema.lorem.sentences, 10_000);
        assert_eq!(config.schema.remote.wikipedia_page, "Marthandavarma_(novel)");
    }

    #[test]
    fn test_config_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[run]
timeout_secs = 12

[lorem]
sentences = 50

[remote]
enabled = false

[[files]]
name = "notes"
path = "notes.txt"
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.schema.run.timeout_secs, 12);
        assert_eq!(config.schema.lorem.sentences, 50);
        assert!(config.schema.lorem.enabled);
        assert!(!config.schema.remote.enabled);
        assert_eq!(config.schema.files.len(), 1);
        assert_eq!(config.schema.files[0].name, "notes");
    }

    #[test]
    fn test_config_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[run\ntimeout_secs = ").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.is_some());
    }

    #[test]
    fn test_env_overrides() {
        let mut schema = ConfigSchema::default();
        apply_env_overrides(&mut schema, |key| match key {
            ENV_TIMEOUT_SECS => Some("42".to_string()),
            ENV_HTTP_TIMEOUT_SECS => Some(" 7 ".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(schema.run.timeout_secs, 42);
        assert_eq!(schema.remote.http_timeout_secs, 7);
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut schema = ConfigSchema::default();
        let err = apply_env_overrides(&mut schema, |key| {
            (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string())
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
    }

    #[test]
    fn test_validation_rejects_duplicate_file_names() {
        let mut schema = ConfigSchema::default();
        for _ in 0..2 {
            schema.files.push(crate::config::FileSampleConfig {
                name: "same".to_string(),
                path: PathBuf::from("a.txt"),
            });
        }
        assert!(validate(&schema).is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut schema = ConfigSchema::default();
        schema.run.timeout_secs = 0;
        assert!(validate(&schema).is_err());
    }
}
