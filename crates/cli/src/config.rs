//! Three-tier configuration (spec §6): TOML file, then `DRONECMD_*`
//! environment variables, then CLI flags, each layer overriding the last.
//! Invalid values fail loudly at startup rather than silently clamping.

use std::path::{Path, PathBuf};

use dronecmd_domain::ExecutionMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_status_cache_ttl_ms")]
    pub status_cache_ttl_ms: u64,
    #[serde(default = "default_nlp_confidence_threshold")]
    pub nlp_confidence_threshold: f64,
    #[serde(default = "default_dangerous_confidence_threshold")]
    pub dangerous_confidence_threshold: f64,
    #[serde(default)]
    pub batch_default_mode: ExecutionMode,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            timeout_ms: default_timeout_ms(),
            status_cache_ttl_ms: default_status_cache_ttl_ms(),
            nlp_confidence_threshold: default_nlp_confidence_threshold(),
            dangerous_confidence_threshold: default_dangerous_confidence_threshold(),
            batch_default_mode: ExecutionMode::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_status_cache_ttl_ms() -> u64 {
    30_000
}

fn default_nlp_confidence_threshold() -> f64 {
    dronecmd_confidence_default()
}

// Mirrors `dronecmd_confidence::DEFAULT_CONFIDENCE_THRESHOLD` without a
// dependency edge from this config module onto the confidence crate just
// for one constant; kept in sync by the same spec §6 table both read from.
fn dronecmd_confidence_default() -> f64 {
    0.7
}

fn default_dangerous_confidence_threshold() -> f64 {
    0.85
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine home directory for the default config path")]
    NoHomeDir,
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid backend_url '{0}': must be an http or https URL")]
    InvalidBackendUrl(String),
    #[error("{field} must be within [0, 1], got {value}")]
    ThresholdOutOfRange { field: &'static str, value: f64 },
}

impl Config {
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".dronecmd").join("config.toml"))
    }

    /// Loads from `path`, or the default path if `path` is `None`. A
    /// missing file at either location is not an error: defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        if !resolved.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&resolved).map_err(|source| ConfigError::Io {
            path: resolved.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: resolved,
            source,
        })
    }

    /// Overlays `DRONECMD_*` environment variables (spec §6); a var that's
    /// unset or fails to parse leaves the existing value untouched.
    pub fn apply_env(mut self) -> Self {
        if let Ok(v) = std::env::var("DRONECMD_BACKEND_URL") {
            self.backend_url = v;
        }
        if let Some(v) = parse_env("DRONECMD_TIMEOUT_MS") {
            self.timeout_ms = v;
        }
        if let Some(v) = parse_env("DRONECMD_STATUS_CACHE_TTL_MS") {
            self.status_cache_ttl_ms = v;
        }
        if let Some(v) = parse_env("DRONECMD_NLP_CONFIDENCE_THRESHOLD") {
            self.nlp_confidence_threshold = v;
        }
        if let Some(v) = parse_env("DRONECMD_DANGEROUS_CONFIDENCE_THRESHOLD") {
            self.dangerous_confidence_threshold = v;
        }
        if let Ok(v) = std::env::var("DRONECMD_BATCH_DEFAULT_MODE") {
            if let Some(mode) = parse_execution_mode(&v) {
                self.batch_default_mode = mode;
            }
        }
        if let Ok(v) = std::env::var("DRONECMD_LOG_LEVEL") {
            self.log_level = v;
        }
        self
    }

    /// Fail-loud startup validation (spec §6): an invalid `backend_url`
    /// scheme or an out-of-range threshold aborts the process rather than
    /// silently clamping to something the operator didn't ask for.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scheme_ok = self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://");
        if !scheme_ok {
            return Err(ConfigError::InvalidBackendUrl(self.backend_url.clone()));
        }
        for (field, value) in [
            ("nlp_confidence_threshold", self.nlp_confidence_threshold),
            ("dangerous_confidence_threshold", self.dangerous_confidence_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

pub fn parse_execution_mode(s: &str) -> Option<ExecutionMode> {
    match s {
        "sequential" => Some(ExecutionMode::Sequential),
        "parallel" => Some(ExecutionMode::Parallel),
        "optimized" => Some(ExecutionMode::Optimized),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_table() {
        let config = Config::default();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.status_cache_ttl_ms, 30_000);
        assert_eq!(config.nlp_confidence_threshold, 0.7);
        assert_eq!(config.dangerous_confidence_threshold, 0.85);
        assert_eq!(config.batch_default_mode, ExecutionMode::Optimized);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn rejects_non_http_backend_url() {
        let mut config = Config::default();
        config.backend_url = "ftp://example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBackendUrl(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut config = Config::default();
        config.nlp_confidence_threshold = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange { .. })
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/dronecmd.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parses_toml_content() {
        let toml_str = "backend_url = \"https://drones.example.com\"\nlog_level = \"debug\"\n";
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend_url, "https://drones.example.com");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.timeout_ms, 10_000);
    }
}
