//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and from the
//! environment, and merging the layers with proper precedence rules
//! (CLI flags > environment > config file > built-in defaults — the merge
//! itself happens in the caller via [`DefaultsConfig::overlay`]).

use crate::error::SiteCheckError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration loaded from TOML files.
///
/// This represents the structure of configuration files that users can
/// create to set default values for site-check runs:
///
/// ```toml
/// [defaults]
/// concurrency = 20
/// timeout = 10
/// scheme = "https"
///
/// [output]
/// json_pretty = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Output formatting preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DefaultsConfig {
    /// Cap on concurrent probes; unset means unbounded fan-out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Per-probe timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Scheme prepended to bare hostnames ("http" or "https")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    /// Default pretty output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Default output format ("text", "json", "csv")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Pretty-print JSON by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_pretty: Option<bool>,
}

impl DefaultsConfig {
    /// Merge another layer on top of this one: values set in `over` win.
    pub fn overlay(self, over: DefaultsConfig) -> DefaultsConfig {
        DefaultsConfig {
            concurrency: over.concurrency.or(self.concurrency),
            timeout: over.timeout.or(self.timeout),
            scheme: over.scheme.or(self.scheme),
            pretty: over.pretty.or(self.pretty),
        }
    }
}

/// Read configuration defaults from `SITE_CHECK_*` environment variables.
///
/// Recognized variables: `SITE_CHECK_CONCURRENCY`, `SITE_CHECK_TIMEOUT`
/// (seconds), `SITE_CHECK_SCHEME`, `SITE_CHECK_PRETTY` ("true"/"false").
/// Unparseable values are warned about and ignored.
pub fn load_env_config() -> DefaultsConfig {
    let mut config = DefaultsConfig::default();

    if let Ok(raw) = env::var("SITE_CHECK_CONCURRENCY") {
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => config.concurrency = Some(n),
            _ => warn!(value = %raw, "ignoring invalid SITE_CHECK_CONCURRENCY"),
        }
    }

    if let Ok(raw) = env::var("SITE_CHECK_TIMEOUT") {
        match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => config.timeout = Some(secs),
            _ => warn!(value = %raw, "ignoring invalid SITE_CHECK_TIMEOUT"),
        }
    }

    if let Ok(scheme) = env::var("SITE_CHECK_SCHEME") {
        if scheme == "http" || scheme == "https" {
            config.scheme = Some(scheme);
        } else {
            warn!(value = %scheme, "ignoring invalid SITE_CHECK_SCHEME");
        }
    }

    if let Ok(raw) = env::var("SITE_CHECK_PRETTY") {
        match raw.parse::<bool>() {
            Ok(pretty) => config.pretty = Some(pretty),
            Err(_) => warn!(value = %raw, "ignoring invalid SITE_CHECK_PRETTY"),
        }
    }

    config
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `SiteCheckError` if the file is missing, unreadable, or not
    /// valid TOML.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, SiteCheckError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SiteCheckError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SiteCheckError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            SiteCheckError::config(format!(
                "Invalid configuration in '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(config)
    }

    /// Load configuration, either from an explicit path or by discovery.
    ///
    /// An explicit path that fails to load is a hard error. Discovery walks
    /// the candidate locations in order and takes the first file that
    /// exists; a discovered file that fails to parse is skipped (with a
    /// warning when verbose) rather than aborting the run.
    pub fn discover_and_load(
        &self,
        explicit_path: Option<&str>,
    ) -> Result<FileConfig, SiteCheckError> {
        if let Some(path) = explicit_path {
            return self.load_file(path);
        }

        for candidate in discovery_paths() {
            if !candidate.exists() {
                continue;
            }
            match self.load_file(&candidate) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    if self.verbose {
                        warn!(path = %candidate.display(), error = %e, "skipping unreadable config file");
                    }
                }
            }
        }

        Ok(FileConfig::default())
    }
}

/// Candidate config file locations, highest precedence first.
fn discovery_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("site-check.toml"),
        PathBuf::from(".site-check.toml"),
    ];

    if let Some(config_dir) = user_config_dir() {
        paths.push(config_dir.join("site-check").join("config.toml"));
    }

    paths
}

fn user_config_dir() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg));
        }
    }
    env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_file_parses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]").unwrap();
        writeln!(file, "concurrency = 8").unwrap();
        writeln!(file, "timeout = 3").unwrap();
        writeln!(file, "scheme = \"https\"").unwrap();

        let manager = ConfigManager::new(false);
        let config = manager.load_file(file.path()).unwrap();

        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.concurrency, Some(8));
        assert_eq!(defaults.timeout, Some(3));
        assert_eq!(defaults.scheme, Some("https".to_string()));
        assert_eq!(defaults.pretty, None);
    }

    #[test]
    fn test_load_file_missing_is_an_error() {
        let manager = ConfigManager::new(false);
        let err = manager.load_file("/nonexistent/site-check.toml").unwrap_err();
        assert!(matches!(err, SiteCheckError::FileError { .. }));
    }

    #[test]
    fn test_load_file_invalid_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml [[").unwrap();

        let manager = ConfigManager::new(false);
        let err = manager.load_file(file.path()).unwrap_err();
        assert!(matches!(err, SiteCheckError::ConfigError { .. }));
    }

    #[test]
    fn test_overlay_precedence() {
        let base = DefaultsConfig {
            concurrency: Some(10),
            timeout: Some(5),
            scheme: Some("http".to_string()),
            pretty: Some(false),
        };
        let over = DefaultsConfig {
            concurrency: Some(50),
            timeout: None,
            scheme: None,
            pretty: Some(true),
        };

        let merged = base.overlay(over);
        assert_eq!(merged.concurrency, Some(50));
        assert_eq!(merged.timeout, Some(5));
        assert_eq!(merged.scheme, Some("http".to_string()));
        assert_eq!(merged.pretty, Some(true));
    }
}
