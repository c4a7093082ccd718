//! Main site checker implementation.
//!
//! This module provides the primary `SiteChecker` struct that pairs the
//! fan-out coordination core with the HTTP probe, offering map-style,
//! detailed, streaming, and file-driven batch checking.

use crate::error::SiteCheckError;
use crate::fanout;
use crate::probe::HttpProber;
use crate::types::{CheckConfig, SiteResult};
use crate::utils::validate_url;
use futures::stream::{Stream, StreamExt};
use std::collections::HashMap;
use std::pin::Pin;

/// Main website checker that coordinates availability checking operations.
///
/// The `SiteChecker` handles:
/// - Concurrent fan-out across all input URLs
/// - HTTP probing with per-probe timeouts
/// - Optional concurrency capping
/// - Result collection and formatting
///
/// # Example
///
/// ```rust,no_run
/// use site_check_lib::SiteChecker;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = SiteChecker::new()?;
///     let urls = vec!["http://example.com".to_string()];
///     let results = checker.check_sites(&urls).await;
///     println!("up: {:?}", results["http://example.com"]);
///     Ok(())
/// }
/// ```
pub struct SiteChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// HTTP prober supplying the availability predicate
    prober: HttpProber,
}

impl SiteChecker {
    /// Create a new site checker with default configuration.
    ///
    /// Default settings:
    /// - Concurrency: unbounded (one probe in flight per input URL)
    /// - Timeout: 5 seconds per probe
    pub fn new() -> Result<Self, SiteCheckError> {
        Self::with_config(CheckConfig::default())
    }

    /// Create a new site checker with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use site_check_lib::{SiteChecker, CheckConfig};
    /// use std::time::Duration;
    ///
    /// let config = CheckConfig::default()
    ///     .with_concurrency(20)
    ///     .with_timeout(Duration::from_secs(10));
    ///
    /// let checker = SiteChecker::with_config(config).unwrap();
    /// ```
    pub fn with_config(config: CheckConfig) -> Result<Self, SiteCheckError> {
        let prober = HttpProber::with_timeout(config.timeout)?;
        Ok(Self { config, prober })
    }

    /// Check availability of every URL concurrently, returning a complete
    /// map from URL to up/down.
    ///
    /// This is the core operation of the library: every URL gets its own
    /// concurrent probe, and the map is returned only once every probe has
    /// reported. URLs are treated as opaque keys — a nonsense scheme is not
    /// rejected, it just probes as down.
    ///
    /// When `config.concurrency` is set, at most that many probes run at
    /// once; otherwise fan-out is unbounded (the reference behavior).
    pub async fn check_sites(&self, urls: &[String]) -> HashMap<String, bool> {
        let prober = self.prober.clone();
        let predicate = move |url: String| {
            let prober = prober.clone();
            async move { prober.is_up(&url).await }
        };

        match self.config.concurrency {
            Some(limit) => fanout::check_all_bounded(predicate, urls, limit).await,
            None => fanout::check_all(predicate, urls).await,
        }
    }

    /// Check availability of a single URL with full probe details.
    ///
    /// # Errors
    ///
    /// Returns `SiteCheckError` only for malformed URLs. Probe failures
    /// (unreachable host, timeout) are reported inside the `SiteResult`
    /// with `up: None` and an error message, so batch callers can degrade
    /// per-entry instead of aborting.
    pub async fn check_site(&self, url: &str) -> Result<SiteResult, SiteCheckError> {
        validate_url(url)?;
        Ok(self.probe_site(url.to_string()).await)
    }

    /// Check every URL concurrently and collect detailed results.
    ///
    /// Results arrive in completion order, not input order. The vector
    /// always has exactly one entry per input URL, duplicates included.
    pub async fn check_sites_detailed(&self, urls: &[String]) -> Vec<SiteResult> {
        let limit = self.config.concurrency.unwrap_or_else(|| urls.len().max(1));

        futures::stream::iter(urls.iter().cloned())
            .map(|url| self.probe_site(url))
            .buffer_unordered(limit)
            .collect()
            .await
    }

    /// Check URLs and yield detailed results as a stream.
    ///
    /// Results are yielded as each probe completes, which is useful for
    /// real-time display when probing large URL sets.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use site_check_lib::SiteChecker;
    /// use futures::StreamExt;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let checker = SiteChecker::new()?;
    ///     let urls = vec!["http://example.com".to_string()];
    ///
    ///     let mut stream = checker.check_sites_stream(&urls);
    ///     while let Some(result) = stream.next().await {
    ///         println!("{}: {:?}", result.url, result.up);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn check_sites_stream(
        &self,
        urls: &[String],
    ) -> Pin<Box<dyn Stream<Item = SiteResult> + Send + '_>> {
        let limit = self.config.concurrency.unwrap_or_else(|| urls.len().max(1));

        let stream = futures::stream::iter(urls.to_vec())
            .map(move |url| self.probe_site(url))
            .buffer_unordered(limit);

        Box::pin(stream)
    }

    /// Read URLs from a file and check their availability.
    ///
    /// The file should contain one URL per line. Empty lines and lines
    /// starting with '#' are ignored as comments.
    ///
    /// # Errors
    ///
    /// Returns `SiteCheckError` if the file cannot be read or contains no
    /// URLs at all.
    pub async fn check_sites_from_file(
        &self,
        file_path: &str,
    ) -> Result<Vec<SiteResult>, SiteCheckError> {
        let urls = read_url_file(file_path).await?;
        Ok(self.check_sites_detailed(&urls).await)
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Update the configuration for this checker.
    ///
    /// Recreates the internal prober so a new timeout takes effect.
    pub fn set_config(&mut self, config: CheckConfig) -> Result<(), SiteCheckError> {
        self.prober = HttpProber::with_timeout(config.timeout)?;
        self.config = config;
        Ok(())
    }

    /// Run one probe and fold the outcome into a `SiteResult`.
    async fn probe_site(&self, url: String) -> SiteResult {
        match self.prober.probe(&url).await {
            Ok(report) => SiteResult {
                url,
                up: Some(report.up),
                status: Some(report.status),
                check_duration: Some(report.duration),
                error_message: None,
            },
            Err(e) => SiteResult {
                url,
                up: None,
                status: None,
                check_duration: None,
                error_message: Some(e.to_string()),
            },
        }
    }
}

/// Parse a URL list file: one URL per line, '#' comments and blanks skipped.
async fn read_url_file(file_path: &str) -> Result<Vec<String>, SiteCheckError> {
    let content = tokio::fs::read_to_string(file_path)
        .await
        .map_err(|e| SiteCheckError::file_error(file_path, format!("Failed to read: {}", e)))?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        return Err(SiteCheckError::file_error(
            file_path,
            "No URLs found in file",
        ));
    }

    Ok(urls)
}
