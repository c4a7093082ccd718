//! Core data types for website availability checking.
//!
//! This module defines the main data structures used throughout the library:
//! per-site results, configuration options, and output formatting modes.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of a single website availability check.
///
/// Produced by the detailed checking APIs; the map-returning APIs collapse
/// this into a bare boolean per URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteResult {
    /// The URL that was checked (e.g., "http://example.com")
    pub url: String,

    /// Whether the site answered with a success status.
    /// - `Some(true)`: site is up
    /// - `Some(false)`: site answered with a non-success status
    /// - `None`: site could not be reached at all
    pub up: Option<bool>,

    /// HTTP status code, when a response was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// How long the probe took to complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_duration: Option<Duration>,

    /// Any error message if the probe failed outright
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Configuration options for website checking operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Maximum number of concurrent probes.
    /// `None` means one in-flight probe per input URL (unbounded fan-out),
    /// which matches the reference behavior; set a limit for very large
    /// input sets.
    pub concurrency: Option<usize>,

    /// Timeout for each individual HTTP probe
    /// Default: 5 seconds
    #[serde(skip)] // Don't serialize Duration directly
    pub timeout: Duration,
}

/// Output mode for displaying results.
///
/// This controls how and when results are presented to the user,
/// affecting both performance perception and data formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputMode {
    /// Stream results as they become available (good for interactive use)
    Streaming,

    /// Collect all results before displaying (good for formatting/sorting)
    Collected,

    /// Automatically choose based on context (terminal vs pipe, etc.)
    Auto,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            concurrency: None,
            timeout: Duration::from_secs(5),
        }
    }
}

impl CheckConfig {
    /// Cap the number of concurrent probes.
    ///
    /// Clamps to at least 1; capping at zero would deadlock the batch.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency.max(1));
        self
    }

    /// Remove any concurrency cap (one probe in flight per input URL).
    pub fn with_unbounded_concurrency(mut self) -> Self {
        self.concurrency = None;
        self
    }

    /// Set the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Streaming => write!(f, "Streaming"),
            OutputMode::Collected => write!(f, "Collected"),
            OutputMode::Auto => write!(f, "Auto"),
        }
    }
}
