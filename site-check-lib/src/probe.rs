//! HTTP availability probe.
//!
//! This module supplies the predicate side of the fan-out checker: an HTTP
//! client that answers "is this URL up?" A site counts as up when it answers
//! with a success status (2xx) within the configured timeout.

use crate::error::SiteCheckError;
use std::time::{Duration, Instant};
use tracing::debug;

/// Outcome of a single HTTP probe that received a response.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// HTTP status code returned by the server
    pub status: u16,
    /// Whether the status counts as "up" (2xx)
    pub up: bool,
    /// Wall-clock duration of the probe
    pub duration: Duration,
}

/// HTTP prober for checking website availability.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection
/// pool across clones, which matters when one prober backs hundreds of
/// concurrent probes.
#[derive(Clone)]
pub struct HttpProber {
    /// HTTP client for making probe requests
    http_client: reqwest::Client,
    /// Timeout for each probe
    timeout: Duration,
}

impl HttpProber {
    /// Create a new prober with the default 5 second timeout.
    pub fn new() -> Result<Self, SiteCheckError> {
        Self::with_timeout(Duration::from_secs(5))
    }

    /// Create a new prober with a custom per-probe timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, SiteCheckError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout + Duration::from_secs(2)) // Add buffer for HTTP timeout
            .build()
            .map_err(|e| {
                SiteCheckError::network_with_source(
                    "Failed to create probe HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            timeout,
        })
    }

    /// Probe a URL and report what came back.
    ///
    /// # Errors
    ///
    /// Returns `SiteCheckError` if:
    /// - The URL is malformed
    /// - The request cannot be sent (DNS, connection refused, TLS)
    /// - The probe exceeds the configured timeout
    ///
    /// A response with a non-success status is *not* an error: it produces
    /// an `Ok(ProbeReport)` with `up: false`.
    pub async fn probe(&self, url: &str) -> Result<ProbeReport, SiteCheckError> {
        let start_time = Instant::now();

        let result = tokio::time::timeout(self.timeout, self.http_client.get(url).send()).await;

        let duration = start_time.elapsed();

        match result {
            Ok(Ok(response)) => {
                let status = response.status();
                Ok(ProbeReport {
                    status: status.as_u16(),
                    up: status.is_success(),
                    duration,
                })
            }
            Ok(Err(e)) => Err(SiteCheckError::from(e)),
            Err(_) => Err(SiteCheckError::timeout(
                format!("probe of {}", url),
                self.timeout,
            )),
        }
    }

    /// Infallible availability predicate: any failure counts as down.
    ///
    /// This is the shape the fan-out checker wants. Unreachable hosts,
    /// malformed URLs, timeouts, and non-2xx responses all collapse to
    /// `false`.
    pub async fn is_up(&self, url: &str) -> bool {
        match self.probe(url).await {
            Ok(report) => report.up,
            Err(e) => {
                debug!(url, error = %e, "probe failed, counting as down");
                false
            }
        }
    }

    /// The configured per-probe timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
