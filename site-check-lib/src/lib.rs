//! # Site Check Library
//!
//! A concurrent website availability checker: fan out one probe per URL and
//! collect a complete map of results once every probe has reported.
//!
//! The library exposes two layers. The low-level [`check_all`] family takes
//! any caller-supplied predicate and does nothing but the concurrent fan-out
//! and aggregation. The high-level [`SiteChecker`] pairs that core with a
//! real HTTP probe, timeouts, and batch/streaming/file entry points.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use site_check_lib::SiteChecker;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = SiteChecker::new()?;
//!     let urls = vec![
//!         "http://example.com".to_string(),
//!         "https://doc.rust-lang.org".to_string(),
//!     ];
//!
//!     let results = checker.check_sites(&urls).await;
//!     for (url, up) in &results {
//!         println!("{}: {}", url, if *up { "up" } else { "down" });
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//!
//! - **Complete results**: the returned map has one entry per distinct input
//!   URL, and is only handed back once every probe finished.
//! - **No shared-map races**: probes report over a channel; only the
//!   aggregator writes to the map.
//! - **No ordering**: probes run concurrently with no ordering guarantee.
//! - **No cancellation**: a hung predicate delays the whole batch. Wrap your
//!   predicate with a deadline (the built-in HTTP probe already has one).

// Re-export main public API types and functions
// This makes them available as site_check_lib::TypeName
pub use checker::SiteChecker;
pub use config::{load_env_config, ConfigManager, DefaultsConfig, FileConfig, OutputConfig};
pub use error::SiteCheckError;
pub use fanout::{check_all, check_all_bounded, try_check_all};
pub use probe::{HttpProber, ProbeReport};
pub use types::{CheckConfig, OutputMode, SiteResult};
pub use utils::{normalize_url_inputs, validate_url};

// Internal modules - these are not part of the public API
mod checker;
mod config;
mod error;
mod fanout;
mod probe;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SiteCheckError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
