//! Site Check CLI Application
//!
//! A command-line interface for checking website availability concurrently.
//! This CLI application provides a user-friendly interface to the
//! site-check-lib library: it resolves configuration, fans the checks out,
//! and formats the results.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use console::Term;
use futures::StreamExt;
use site_check_lib::{
    load_env_config, normalize_url_inputs, CheckConfig, ConfigManager, DefaultsConfig, OutputMode,
    SiteCheckError, SiteChecker, SiteResult,
};
use std::process;
use std::time::Duration;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for site-check
#[derive(Parser, Debug)]
#[command(name = "site-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check website availability concurrently")]
#[command(
    long_about = "Check website availability by probing every URL concurrently.\n\nEvery input gets its own probe; the run finishes once all probes have reported. Supports bounded concurrency, file input, and multiple output formats."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// URLs to check (bare hostnames get a scheme prepended)
    #[arg(value_name = "URLS", help_heading = "Site Selection")]
    pub urls: Vec<String>,

    /// Input file with URLs (one per line, '#' for comments)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "Site Selection"
    )]
    pub file: Option<String>,

    /// Scheme prepended to bare hostnames (http or https)
    #[arg(long = "scheme", value_name = "SCHEME", help_heading = "Site Selection")]
    pub scheme: Option<String>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Output results in CSV format
    #[arg(long = "csv", help_heading = "Output Format")]
    pub csv: bool,

    /// Enable colored output with header and summary
    #[arg(short = 'p', long = "pretty", help_heading = "Output Format")]
    pub pretty: bool,

    /// Collect all results before displaying
    #[arg(long = "batch", help_heading = "Output Format")]
    pub batch: bool,

    /// Show results as they complete
    #[arg(long = "streaming", help_heading = "Output Format")]
    pub streaming: bool,

    /// Max concurrent probes (default: one per URL)
    #[arg(
        short = 'c',
        long = "concurrency",
        value_name = "N",
        help_heading = "Performance"
    )]
    pub concurrency: Option<usize>,

    /// Per-probe timeout in seconds
    #[arg(long = "timeout", value_name = "SECS", help_heading = "Performance")]
    pub timeout: Option<u64>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show detailed debug information
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// Option values after merging built-ins, config file, environment, and flags.
#[derive(Debug)]
struct ResolvedOptions {
    concurrency: Option<usize>,
    timeout: Duration,
    scheme: String,
    pretty: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(&args);

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), SiteCheckError> {
    validate_args(&args)?;

    let options = resolve_options(&args)?;
    let urls = gather_urls(&args, &options.scheme)?;

    tracing::info!(
        urls = urls.len(),
        concurrency = ?options.concurrency,
        timeout_secs = options.timeout.as_secs(),
        "starting availability checks"
    );

    let mut config = CheckConfig::default().with_timeout(options.timeout);
    if let Some(limit) = options.concurrency {
        config = config.with_concurrency(limit);
    }
    let checker = SiteChecker::with_config(config)?;

    if options.pretty && !args.json && !args.csv {
        ui::print_header(urls.len(), options.concurrency);
    }

    let results = if use_streaming(&args) {
        check_streaming(&checker, &urls, &options, &args).await
    } else {
        checker.check_sites_detailed(&urls).await
    };

    render_collected(&results, &options, &args)?;
    Ok(())
}

/// Stream results to the terminal as they arrive, collecting them for the
/// final summary. Printing is skipped for json/csv runs, which render once
/// at the end.
async fn check_streaming(
    checker: &SiteChecker,
    urls: &[String],
    options: &ResolvedOptions,
    args: &Args,
) -> Vec<SiteResult> {
    let total = urls.len();
    let mut results = Vec::with_capacity(total);

    let mut stream = checker.check_sites_stream(urls);
    while let Some(result) = stream.next().await {
        if !args.json && !args.csv {
            let counter = options.pretty.then_some((results.len() + 1, total));
            ui::print_result(&result, counter);
        }
        results.push(result);
    }

    results
}

fn render_collected(
    results: &[SiteResult],
    options: &ResolvedOptions,
    args: &Args,
) -> Result<(), SiteCheckError> {
    if args.json {
        ui::print_json(results)?;
    } else if args.csv {
        ui::print_csv(results);
    } else {
        if !use_streaming(args) {
            for result in results {
                ui::print_result(result, None);
            }
        }
        if options.pretty {
            ui::print_summary(results);
        }
    }
    Ok(())
}

/// Resolve the display mode from the flags: explicit --streaming/--batch
/// win, machine formats always collect, anything else is decided by
/// terminal detection.
fn output_mode(args: &Args) -> OutputMode {
    if args.streaming {
        OutputMode::Streaming
    } else if args.batch || args.json || args.csv {
        OutputMode::Collected
    } else {
        OutputMode::Auto
    }
}

fn use_streaming(args: &Args) -> bool {
    match output_mode(args) {
        OutputMode::Streaming => true,
        OutputMode::Collected => false,
        OutputMode::Auto => Term::stdout().is_term(),
    }
}

fn validate_args(args: &Args) -> Result<(), SiteCheckError> {
    if args.urls.is_empty() && args.file.is_none() {
        return Err(SiteCheckError::config(
            "No URLs provided. Pass URLs as arguments or use --file.",
        ));
    }

    if args.json && args.csv {
        return Err(SiteCheckError::config(
            "--json and --csv are mutually exclusive.",
        ));
    }

    if args.streaming && args.batch {
        return Err(SiteCheckError::config(
            "--streaming and --batch are mutually exclusive.",
        ));
    }

    if let Some(scheme) = &args.scheme {
        if scheme != "http" && scheme != "https" {
            return Err(SiteCheckError::config(format!(
                "Unsupported scheme '{}': expected 'http' or 'https'.",
                scheme
            )));
        }
    }

    if args.concurrency == Some(0) {
        return Err(SiteCheckError::config("--concurrency must be at least 1."));
    }

    Ok(())
}

/// Merge option layers: built-in defaults < config file < environment < CLI.
fn resolve_options(args: &Args) -> Result<ResolvedOptions, SiteCheckError> {
    let manager = ConfigManager::new(args.verbose);
    let file_config = manager.discover_and_load(args.config.as_deref())?;

    let file_defaults = file_config.defaults.unwrap_or_default();
    let env_defaults = load_env_config();
    let cli_defaults = DefaultsConfig {
        concurrency: args.concurrency,
        timeout: args.timeout,
        scheme: args.scheme.clone(),
        pretty: args.pretty.then_some(true),
    };

    let merged = file_defaults.overlay(env_defaults).overlay(cli_defaults);

    Ok(ResolvedOptions {
        concurrency: merged.concurrency,
        timeout: Duration::from_secs(merged.timeout.unwrap_or(5)),
        scheme: merged.scheme.unwrap_or_else(|| "http".to_string()),
        pretty: merged.pretty.unwrap_or(false),
    })
}

/// Collect URLs from positional arguments and the optional input file,
/// then normalize them (scheme defaulting, blank filtering).
fn gather_urls(args: &Args, scheme: &str) -> Result<Vec<String>, SiteCheckError> {
    let mut inputs = args.urls.clone();

    if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SiteCheckError::file_error(path, format!("Failed to read: {}", e)))?;
        inputs.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
    }

    let urls = normalize_url_inputs(&inputs, scheme);

    if urls.is_empty() {
        return Err(SiteCheckError::config("No checkable URLs after filtering."));
    }

    Ok(urls)
}

fn init_logging(args: &Args) {
    if !args.verbose && !args.debug {
        return;
    }

    let default_filter = if args.debug {
        "site_check=debug,site_check_lib=debug"
    } else {
        "site_check=info,site_check_lib=info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            urls: vec!["http://example.com".to_string()],
            file: None,
            scheme: None,
            json: false,
            csv: false,
            pretty: false,
            batch: false,
            streaming: false,
            concurrency: None,
            timeout: None,
            config: None,
            debug: false,
            verbose: false,
        }
    }

    #[test]
    fn test_validate_rejects_empty_input() {
        let mut args = base_args();
        args.urls.clear();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_rejects_conflicting_formats() {
        let mut args = base_args();
        args.json = true;
        args.csv = true;
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let mut args = base_args();
        args.scheme = Some("gopher".to_string());
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let mut args = base_args();
        args.concurrency = Some(0);
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_gather_urls_normalizes_bare_hosts() {
        let mut args = base_args();
        args.urls = vec!["example.com".to_string()];
        let urls = gather_urls(&args, "https").unwrap();
        assert_eq!(urls, vec!["https://example.com"]);
    }

    #[test]
    fn test_streaming_disabled_for_machine_formats() {
        let mut args = base_args();
        args.json = true;
        assert!(!use_streaming(&args));

        let mut args = base_args();
        args.streaming = true;
        assert!(use_streaming(&args));
    }

    #[test]
    fn test_output_mode_resolution() {
        assert_eq!(output_mode(&base_args()), OutputMode::Auto);

        let mut args = base_args();
        args.streaming = true;
        assert_eq!(output_mode(&args), OutputMode::Streaming);

        let mut args = base_args();
        args.batch = true;
        assert_eq!(output_mode(&args), OutputMode::Collected);

        let mut args = base_args();
        args.csv = true;
        assert_eq!(output_mode(&args), OutputMode::Collected);
    }
}
