//! Display logic for the site-check CLI.
//!
//! Handles colored result lines, the pretty-mode header and summary, and the
//! machine-readable JSON/CSV formats. Uses only the `console` crate for
//! terminal styling.

use console::{pad_str, style, Alignment};
use site_check_lib::{SiteCheckError, SiteResult};

const URL_COLUMN_WIDTH: usize = 40;

/// Print a styled header at the start of a pretty run.
pub fn print_header(url_count: usize, concurrency: Option<usize>) {
    println!(
        "{} {} {}",
        style("site-check").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "— Checking {} site{}",
            url_count,
            if url_count == 1 { "" } else { "s" }
        ))
        .dim(),
    );

    let concurrency_label = match concurrency {
        Some(limit) => format!("Concurrency: {}", limit),
        None => "Concurrency: unbounded".to_string(),
    };
    println!("{}", style(concurrency_label).dim());
    println!();
}

/// Format and print a single site result with colors and alignment.
///
/// If `counter` is Some((current, total)), a progress prefix like `[3/8]`
/// is shown.
pub fn print_result(result: &SiteResult, counter: Option<(usize, usize)>) {
    let padded_url = pad_str(&result.url, URL_COLUMN_WIDTH, Alignment::Left, Some(".."));

    let prefix = match counter {
        Some((current, total)) => format!("{} ", style(format!("[{}/{}]", current, total)).dim()),
        None => String::new(),
    };

    let verdict = match result.up {
        Some(true) => style("UP").green().bold(),
        Some(false) => style("DOWN").red().bold(),
        None => style("UNREACHABLE").yellow().bold(),
    };

    let mut details: Vec<String> = Vec::new();
    if let Some(status) = result.status {
        details.push(format!("HTTP {}", status));
    }
    if let Some(duration) = result.check_duration {
        details.push(format!("{}ms", duration.as_millis()));
    }
    if let Some(error) = &result.error_message {
        details.push(error.clone());
    }

    println!(
        "{}{} {} {}",
        prefix,
        padded_url,
        verdict,
        style(details.join(" · ")).dim()
    );
}

/// Print the up/down/unreachable tally after a pretty run.
pub fn print_summary(results: &[SiteResult]) {
    let up = results.iter().filter(|r| r.up == Some(true)).count();
    let down = results.iter().filter(|r| r.up == Some(false)).count();
    let unreachable = results.iter().filter(|r| r.up.is_none()).count();

    println!();
    println!(
        "{} {} up, {} down, {} unreachable",
        style("Summary:").bold(),
        style(up).green(),
        style(down).red(),
        style(unreachable).yellow(),
    );
}

/// Print all results as a pretty-printed JSON array.
pub fn print_json(results: &[SiteResult]) -> Result<(), SiteCheckError> {
    let json = serde_json::to_string_pretty(results)
        .map_err(|e| SiteCheckError::internal(format!("JSON encoding failed: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Print all results as CSV with a header row.
pub fn print_csv(results: &[SiteResult]) {
    println!("url,up,status,duration_ms,error");

    for result in results {
        let up = match result.up {
            Some(true) => "true",
            Some(false) => "false",
            None => "",
        };
        let status = result
            .status
            .map(|s| s.to_string())
            .unwrap_or_default();
        let duration = result
            .check_duration
            .map(|d| d.as_millis().to_string())
            .unwrap_or_default();
        let error = result
            .error_message
            .as_deref()
            .map(csv_escape)
            .unwrap_or_default();

        println!(
            "{},{},{},{},{}",
            csv_escape(&result.url),
            up,
            status,
            duration,
            error
        );
    }
}

/// Quote a CSV field if it contains a delimiter, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
