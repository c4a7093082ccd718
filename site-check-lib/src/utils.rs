//! Utility functions for URL input processing.
//!
//! The fan-out core treats its inputs as opaque keys, so everything here is
//! a convenience for the outer layers: scheme defaulting for bare hostnames
//! and light validation before a single detailed check.

use crate::error::SiteCheckError;

/// Validate that a URL is plausible enough to probe.
///
/// This is deliberately loose: a URL with an unknown scheme is still a valid
/// *input* (it will simply probe as unreachable), so only empty input and
/// embedded whitespace are rejected here.
pub fn validate_url(url: &str) -> Result<(), SiteCheckError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(SiteCheckError::invalid_url(url, "URL cannot be empty"));
    }

    if url.chars().any(char::is_whitespace) {
        return Err(SiteCheckError::invalid_url(
            url,
            "URL cannot contain whitespace",
        ));
    }

    Ok(())
}

/// Normalize URL inputs for checking.
///
/// - Entries are trimmed; empty entries are dropped.
/// - Entries that already carry a scheme (`://`) pass through unchanged,
///   whatever the scheme is.
/// - Bare hostnames get `default_scheme` prepended (e.g. "example.com"
///   becomes "http://example.com").
///
/// # Example
///
/// ```rust
/// use site_check_lib::normalize_url_inputs;
///
/// let input = vec!["example.com".to_string(), "https://a.example".to_string()];
/// let urls = normalize_url_inputs(&input, "http");
/// assert_eq!(urls, vec!["http://example.com", "https://a.example"]);
/// ```
pub fn normalize_url_inputs(urls: &[String], default_scheme: &str) -> Vec<String> {
    let mut results = Vec::new();

    for url in urls {
        let trimmed = url.trim();

        if trimmed.is_empty() {
            continue;
        }

        if trimmed.contains("://") {
            results.push(trimmed.to_string());
        } else {
            results.push(format!("{}://{}", default_scheme, trimmed));
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("garbage://scheme").is_ok()); // opaque input, still checkable
        assert!(validate_url("").is_err());
        assert!(validate_url("   ").is_err());
        assert!(validate_url("http://a b.example").is_err());
    }

    #[test]
    fn test_normalize_adds_default_scheme() {
        let input = vec!["example.com".to_string(), "b.example".to_string()];
        assert_eq!(
            normalize_url_inputs(&input, "http"),
            vec!["http://example.com", "http://b.example"]
        );
    }

    #[test]
    fn test_normalize_keeps_existing_schemes() {
        let input = vec![
            "https://example.com".to_string(),
            "waat://furhurterwe.geds".to_string(),
        ];
        assert_eq!(
            normalize_url_inputs(&input, "http"),
            vec!["https://example.com", "waat://furhurterwe.geds"]
        );
    }

    #[test]
    fn test_normalize_drops_empty_entries() {
        let input = vec![
            "".to_string(),
            "  ".to_string(),
            "example.com".to_string(),
        ];
        assert_eq!(
            normalize_url_inputs(&input, "https"),
            vec!["https://example.com"]
        );
    }
}
