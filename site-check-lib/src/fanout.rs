//! Concurrent fan-out checking primitives.
//!
//! This module implements the core coordination pattern of the library:
//! launch one task per target, evaluate a caller-supplied predicate for each,
//! and funnel every `(target, outcome)` pair through a single channel into a
//! result map owned by the aggregator.
//!
//! Tasks never touch the map directly, so no locking is needed on the result
//! structure itself. The aggregator is the sole writer.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tracing::debug;

/// Evaluate `predicate` for every target concurrently and collect the results.
///
/// One task is spawned per target (unbounded fan-out; see
/// [`check_all_bounded`] for the capped variant). Each task reports its
/// `(target, bool)` pair over an mpsc channel, and this function blocks until
/// every spawned task has reported — the returned map is always fully
/// populated, never partial.
///
/// Guarantees and caveats:
///
/// - An empty `targets` slice returns an empty map immediately; no tasks are
///   spawned.
/// - Duplicate targets collapse to a single entry (last write wins).
/// - There is no ordering among tasks, and no timeout: one hung predicate
///   call delays the whole result. Callers needing bounded latency must wrap
///   their predicate with a deadline.
/// - The predicate must be safe to evaluate concurrently; calls are not
///   serialized.
/// - If a predicate evaluation panics, the panic is confined to its task and
///   its channel sender is dropped on unwind, so `check_all` still
///   terminates. The returned map simply lacks that target's entry.
///
/// # Example
///
/// ```rust,no_run
/// use site_check_lib::check_all;
///
/// #[tokio::main]
/// async fn main() {
///     let urls = vec!["http://example.com".to_string()];
///     let results = check_all(|url| async move { url.starts_with("http") }, &urls).await;
///     assert_eq!(results["http://example.com"], true);
/// }
/// ```
pub async fn check_all<P, Fut>(predicate: P, targets: &[String]) -> HashMap<String, bool>
where
    P: Fn(String) -> Fut,
    Fut: Future<Output = bool> + Send + 'static,
{
    debug!(targets = targets.len(), "fanning out availability checks");

    let (tx, mut rx) = mpsc::unbounded_channel();

    for target in targets {
        let tx = tx.clone();
        let target = target.clone();
        let check = predicate(target.clone());

        tokio::spawn(async move {
            let ok = check.await;
            // The receiver outlives every sender; a send can only fail if the
            // aggregator was dropped, in which case nobody wants the result.
            let _ = tx.send((target, ok));
        });
    }

    // Drop the aggregator's own sender so the channel closes once every
    // spawned task has finished (or unwound).
    drop(tx);

    let mut results = HashMap::with_capacity(targets.len());
    while let Some((target, ok)) = rx.recv().await {
        results.insert(target, ok);
    }

    debug!(results = results.len(), "fan-out complete");
    results
}

/// Like [`check_all`], but with at most `limit` predicate evaluations in
/// flight at any moment.
///
/// This is the hardened variant for very large target sets, where one task
/// per target would mean unbounded resource usage. Tasks are still spawned
/// eagerly, but each waits on a semaphore permit before evaluating its
/// predicate. A `limit` of zero is treated as one.
///
/// All other guarantees match [`check_all`].
pub async fn check_all_bounded<P, Fut>(
    predicate: P,
    targets: &[String],
    limit: usize,
) -> HashMap<String, bool>
where
    P: Fn(String) -> Fut,
    Fut: Future<Output = bool> + Send + 'static,
{
    debug!(
        targets = targets.len(),
        limit, "fanning out availability checks (bounded)"
    );

    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let (tx, mut rx) = mpsc::unbounded_channel();

    for target in targets {
        let tx = tx.clone();
        let target = target.clone();
        let check = predicate(target.clone());
        let semaphore = Arc::clone(&semaphore);

        tokio::spawn(async move {
            // The semaphore is never closed, so acquisition cannot fail;
            // still, bail instead of panicking if that ever changes.
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };
            let ok = check.await;
            let _ = tx.send((target, ok));
        });
    }

    drop(tx);

    let mut results = HashMap::with_capacity(targets.len());
    while let Some((target, ok)) = rx.recv().await {
        results.insert(target, ok);
    }

    results
}

/// Fallible variant of [`check_all`]: the predicate may fail, and each
/// target maps to a tagged outcome instead of a bare boolean.
///
/// The completeness invariant is unchanged — one entry per distinct target,
/// collected before returning — but a mixed batch of successes and failures
/// is handed back to the caller to interpret, rather than collapsed into
/// `false` or aborting the whole batch.
pub async fn try_check_all<P, Fut, E>(
    predicate: P,
    targets: &[String],
) -> HashMap<String, Result<bool, E>>
where
    P: Fn(String) -> Fut,
    Fut: Future<Output = Result<bool, E>> + Send + 'static,
    E: Send + 'static,
{
    debug!(
        targets = targets.len(),
        "fanning out fallible availability checks"
    );

    let (tx, mut rx) = mpsc::unbounded_channel();

    for target in targets {
        let tx = tx.clone();
        let target = target.clone();
        let check = predicate(target.clone());

        tokio::spawn(async move {
            let outcome = check.await;
            let _ = tx.send((target, outcome));
        });
    }

    drop(tx);

    let mut results = HashMap::with_capacity(targets.len());
    while let Some((target, outcome)) = rx.recv().await {
        results.insert(target, outcome);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn looks_like_http(url: String) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }

    #[tokio::test]
    async fn test_check_all_basic() {
        let targets = vec![
            "http://a.example".to_string(),
            "ftp://b.example".to_string(),
        ];

        let results = check_all(looks_like_http, &targets).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results["http://a.example"], true);
        assert_eq!(results["ftp://b.example"], false);
    }

    #[tokio::test]
    async fn test_check_all_empty_input() {
        let results = check_all(looks_like_http, &[]).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_check_all_duplicates_collapse() {
        let targets = vec![
            "http://a.example".to_string(),
            "http://a.example".to_string(),
        ];

        let results = check_all(looks_like_http, &targets).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results["http://a.example"], true);
    }

    #[tokio::test]
    async fn test_check_all_bounded_same_results() {
        let targets: Vec<String> = (0..20).map(|i| format!("http://{}.example", i)).collect();

        let results = check_all_bounded(looks_like_http, &targets, 4).await;

        assert_eq!(results.len(), 20);
        assert!(results.values().all(|&ok| ok));
    }

    #[tokio::test]
    async fn test_try_check_all_mixed_outcomes() {
        let targets = vec!["good".to_string(), "bad".to_string()];

        let results = try_check_all(
            |t| async move {
                if t == "bad" {
                    Err("boom")
                } else {
                    Ok(true)
                }
            },
            &targets,
        )
        .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results["good"], Ok(true));
        assert!(results["bad"].is_err());
    }

    #[tokio::test]
    async fn test_check_all_panicking_predicate_still_terminates() {
        let targets = vec!["fine".to_string(), "panics".to_string()];

        let results = check_all(
            |t| async move {
                if t == "panics" {
                    panic!("predicate blew up");
                }
                true
            },
            &targets,
        )
        .await;

        // The panicking task reports nothing; the rest of the batch survives.
        assert_eq!(results.len(), 1);
        assert_eq!(results["fine"], true);
    }
}
