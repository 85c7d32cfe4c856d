//! Wait-for-element poller
//!
//! Dynamic pages keep filling in after navigation completes. Instead of
//! hooking into the engine's event model, the poller re-issues a query at a
//! fixed interval until it yields something or the attempt budget runs out.
//! Query errors count as "not rendered yet" and are never propagated.

use crate::browser::{BrowserResult, Element, Page};
use crate::config::CrawlerConfig;
use std::future::Future;
use std::time::Duration;

/// Attempt budget and pacing of a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Queries issued before giving up
    pub max_attempts: u32,

    /// Pause between two queries
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            interval: Duration::from_millis(100),
        }
    }
}

impl From<&CrawlerConfig> for PollSettings {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_attempts: config.poll_attempts,
            interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

/// Repeats `attempt` until it yields `Some`, at most `max_attempts` times
///
/// Errors are logged at trace level and treated like an empty answer. The
/// task sleeps `interval` between attempts, not after the last one.
pub async fn poll<T, F, Fut>(settings: &PollSettings, mut attempt: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = BrowserResult<Option<T>>>,
{
    for round in 1..=settings.max_attempts {
        match attempt().await {
            Ok(Some(found)) => return Some(found),
            Ok(None) => {}
            Err(e) => tracing::trace!("Poll attempt {} failed: {}", round, e),
        }

        if round < settings.max_attempts {
            tokio::time::sleep(settings.interval).await;
        }
    }

    None
}

/// Waits for the first element matching `selector`
///
/// Returns `None` when nothing matched within the budget; callers decide
/// what a missing element means.
pub async fn poll_single<P>(page: &P, selector: &str, settings: &PollSettings) -> Option<Element>
where
    P: Page + ?Sized,
{
    let found = poll(settings, || page.query(selector)).await;
    if found.is_none() {
        tracing::debug!(
            "'{}' did not appear after {} attempts",
            selector,
            settings.max_attempts
        );
    }
    found
}

/// Waits for at least one element matching `selector`
///
/// Returns an empty vector when nothing matched within the budget.
pub async fn poll_many<P>(page: &P, selector: &str, settings: &PollSettings) -> Vec<Element>
where
    P: Page + ?Sized,
{
    poll(settings, || async move {
        page.query_all(selector)
            .await
            .map(|found| (!found.is_empty()).then_some(found))
    })
    .await
    .unwrap_or_default()
}
