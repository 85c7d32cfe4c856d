//! Progress reporting hooks
//!
//! The crawl loops report what they do through a [`CrawlObserver`] instead of
//! writing to the terminal. Every method has a no-op default.

use crate::output::CrawlStats;
use crate::ScoutError;

/// Receives progress events of a crawl
pub trait CrawlObserver: Send {
    /// A listing page is about to be loaded
    fn on_page_started(&mut self, _index: u32, _url: &str) {}

    /// A listing page rendered `_rows` provider rows
    fn on_page_scanned(&mut self, _index: u32, _rows: usize) {}

    /// The listing at `_index` was the not-found page; pagination stops
    fn on_pagination_end(&mut self, _index: u32) {}

    /// A listing row was checked; `None` means it was promoted or unusable
    fn on_provider_validated(&mut self, _link: Option<&str>) {}

    /// Profile parsing is starting for `_total` links
    fn on_parse_started(&mut self, _total: usize) {}

    /// A profile was parsed; `_accepted` is false for duplicates
    fn on_provider_processed(&mut self, _done: usize, _total: usize, _link: &str, _accepted: bool) {}

    /// A profile could not be parsed and was skipped
    fn on_provider_failed(&mut self, _link: &str, _error: &ScoutError) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl CrawlObserver for SilentObserver {}

/// Observer that reports progress through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn on_page_started(&mut self, index: u32, url: &str) {
        tracing::debug!("Loading listing page {}: {}", index, url);
    }

    fn on_page_scanned(&mut self, index: u32, rows: usize) {
        tracing::info!("Listing page {}: {} provider rows", index, rows);
    }

    fn on_pagination_end(&mut self, index: u32) {
        tracing::info!("Listing page {} does not exist, pagination complete", index);
    }

    fn on_provider_validated(&mut self, link: Option<&str>) {
        match link {
            Some(link) => tracing::trace!("Accepted provider link {}", link),
            None => tracing::trace!("Skipped promoted provider row"),
        }
    }

    fn on_parse_started(&mut self, total: usize) {
        tracing::info!("Parsing {} provider profiles", total);
    }

    fn on_provider_processed(&mut self, done: usize, total: usize, link: &str, accepted: bool) {
        if accepted {
            tracing::debug!("Provider {}/{} parsed: {}", done, total, link);
        } else {
            tracing::debug!("Provider {}/{} is a duplicate: {}", done, total, link);
        }

        if done % 10 == 0 || done == total {
            tracing::info!("Progress: {}/{} provider profiles processed", done, total);
        }
    }

    fn on_provider_failed(&mut self, link: &str, error: &ScoutError) {
        tracing::warn!("Skipping provider {}: {}", link, error);
    }
}

/// Forwards events to an inner observer while counting them
pub(crate) struct Tally<'a> {
    pub inner: &'a mut dyn CrawlObserver,
    pub stats: &'a mut CrawlStats,
}

impl CrawlObserver for Tally<'_> {
    fn on_page_started(&mut self, index: u32, url: &str) {
        self.inner.on_page_started(index, url);
    }

    fn on_page_scanned(&mut self, index: u32, rows: usize) {
        self.stats.pages_visited += 1;
        self.stats.rows_seen += rows;
        self.inner.on_page_scanned(index, rows);
    }

    fn on_pagination_end(&mut self, index: u32) {
        self.stats.reached_last_page = true;
        self.inner.on_pagination_end(index);
    }

    fn on_provider_validated(&mut self, link: Option<&str>) {
        match link {
            Some(_) => self.stats.links_collected += 1,
            None => self.stats.rows_skipped += 1,
        }
        self.inner.on_provider_validated(link);
    }

    fn on_parse_started(&mut self, total: usize) {
        self.inner.on_parse_started(total);
    }

    fn on_provider_processed(&mut self, done: usize, total: usize, link: &str, accepted: bool) {
        self.stats.providers_parsed += 1;
        if accepted {
            self.stats.providers_accepted += 1;
        } else {
            self.stats.duplicates_discarded += 1;
        }
        self.inner.on_provider_processed(done, total, link, accepted);
    }

    fn on_provider_failed(&mut self, link: &str, error: &ScoutError) {
        self.stats.providers_failed += 1;
        self.inner.on_provider_failed(link, error);
    }
}
