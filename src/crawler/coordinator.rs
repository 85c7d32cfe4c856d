//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives one run from start to finish:
//! - Walking the listing pages and collecting profile links
//! - Parsing every profile in order, skipping the ones that fail
//! - Deduplicating providers by name
//! - Tallying run statistics

use crate::browser::{HttpPage, Page};
use crate::config::{validate, Config};
use crate::crawler::listing::collect_provider_links;
use crate::crawler::observer::{CrawlObserver, Tally, TracingObserver};
use crate::crawler::profile::parse_provider;
use crate::output::CrawlStats;
use crate::state::{ProviderRecord, ResultSet};
use crate::Result;

/// Outcome of a finished run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Accepted providers in first-seen order
    pub providers: Vec<ProviderRecord>,

    /// What happened along the way
    pub stats: CrawlStats,
}

/// Main crawler coordinator structure
///
/// Owns the single page the whole run is driven through; nothing runs
/// concurrently.
pub struct Coordinator<P: Page> {
    config: Config,
    page: P,
    observer: Box<dyn CrawlObserver>,
}

impl<P: Page> Coordinator<P> {
    /// Creates a coordinator reporting progress through `tracing`
    pub fn new(config: Config, page: P) -> Self {
        Self {
            config,
            page,
            observer: Box::new(TracingObserver),
        }
    }

    /// Replaces the progress observer
    pub fn with_observer(mut self, observer: Box<dyn CrawlObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Runs the crawl over the first `page_count` listing pages
    ///
    /// An invalid configuration is rejected before any page is loaded.
    ///
    /// This is the core logic that:
    /// 1. Collects profile links from the listing pages
    /// 2. Parses each profile sequentially
    /// 3. Logs and skips profiles whose layout does not match
    /// 4. Keeps the first provider seen for every name
    pub async fn run(&mut self, page_count: u32) -> Result<CrawlReport> {
        validate(&self.config)?;

        tracing::info!("Starting crawl of {} listing pages", page_count);
        let start_time = std::time::Instant::now();

        let mut stats = CrawlStats::default();
        let mut results = ResultSet::new();

        {
            let mut tally = Tally {
                inner: self.observer.as_mut(),
                stats: &mut stats,
            };

            let links =
                collect_provider_links(&mut self.page, page_count, &self.config, &mut tally).await;

            let total = links.len();
            tally.on_parse_started(total);

            for (done, link) in links.iter().enumerate() {
                match parse_provider(&mut self.page, link, &self.config).await {
                    Ok(record) => {
                        let accepted = results.insert(record);
                        tally.on_provider_processed(done + 1, total, link, accepted);
                    }
                    Err(e) => tally.on_provider_failed(link, &e),
                }
            }
        }

        stats.elapsed = start_time.elapsed();
        tracing::info!(
            "Crawl completed: {} providers kept ({} duplicates, {} failed) in {:?}",
            results.len(),
            results.duplicates(),
            stats.providers_failed,
            stats.elapsed
        );

        Ok(CrawlReport {
            providers: results.into_records(),
            stats,
        })
    }
}

/// Runs a complete crawl over HTTP
///
/// # Example
///
/// ```no_run
/// use directory_scout::config::Config;
/// use directory_scout::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(Config::default(), 3).await?;
/// println!("{} providers", report.providers.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, page_count: u32) -> Result<CrawlReport> {
    let page = HttpPage::new(&config.user_agent, &config.crawler)?;
    let mut coordinator = Coordinator::new(config, page);
    coordinator.run(page_count).await
}
