//! Run statistics
//!
//! Counters filled in by the coordinator while a run progresses, and a
//! printer for the end-of-run report.

use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStats {
    /// Listing pages that rendered (the not-found page excluded)
    pub pages_visited: usize,

    /// Provider rows seen across all listing pages
    pub rows_seen: usize,

    /// Rows dropped as promoted or unusable
    pub rows_skipped: usize,

    /// Profile links handed to the profile parser
    pub links_collected: usize,

    /// Profiles parsed successfully, duplicates included
    pub providers_parsed: usize,

    /// Profiles kept in the result set
    pub providers_accepted: usize,

    /// Profiles discarded because their name was already seen
    pub duplicates_discarded: usize,

    /// Profiles skipped because their layout did not match
    pub providers_failed: usize,

    /// Pagination ended on the not-found page rather than the page budget
    pub reached_last_page: bool,

    /// Wall time of the run
    pub elapsed: Duration,
}

impl CrawlStats {
    /// Share of collected links that produced an accepted provider, in percent
    pub fn acceptance_rate(&self) -> f64 {
        if self.links_collected == 0 {
            return 0.0;
        }
        (self.providers_accepted as f64 / self.links_collected as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Listing:");
    println!("  Pages visited: {}", stats.pages_visited);
    println!("  Provider rows: {}", stats.rows_seen);
    println!("  Rows skipped (promoted/unusable): {}", stats.rows_skipped);
    println!("  Profile links: {}", stats.links_collected);
    if stats.reached_last_page {
        println!("  Reached the last listing page");
    }
    println!();

    println!("Profiles:");
    println!("  Parsed: {}", stats.providers_parsed);
    println!("  Failed: {}", stats.providers_failed);
    println!("  Duplicates discarded: {}", stats.duplicates_discarded);
    println!("  Accepted: {}", stats.providers_accepted);
    println!();

    println!(
        "Acceptance Rate: {:.1}% ({} / {} links) in {:.1}s",
        stats.acceptance_rate(),
        stats.providers_accepted,
        stats.links_collected,
        stats.elapsed.as_secs_f64()
    );
}
