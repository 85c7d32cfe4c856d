//! Crawler module for listing and profile processing
//!
//! This module contains the core crawling logic, including:
//! - The wait-for-element poller
//! - Listing pagination and promoted-row filtering
//! - Profile field extraction
//! - Overall crawl coordination and progress reporting

mod coordinator;
mod listing;
mod observer;
mod poller;
mod profile;

pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use listing::{
    collect_provider_links, is_not_found, listing_indices, listing_url, validate_provider,
    DUPLICATE_PAGE_INDEX,
};
pub use observer::{CrawlObserver, SilentObserver, TracingObserver};
pub use poller::{poll, poll_many, poll_single, PollSettings};
pub use profile::{
    cities_from_locations, collapse_whitespace, decode_website, digits_only, extract_cities,
    parse_provider, provider_name, strip_spaces, strip_whitespace,
};
