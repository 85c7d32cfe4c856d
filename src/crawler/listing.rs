//! Listing pagination and provider-row validation
//!
//! Walks listing pages `0..=page_count`, stops at the first not-found page,
//! and turns every organic provider row into an absolute profile link.

use crate::browser::{Element, Page};
use crate::config::{Config, SiteConfig};
use crate::crawler::observer::CrawlObserver;
use crate::crawler::poller::{poll_many, PollSettings};
use crate::{Result, ScoutError};
use url::Url;

/// The directory serves this page index as a copy of the next one
pub const DUPLICATE_PAGE_INDEX: u32 = 1;

/// Listing page indices visited for `page_count`, in order
///
/// # Example
///
/// ```
/// use directory_scout::crawler::listing_indices;
///
/// assert_eq!(listing_indices(3).collect::<Vec<_>>(), vec![0, 2, 3]);
/// ```
pub fn listing_indices(page_count: u32) -> impl Iterator<Item = u32> {
    (0..=page_count).filter(|index| *index != DUPLICATE_PAGE_INDEX)
}

/// URL of the listing page at `index`
pub fn listing_url(site: &SiteConfig, index: u32) -> String {
    format!(
        "{}{}?page={}",
        site.origin.trim_end_matches('/'),
        site.listing_path,
        index
    )
}

/// True when `content` is the page served past the last listing page
pub fn is_not_found(content: &str, site: &SiteConfig) -> bool {
    content.contains(&site.not_found_marker)
}

/// Returns the absolute profile link of an organic listing row
///
/// Promoted rows yield `Ok(None)`. A non-promoted row without a profile
/// anchor, or with an anchor lacking `href`, is a structural error.
pub fn validate_provider(row: &Element, config: &Config) -> Result<Option<String>> {
    if row.html().contains(&config.site.featured_marker) {
        return Ok(None);
    }

    let selector = &config.selectors.profile_link;
    let listing = format!("{}{}", config.site.origin, config.site.listing_path);

    let anchor = row
        .query(selector)?
        .ok_or_else(|| ScoutError::StructureChanged {
            url: listing.clone(),
            selector: selector.clone(),
        })?;

    let href = anchor
        .attribute("href")
        .ok_or_else(|| ScoutError::MissingAttribute {
            url: listing,
            selector: selector.clone(),
            attribute: "href".to_string(),
        })?;

    let link = Url::parse(&config.site.origin)?.join(href)?;
    Ok(Some(link.to_string()))
}

/// Gathers profile links from the first `page_count` listing pages
///
/// Index 1 is never visited. Pagination stops at the not-found page or when a
/// listing page fails to load; links gathered up to that point are returned.
/// A page whose rows never render contributes nothing.
pub async fn collect_provider_links<P>(
    page: &mut P,
    page_count: u32,
    config: &Config,
    observer: &mut dyn CrawlObserver,
) -> Vec<String>
where
    P: Page + ?Sized,
{
    let settings = PollSettings::from(&config.crawler);
    let mut links = Vec::new();

    for index in listing_indices(page_count) {
        let url = listing_url(&config.site, index);
        observer.on_page_started(index, &url);

        if let Err(e) = page.navigate(&url).await {
            tracing::error!("Stopping pagination, listing page {} failed to load: {}", index, e);
            break;
        }

        let content = match page.content().await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Stopping pagination, listing page {} has no content: {}", index, e);
                break;
            }
        };

        if is_not_found(&content, &config.site) {
            observer.on_pagination_end(index);
            break;
        }

        let rows = poll_many(&*page, &config.selectors.provider_row, &settings).await;
        observer.on_page_scanned(index, rows.len());

        for row in &rows {
            match validate_provider(row, config) {
                Ok(link) => {
                    observer.on_provider_validated(link.as_deref());
                    links.extend(link);
                }
                Err(e) => {
                    tracing::warn!("Skipping listing row on page {}: {}", index, e);
                    observer.on_provider_validated(None);
                }
            }
        }
    }

    links
}
