//! Provider profile extraction
//!
//! Every field is read through the poller because profile pages keep
//! rendering after navigation. An element that never shows up means the page
//! layout no longer matches the configured selectors; it fails the provider
//! with a descriptive error instead of producing a half-empty record.

use crate::browser::{Element, Page};
use crate::config::Config;
use crate::crawler::poller::{poll_single, PollSettings};
use crate::state::ProviderRecord;
use crate::{Result, ScoutError};

/// Title suffix following the company name
const TITLE_SUFFIX: &str = " Reviews";

/// Query parameter of the website redirect holding the real destination
const WEBSITE_PARAM: &str = "provider_website=";

/// Visits `link` and extracts the provider's record
pub async fn parse_provider<P>(page: &mut P, link: &str, config: &Config) -> Result<ProviderRecord>
where
    P: Page + ?Sized,
{
    page.navigate(link).await?;

    let page = &*page;
    let settings = PollSettings::from(&config.crawler);
    let selectors = &config.selectors;

    let website_el = require(page, link, &selectors.website_link, &settings).await?;
    let title_el = require(page, link, &selectors.title, &settings).await?;
    let hour_rate_el = require(page, link, &selectors.hour_rate, &settings).await?;
    let min_project_size_el = require(page, link, &selectors.min_project_size, &settings).await?;
    let cost_rating_el = require(page, link, &selectors.cost_rating, &settings).await?;
    let reviews_el = require(page, link, &selectors.review_count, &settings).await?;

    let data_link = website_el
        .attribute("data-link")
        .ok_or_else(|| ScoutError::MissingAttribute {
            url: link.to_string(),
            selector: selectors.website_link.clone(),
            attribute: "data-link".to_string(),
        })?;

    let website = decode_website(data_link).ok_or_else(|| ScoutError::MalformedField {
        url: link.to_string(),
        field: "website",
        value: data_link.to_string(),
    })?;

    let cities = extract_cities(page, config)
        .await
        .ok_or_else(|| ScoutError::StructureChanged {
            url: link.to_string(),
            selector: selectors.locations.clone(),
        })?;

    Ok(ProviderRecord {
        name: provider_name(title_el.text()),
        website,
        cities,
        hour_rate: strip_spaces(hour_rate_el.text_all()),
        min_project_size: collapse_whitespace(min_project_size_el.text_all()),
        rating_for_cost: strip_whitespace(cost_rating_el.text_all()),
        number_of_reviews: digits_only(reviews_el.text_all()),
    })
}

/// Waits for `selector` and turns absence into a structural error
async fn require<P>(page: &P, url: &str, selector: &str, settings: &PollSettings) -> Result<Element>
where
    P: Page + ?Sized,
{
    poll_single(page, selector, settings)
        .await
        .ok_or_else(|| ScoutError::StructureChanged {
            url: url.to_string(),
            selector: selector.to_string(),
        })
}

/// Office cities in the configured country, in profile order
///
/// Returns `None` when the locations list never renders. Duplicates are kept.
pub async fn extract_cities<P>(page: &P, config: &Config) -> Option<Vec<String>>
where
    P: Page + ?Sized,
{
    let settings = PollSettings::from(&config.crawler);
    let container = poll_single(page, &config.selectors.locations, &settings).await?;

    let items = container.children();
    let texts = items
        .iter()
        .filter(|item| item.tag() == "li")
        .map(Element::text_all);

    Some(cities_from_locations(texts, &config.site.country))
}

/// Keeps locations mentioning `country` and returns their city part
///
/// ```
/// use directory_scout::crawler::cities_from_locations;
///
/// let cities = cities_from_locations(["Kyiv, Ukraine", "Warsaw, Poland", "Lviv, Ukraine"], "Ukraine");
/// assert_eq!(cities, vec!["Kyiv", "Lviv"]);
/// ```
pub fn cities_from_locations<'a, I>(locations: I, country: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    locations
        .into_iter()
        .filter(|location| location.contains(country))
        .map(city_of)
        .collect()
}

/// Text before the first comma, trimmed
fn city_of(location: &str) -> String {
    location
        .split(',')
        .next()
        .unwrap_or(location)
        .trim()
        .to_string()
}

/// Company name from a profile title such as `Acme Reviews | Clutch.co`
pub fn provider_name(title: &str) -> String {
    let name = match title.find(TITLE_SUFFIX) {
        Some(end) => &title[..end],
        None => title,
    };
    name.trim().to_string()
}

/// Real destination hidden in the website button's redirect link
///
/// ```
/// use directory_scout::crawler::decode_website;
///
/// let link = "https://clutch.co/redirect?provider_website=https://example.com&utm=1";
/// assert_eq!(decode_website(link).as_deref(), Some("https://example.com"));
/// ```
pub fn decode_website(data_link: &str) -> Option<String> {
    let (_, rest) = data_link.split_once(WEBSITE_PARAM)?;
    let value = rest.split('&').next().unwrap_or(rest);
    (!value.is_empty()).then(|| value.to_string())
}

/// Removes every space character
pub fn strip_spaces(text: &str) -> String {
    text.replace(' ', "").trim().to_string()
}

/// Removes every whitespace character, line breaks included
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Collapses whitespace runs into single spaces and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keeps only ASCII digits; empty when there are none
pub fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}
