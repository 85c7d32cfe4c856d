use serde::Deserialize;

/// Main configuration structure for Directory Scout
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the clutch.co defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// The directory being harvested
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host that relative profile links are joined onto
    pub origin: String,

    /// Path of the paginated listing, without the `page` query
    #[serde(rename = "listing-path")]
    pub listing_path: String,

    /// Literal content marker of the page served past the last listing page
    #[serde(rename = "not-found-marker")]
    pub not_found_marker: String,

    /// Literal markup marker of promoted rows
    #[serde(rename = "featured-marker")]
    pub featured_marker: String,

    /// Only locations mentioning this country are kept
    pub country: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: "https://clutch.co".to_string(),
            listing_path: "/ua/web-developers".to_string(),
            not_found_marker: "<title>404 - Not Found</title>".to_string(),
            featured_marker: "featured".to_string(),
            country: "Ukraine".to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of listing pages to walk; prompted for when absent
    pub pages: Option<u32>,

    /// Query attempts made by the poller before giving up
    #[serde(rename = "poll-attempts")]
    pub poll_attempts: u32,

    /// Pause between poll attempts (milliseconds)
    #[serde(rename = "poll-interval-ms")]
    pub poll_interval_ms: u64,

    /// Whole-request timeout of a single navigation (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            pages: None,
            poll_attempts: 100,
            poll_interval_ms: 100,
            request_timeout_secs: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "DirectoryScout".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/directory-scout/directory-scout".to_string(),
            contact_email: "scout@example.com".to_string(),
        }
    }
}

/// CSS selectors for the listing and profile pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    #[serde(rename = "provider-row")]
    pub provider_row: String,

    /// Profile anchor inside a listing row
    #[serde(rename = "profile-link")]
    pub profile_link: String,

    #[serde(rename = "website-link")]
    pub website_link: String,

    pub title: String,

    #[serde(rename = "hour-rate")]
    pub hour_rate: String,

    #[serde(rename = "min-project-size")]
    pub min_project_size: String,

    #[serde(rename = "cost-rating")]
    pub cost_rating: String,

    #[serde(rename = "review-count")]
    pub review_count: String,

    /// List whose `li` children are the provider's offices
    pub locations: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            provider_row: ".provider-row".to_string(),
            profile_link: "a.directory_profile".to_string(),
            website_link: ".website-link__item".to_string(),
            title: "head > title".to_string(),
            hour_rate: "#summary_section > ul > li:nth-child(2) > div > span.profile-summary__detail-title".to_string(),
            min_project_size: "#summary_section > ul > li:nth-child(1) > div > span.profile-summary__detail-title".to_string(),
            cost_rating: "#metrics_section > div.profile-metrics__item.profile-metrics__item--rating > span.profile-metrics__value.profile-metrics__value--rating".to_string(),
            review_count: "#reviews-sg-accordion > div > section > div.profile-insights > button".to_string(),
            locations: "#profile-locations > ul".to_string(),
        }
    }
}

impl SelectorConfig {
    /// All selectors paired with their config keys
    pub fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("provider-row", &self.provider_row),
            ("profile-link", &self.profile_link),
            ("website-link", &self.website_link),
            ("title", &self.title),
            ("hour-rate", &self.hour_rate),
            ("min-project-size", &self.min_project_size),
            ("cost-rating", &self.cost_rating),
            ("review-count", &self.review_count),
            ("locations", &self.locations),
        ]
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV table written at the end of a run
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Optional SQLite database that also receives every run
    #[serde(rename = "database-path")]
    pub database_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "results.csv".to_string(),
            database_path: None,
        }
    }
}
