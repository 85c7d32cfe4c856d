//! Directory Scout: a provider-directory harvester
//!
//! This crate walks the paginated web-developer listing of a business
//! directory, follows every organic (non-promoted) provider profile, and
//! compiles a deduplicated table of provider records.

pub mod browser;
pub mod config;
pub mod crawler;
pub mod output;
pub mod prompt;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Directory Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser error: {0}")]
    Browser(#[from] browser::BrowserError),

    #[error("Page structure changed at {url}: nothing matched '{selector}'")]
    StructureChanged { url: String, selector: String },

    #[error("Page structure changed at {url}: '{selector}' has no '{attribute}' attribute")]
    MissingAttribute {
        url: String,
        selector: String,
        attribute: String,
    },

    #[error("Malformed {field} at {url}: '{value}'")]
    MalformedField {
        url: String,
        field: &'static str,
        value: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}' for {key}")]
    InvalidSelector { key: &'static str, selector: String },
}

/// Result type alias for Directory Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use browser::{Element, HttpPage, Page};
pub use config::Config;
pub use crawler::{run_crawl, Coordinator, CrawlReport};
pub use state::{ProviderRecord, ResultSet};
