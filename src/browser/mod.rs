//! Page abstraction the crawler drives
//!
//! The crawl logic only needs five capabilities from a browser engine:
//! navigate, read raw content, query one element, query many elements, and
//! read element attributes/text. They are captured by the [`Page`] trait and
//! the owned [`Element`] snapshot. [`HttpPage`] implements the trait on top
//! of `reqwest` and `scraper`.

mod element;
mod http_page;

pub use element::Element;
pub use http_page::{build_http_client, HttpPage};

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a page or by element queries
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Navigation to {url} failed: {source}")]
    Navigation { url: String, source: reqwest::Error },

    #[error("No document loaded")]
    NoDocument,

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result type for page operations
pub type BrowserResult<T> = Result<T, BrowserError>;

/// A live browser tab
///
/// Queries take `&self` and may be retried freely; only navigation needs
/// exclusive access. Elements returned by a query are only meaningful until
/// the next call to [`Page::navigate`].
#[async_trait]
pub trait Page: Send + Sync {
    /// Loads `url` into the page, replacing the current document
    async fn navigate(&mut self, url: &str) -> BrowserResult<()>;

    /// Raw markup of the current document
    async fn content(&self) -> BrowserResult<String>;

    /// First element matching `selector`, if any
    async fn query(&self, selector: &str) -> BrowserResult<Option<Element>>;

    /// Every element matching `selector`, in document order
    async fn query_all(&self, selector: &str) -> BrowserResult<Vec<Element>>;
}
