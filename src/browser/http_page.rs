//! HTTP-backed page
//!
//! Navigation is a plain GET; the response body becomes the current document
//! whatever the status code, the same way a browser renders a 404 page.
//! Queries run `scraper` selectors over that document.

use crate::browser::element::select_in;
use crate::browser::{BrowserError, BrowserResult, Element, Page};
use crate::config::{CrawlerConfig, UserAgentConfig};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use directory_scout::browser::build_http_client;
/// use directory_scout::config::{CrawlerConfig, UserAgentConfig};
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        user_agent.crawler_name,
        user_agent.crawler_version,
        user_agent.contact_url,
        user_agent.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// A document loaded by the last navigation
#[derive(Debug, Clone)]
struct LoadedDocument {
    url: String,
    status: u16,
    html: String,
}

/// Page that fetches documents over HTTP
pub struct HttpPage {
    client: Client,
    current: Option<LoadedDocument>,
}

impl HttpPage {
    /// Creates a page with its own client
    pub fn new(user_agent: &UserAgentConfig, crawler: &CrawlerConfig) -> BrowserResult<Self> {
        Ok(Self::with_client(build_http_client(user_agent, crawler)?))
    }

    /// Creates a page on top of an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            current: None,
        }
    }

    /// Final URL of the current document
    pub fn url(&self) -> Option<&str> {
        self.current.as_ref().map(|doc| doc.url.as_str())
    }

    /// HTTP status the current document was served with
    pub fn status(&self) -> Option<u16> {
        self.current.as_ref().map(|doc| doc.status)
    }

    fn document(&self) -> BrowserResult<&LoadedDocument> {
        self.current.as_ref().ok_or(BrowserError::NoDocument)
    }
}

#[async_trait]
impl Page for HttpPage {
    async fn navigate(&mut self, url: &str) -> BrowserResult<()> {
        // The previous document is gone even if this load fails
        self.current = None;

        let navigation_error = |source| BrowserError::Navigation {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(navigation_error)?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let html = response.text().await.map_err(navigation_error)?;

        tracing::debug!("Loaded {} (HTTP {}, {} bytes)", final_url, status, html.len());

        self.current = Some(LoadedDocument {
            url: final_url,
            status,
            html,
        });
        Ok(())
    }

    async fn content(&self) -> BrowserResult<String> {
        Ok(self.document()?.html.clone())
    }

    async fn query(&self, selector: &str) -> BrowserResult<Option<Element>> {
        Ok(select_in(&self.document()?.html, selector)?
            .into_iter()
            .next())
    }

    async fn query_all(&self, selector: &str) -> BrowserResult<Vec<Element>> {
        select_in(&self.document()?.html, selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_queries_before_navigation_fail() {
        let page = HttpPage::new(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();

        assert!(page.url().is_none());
        assert!(matches!(page.content().await, Err(BrowserError::NoDocument)));
        assert!(matches!(
            page.query("title").await,
            Err(BrowserError::NoDocument)
        ));
        assert!(matches!(
            page.query_all("title").await,
            Err(BrowserError::NoDocument)
        ));
    }

    // Navigation against a live server is covered by the wiremock integration tests
}
