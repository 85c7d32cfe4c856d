use crate::config::types::{
    Config, CrawlerConfig, OutputConfig, SelectorConfig, SiteConfig, UserAgentConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Upper bound on the poll budget
const MAX_POLL_ATTEMPTS: u32 = 10_000;

/// Upper bound on the pause between two poll attempts (milliseconds)
const MAX_POLL_INTERVAL_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_selectors(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the directory site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let origin = Url::parse(&config.origin)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid origin '{}': {}", config.origin, e)))?;

    if origin.scheme() != "http" && origin.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Origin '{}' must use HTTP or HTTPS",
            config.origin
        )));
    }

    if origin.path() != "/" || origin.query().is_some() || origin.fragment().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "Origin '{}' must not carry a path, query or fragment",
            config.origin
        )));
    }

    if !config.listing_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "listing_path must start with '/', got '{}'",
            config.listing_path
        )));
    }

    for (key, value) in [
        ("not_found_marker", &config.not_found_marker),
        ("featured_marker", &config.featured_marker),
        ("country", &config.country),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
        }
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.pages == Some(0) {
        return Err(ConfigError::Validation(
            "pages must be a positive integer".to_string(),
        ));
    }

    if config.poll_attempts < 1 || config.poll_attempts > MAX_POLL_ATTEMPTS {
        return Err(ConfigError::Validation(format!(
            "poll_attempts must be between 1 and {}, got {}",
            MAX_POLL_ATTEMPTS, config.poll_attempts
        )));
    }

    if config.poll_interval_ms > MAX_POLL_INTERVAL_MS {
        return Err(ConfigError::Validation(format!(
            "poll_interval_ms must be <= {}ms, got {}ms",
            MAX_POLL_INTERVAL_MS, config.poll_interval_ms
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Every selector must parse before the first navigation
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    for (key, selector) in config.entries() {
        if selector.trim().is_empty() || Selector::parse(selector).is_err() {
            return Err(ConfigError::InvalidSelector {
                key,
                selector: selector.to_string(),
            });
        }
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    if matches!(config.database_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "database_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_origin() {
        let mut site = SiteConfig::default();
        assert!(validate_site_config(&site).is_ok());

        site.origin = "http://127.0.0.1:8080".to_string();
        assert!(validate_site_config(&site).is_ok());

        site.origin = "ftp://clutch.co".to_string();
        assert!(matches!(
            validate_site_config(&site),
            Err(ConfigError::InvalidUrl(_))
        ));

        site.origin = "https://clutch.co/ua".to_string();
        assert!(validate_site_config(&site).is_err());

        site.origin = "not a url".to_string();
        assert!(validate_site_config(&site).is_err());
    }

    #[test]
    fn test_validate_listing_path_and_markers() {
        let mut site = SiteConfig::default();
        site.listing_path = "ua/web-developers".to_string();
        assert!(validate_site_config(&site).is_err());

        let mut site = SiteConfig::default();
        site.featured_marker = "  ".to_string();
        assert!(validate_site_config(&site).is_err());
    }

    #[test]
    fn test_validate_crawler_bounds() {
        let mut crawler = CrawlerConfig::default();
        assert!(validate_crawler_config(&crawler).is_ok());

        crawler.pages = Some(0);
        assert!(validate_crawler_config(&crawler).is_err());

        crawler.pages = Some(3);
        crawler.poll_attempts = MAX_POLL_ATTEMPTS + 1;
        assert!(validate_crawler_config(&crawler).is_err());

        crawler.poll_attempts = 1;
        crawler.poll_interval_ms = 0;
        assert!(validate_crawler_config(&crawler).is_ok());

        crawler.poll_interval_ms = MAX_POLL_INTERVAL_MS + 1;
        assert!(validate_crawler_config(&crawler).is_err());
    }

    #[test]
    fn test_validate_selectors() {
        let mut selectors = SelectorConfig::default();
        assert!(validate_selectors(&selectors).is_ok());

        selectors.review_count = "div[".to_string();
        let err = validate_selectors(&selectors).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSelector { key: "review-count", .. }
        ));

        let mut selectors = SelectorConfig::default();
        selectors.title = String::new();
        assert!(validate_selectors(&selectors).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
    }

    #[test]
    fn test_validate_output() {
        let mut output = OutputConfig::default();
        assert!(validate_output_config(&output).is_ok());

        output.database_path = Some(String::new());
        assert!(validate_output_config(&output).is_err());

        output.database_path = None;
        output.csv_path = String::new();
        assert!(validate_output_config(&output).is_err());
    }
}
