//! Configuration module for Directory Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file is not an error for the binary: `Config::default()` targets
//! the clutch.co Ukrainian web-developer listing.
//!
//! # Example
//!
//! ```no_run
//! use directory_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Poll budget: {} attempts", config.crawler.poll_attempts);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SelectorConfig, SiteConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
