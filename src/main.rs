//! Directory Scout main entry point
//!
//! This is the command-line interface for the Directory Scout harvester.

use anyhow::{Context, Result};
use clap::Parser;
use directory_scout::config::{load_config_with_hash, validate, Config};
use directory_scout::crawler::{listing_indices, listing_url, run_crawl};
use directory_scout::output::{print_statistics, CsvExporter, Exporter, SqliteExporter};
use directory_scout::prompt::ask_pages;
use directory_scout::storage::open_storage;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Hash recorded for exports made with the built-in configuration
const DEFAULT_CONFIG_HASH: &str = "default";

/// Directory Scout: a provider-directory harvester
///
/// Walks the web-developer listing of a business directory, follows every
/// organic provider profile and writes a deduplicated provider table.
#[derive(Parser, Debug)]
#[command(name = "directory-scout")]
#[command(version)]
#[command(about = "A provider-directory harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of listing pages to visit (asked interactively when unset)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pages: Option<u32>,

    /// CSV file to write, overriding the configured path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be visited without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, hash)
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            let config = Config::default();
            validate(&config).context("built-in configuration is invalid")?;
            (config, DEFAULT_CONFIG_HASH.to_string())
        }
    };

    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }

    if cli.dry_run {
        let pages = cli.pages.or(config.crawler.pages);
        handle_dry_run(&config, pages);
    } else {
        let pages = match cli.pages.or(config.crawler.pages) {
            Some(pages) => pages,
            None => {
                let stdin = std::io::stdin();
                ask_pages(stdin.lock(), std::io::stdout()).context("failed to read page count")?
            }
        };
        handle_crawl(config, &config_hash, pages, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("directory_scout=info,warn"),
            1 => EnvFilter::new("directory_scout=debug,info"),
            2 => EnvFilter::new("directory_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the configuration and listing pages
fn handle_dry_run(config: &Config, pages: Option<u32>) {
    println!("=== Directory Scout Dry Run ===\n");

    println!("Site:");
    println!("  Origin: {}", config.site.origin);
    println!("  Listing path: {}", config.site.listing_path);
    println!("  Country: {}", config.site.country);
    println!("  Promoted marker: {}", config.site.featured_marker);

    println!("\nCrawler:");
    println!(
        "  Poll: {} attempts every {}ms",
        config.crawler.poll_attempts, config.crawler.poll_interval_ms
    );
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    match &config.output.database_path {
        Some(path) => println!("  Database: {}", path),
        None => println!("  Database: (disabled)"),
    }

    println!("\n✓ Configuration is valid");
    match pages {
        Some(pages) => {
            println!("✓ Would visit up to {} listing pages:", pages);
            for index in listing_indices(pages) {
                println!("  - {}", listing_url(&config.site, index));
            }
        }
        None => println!("✓ Page count would be asked for interactively"),
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, config_hash: &str, pages: u32, quiet: bool) -> Result<()> {
    let csv_path = config.output.csv_path.clone();
    let database_path = config.output.database_path.clone();

    let report = match run_crawl(config, pages).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let mut exporters: Vec<Box<dyn Exporter>> = vec![Box::new(CsvExporter::new(csv_path))];
    if let Some(path) = database_path {
        let storage = open_storage(Path::new(&path))
            .with_context(|| format!("failed to open database {}", path))?;
        exporters.push(Box::new(SqliteExporter::new(storage, config_hash, pages)));
    }

    for exporter in &mut exporters {
        exporter
            .export(&report.providers)
            .with_context(|| format!("failed to export to {}", exporter.destination()))?;
        tracing::info!(
            "Wrote {} providers to {}",
            report.providers.len(),
            exporter.destination()
        );
    }

    if !quiet {
        println!();
        print_statistics(&report.stats);
    }

    Ok(())
}
