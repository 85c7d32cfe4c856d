//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small provider directory and run the
//! full crawl cycle end-to-end over HTTP.

use directory_scout::browser::HttpPage;
use directory_scout::config::{parse_config, Config};
use directory_scout::crawler::{Coordinator, SilentObserver};
use directory_scout::output::{CsvExporter, Exporter, SqliteExporter};
use directory_scout::storage::open_storage;
use directory_scout::CrawlReport;
use rusqlite::Connection;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_PATH: &str = "/ua/web-developers";
const NOT_FOUND: &str = "<html><head><title>404 - Not Found</title></head><body></body></html>";

/// Creates a test configuration pointed at the mock server
fn create_test_config(origin: &str) -> Config {
    let mut config = Config::default();
    config.site.origin = origin.to_string();
    config.crawler.poll_attempts = 3;
    config.crawler.poll_interval_ms = 1;
    config.crawler.request_timeout_secs = 5;
    config
}

fn listing_html(slugs: &[&str]) -> String {
    let rows: String = slugs
        .iter()
        .map(|slug| {
            let class = if slug.starts_with("sponsored") {
                "provider-row featured"
            } else {
                "provider-row"
            };
            format!(
                r#"<li class="{class}"><h3><a class="directory_profile" href="/profile/{slug}">{slug}</a></h3></li>"#
            )
        })
        .collect();
    format!(
        "<html><head><title>Top Web Developers in Ukraine</title></head><body><ul>{rows}</ul></body></html>"
    )
}

fn profile_html(name: &str, website: &str, locations: &[&str]) -> String {
    let items: String = locations
        .iter()
        .map(|location| format!("<li>{location}</li>"))
        .collect();
    format!(
        r#"<html><head><title>{name} Reviews | Clutch.co</title></head><body>
<a class="website-link__item" data-link="https://clutch.co/redirect?provider_website={website}&amp;utm_source=directory">Visit Website</a>
<div id="summary_section"><ul>
  <li><div><span class="profile-summary__detail-title">
    $5,000+
  </span></div></li>
  <li><div><span class="profile-summary__detail-title">$25 - $49 / hr</span></div></li>
</ul></div>
<div id="metrics_section"><div class="profile-metrics__item profile-metrics__item--rating">
  <span class="profile-metrics__value profile-metrics__value--rating"> 4.9 </span>
</div></div>
<div id="reviews-sg-accordion"><div><section>
  <div class="profile-insights"><button>42 Reviews</button></div>
</section></div></div>
<div id="profile-locations"><ul>{items}</ul></div>
</body></html>"#
    )
}

async fn mount_listing(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_profile(server: &MockServer, slug: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/profile/{slug}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Serves a directory whose listing ends on page 3
async fn start_directory() -> MockServer {
    let server = MockServer::start().await;

    mount_listing(
        &server,
        "0",
        listing_html(&["northwind", "sponsored-one", "bluefin"]),
    )
    .await;
    mount_listing(&server, "1", listing_html(&["page-one-only"])).await;
    mount_listing(&server, "2", listing_html(&["northwind-ua", "layout-changed"])).await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(404).set_body_string(NOT_FOUND))
        .mount(&server)
        .await;
    mount_listing(&server, "4", listing_html(&["beyond-the-end"])).await;

    mount_profile(
        &server,
        "northwind",
        profile_html(
            "Northwind",
            "https://northwind.example",
            &["Kyiv, Ukraine", "Krakow, Poland", "Lviv, Ukraine"],
        ),
    )
    .await;
    mount_profile(
        &server,
        "bluefin",
        profile_html("Bluefin Labs", "https://bluefin.example", &["Dnipro, Ukraine"]),
    )
    .await;
    mount_profile(
        &server,
        "northwind-ua",
        profile_html("NORTHWIND", "https://northwind.ua.example", &["Odesa, Ukraine"]),
    )
    .await;
    mount_profile(
        &server,
        "layout-changed",
        "<html><head><title>Changed Reviews</title></head><body></body></html>".to_string(),
    )
    .await;

    server
}

async fn crawl(config: Config, pages: u32) -> CrawlReport {
    let page = HttpPage::new(&config.user_agent, &config.crawler).unwrap();
    let mut coordinator = Coordinator::new(config, page).with_observer(Box::new(SilentObserver));
    coordinator.run(pages).await.unwrap()
}

/// Listing page indices requested from the server, in order
async fn requested_listing_pages(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.url.path() == LISTING_PATH)
        .filter_map(|request| {
            request
                .url
                .query_pairs()
                .find(|(key, _)| key == "page")
                .map(|(_, value)| value.into_owned())
        })
        .collect()
}

#[tokio::test]
async fn test_full_crawl_against_directory() {
    let server = start_directory().await;
    let config = create_test_config(&server.uri());

    let report = crawl(config, 10).await;

    let names: Vec<_> = report.providers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Northwind", "Bluefin Labs"]);

    let northwind = &report.providers[0];
    assert_eq!(northwind.website, "https://northwind.example");
    assert_eq!(northwind.cities, vec!["Kyiv", "Lviv"]);
    assert_eq!(northwind.hour_rate, "$25-$49/hr");
    assert_eq!(northwind.min_project_size, "$5,000+");
    assert_eq!(northwind.rating_for_cost, "4.9");
    assert_eq!(northwind.number_of_reviews, "42");

    assert_eq!(report.stats.pages_visited, 2);
    assert_eq!(report.stats.rows_skipped, 1);
    assert_eq!(report.stats.links_collected, 4);
    assert_eq!(report.stats.duplicates_discarded, 1);
    assert_eq!(report.stats.providers_failed, 1);
    assert!(report.stats.reached_last_page);
}

#[tokio::test]
async fn test_listing_skips_page_one_and_stops_at_not_found() {
    let server = start_directory().await;
    let config = create_test_config(&server.uri());

    crawl(config, 10).await;

    assert_eq!(requested_listing_pages(&server).await, ["0", "2", "3"]);
}

#[tokio::test]
async fn test_listing_respects_page_budget() {
    let server = start_directory().await;
    let config = create_test_config(&server.uri());

    let report = crawl(config, 2).await;

    assert_eq!(requested_listing_pages(&server).await, ["0", "2"]);
    assert!(!report.stats.reached_last_page);
    assert_eq!(report.providers.len(), 2);
}

#[tokio::test]
async fn test_promoted_profiles_are_never_visited() {
    let server = start_directory().await;
    let config = create_test_config(&server.uri());

    crawl(config, 10).await;

    let requests = server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .all(|request| !request.url.path().contains("sponsored")));
}

#[tokio::test]
async fn test_unreachable_directory_yields_empty_report() {
    // Bind then release a port so nothing is listening on it
    let origin = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let config = create_test_config(&origin);

    let report = crawl(config, 3).await;

    assert!(report.providers.is_empty());
    assert_eq!(report.stats.pages_visited, 0);
}

#[tokio::test]
async fn test_crawl_configured_from_toml() {
    let server = start_directory().await;
    let toml = format!(
        r#"
[site]
origin = "{}"

[crawler]
pages = 2
poll-attempts = 2
poll-interval-ms = 1

[output]
csv-path = "unused.csv"
"#,
        server.uri()
    );
    let config = parse_config(&toml).unwrap();
    let pages = config.crawler.pages.unwrap();

    let report = crawl(config, pages).await;

    assert_eq!(report.providers.len(), 2);
}

#[tokio::test]
async fn test_exports_write_csv_and_database() {
    let server = start_directory().await;
    let config = create_test_config(&server.uri());
    let report = crawl(config, 10).await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("results.csv");
    let db_path = dir.path().join("scout.db");

    let mut csv_exporter = CsvExporter::new(&csv_path);
    csv_exporter.export(&report.providers).unwrap();

    let storage = open_storage(&db_path).unwrap();
    let mut db_exporter = SqliteExporter::new(storage, "test-hash", 10);
    db_exporter.export(&report.providers).unwrap();
    drop(db_exporter);

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(
        lines[0],
        ",name,website,cities,hour rate,min project size,rating for cost,number of reviews"
    );
    assert_eq!(
        lines[1],
        "0,Northwind,https://northwind.example,Kyiv; Lviv,$25-$49/hr,\"$5,000+\",4.9,42"
    );
    assert_eq!(lines.len(), 3);

    let conn = Connection::open(&db_path).unwrap();
    let (config_hash, pages): (String, u32) = conn
        .query_row(
            "SELECT config_hash, pages_requested FROM export_info",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(config_hash, "test-hash");
    assert_eq!(pages, 10);

    let names: Vec<String> = conn
        .prepare("SELECT name FROM providers ORDER BY position")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(names, ["Northwind", "Bluefin Labs"]);

    let cities: Vec<String> = conn
        .prepare("SELECT city FROM provider_cities WHERE provider_position = 0 ORDER BY position")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(cities, ["Kyiv", "Lviv"]);
}
