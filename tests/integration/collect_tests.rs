use crate::{fast_policy, html_page, test_client};
use mailtrawl::config::Config;
use mailtrawl::crawler::{collect, fetch_with_backoff, BackoffPolicy, Collector, FetchResult};
use mailtrawl::mailer::dedupe_addresses;
use mailtrawl::state::SiteOutcome;
use mailtrawl::storage::{write_url_list, CsvEmailStore, EmailStore, StorageError};
use mailtrawl::TrawlError;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_robots(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page_path: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(server)
        .await;
}

fn store_in(dir: &TempDir) -> CsvEmailStore {
    CsvEmailStore::new(dir.path().join("emails.csv"))
}

#[tokio::test]
async fn test_harvest_writes_rows_with_title() {
    let server = MockServer::start().await;
    mount_robots(&server, 200, "User-agent: *\nAllow: /").await;
    mount_page(
        &server,
        "/contact",
        html_page(
            Some("Acme Bakery"),
            "<p>Write to info@acme.io or sales@acme.io</p>",
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let url = format!("{}/contact", server.uri());

    let mut collector = Collector::with_client(test_client(), fast_policy(), store_in(&dir));
    let stats = collector.run(&[url.clone()]).await.unwrap();

    assert_eq!(stats.count(SiteOutcome::Harvested), 1);
    assert_eq!(stats.records_written, 2);

    let records = collector.into_store().load_all().unwrap();
    let addresses: Vec<&str> = records.iter().map(|r| r.address.as_str()).collect();
    assert_eq!(addresses, vec!["info@acme.io", "sales@acme.io"]);
    assert!(records.iter().all(|r| r.source_url == url));
    assert!(records.iter().all(|r| r.site_title == "Acme Bakery"));
}

#[tokio::test]
async fn test_missing_title_on_ip_host_uses_literal() {
    let server = MockServer::start().await;
    mount_robots(&server, 200, "").await;
    mount_page(&server, "/", html_page(None, "hello@shop.example")).await;

    let dir = TempDir::new().unwrap();
    let mut collector = Collector::with_client(test_client(), fast_policy(), store_in(&dir));
    collector.run(&[format!("{}/", server.uri())]).await.unwrap();

    let records = collector.into_store().load_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].site_title, "Website");
}

#[tokio::test]
async fn test_filtered_addresses_write_nothing() {
    let server = MockServer::start().await;
    mount_robots(&server, 200, "User-agent: *\nAllow: /").await;
    mount_page(
        &server,
        "/contact",
        html_page(
            Some("Contacts"),
            "John@Example.com abc-def@foo.com 9name@foo.com contact@gdpr-notice.com",
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let store_path = store.path().to_path_buf();

    let mut collector = Collector::with_client(test_client(), fast_policy(), store);
    let outcome = collector
        .process_url(&format!("{}/contact", server.uri()))
        .await
        .unwrap();

    assert_eq!(outcome, SiteOutcome::NoEmails);
    assert_eq!(collector.statistics().records_written, 0);
    assert_eq!(collector.statistics().records_dropped, 4);
    assert!(!store_path.exists());
}

#[tokio::test]
async fn test_robots_fetched_once_per_origin() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/a", html_page(Some("A"), "a@shop.com")).await;
    mount_page(&server, "/b", html_page(Some("B"), "b@shop.com")).await;

    let dir = TempDir::new().unwrap();
    let mut collector = Collector::with_client(test_client(), fast_policy(), store_in(&dir));
    let urls = vec![
        format!("{}/a", server.uri()),
        format!("{}/b", server.uri()),
    ];
    let stats = collector.run(&urls).await.unwrap();

    assert_eq!(stats.count(SiteOutcome::Harvested), 2);
    assert_eq!(collector.robots().cached(&server.uri()), Some(true));
}

#[tokio::test]
async fn test_robots_disallow_skips_page() {
    let server = MockServer::start().await;
    mount_robots(&server, 200, "User-agent: *\nDisallow: /private").await;

    Mock::given(method("GET"))
        .and(path("/private/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x@shop.com"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut collector = Collector::with_client(test_client(), fast_policy(), store_in(&dir));
    let outcome = collector
        .process_url(&format!("{}/private/contact", server.uri()))
        .await
        .unwrap();

    assert_eq!(outcome, SiteOutcome::RobotsDenied);
}

#[tokio::test]
async fn test_robots_not_found_allows() {
    let server = MockServer::start().await;
    mount_robots(&server, 404, "").await;
    mount_page(&server, "/contact", html_page(Some("Shop"), "owner@shop.com")).await;

    let dir = TempDir::new().unwrap();
    let mut collector = Collector::with_client(test_client(), fast_policy(), store_in(&dir));
    let outcome = collector
        .process_url(&format!("{}/contact", server.uri()))
        .await
        .unwrap();

    assert_eq!(outcome, SiteOutcome::Harvested);
}

#[tokio::test]
async fn test_robots_forbidden_or_server_error_denies() {
    for status in [401u16, 403, 500, 503] {
        let server = MockServer::start().await;
        mount_robots(&server, status, "").await;

        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(ResponseTemplate::new(200).set_body_string("owner@shop.com"))
            .expect(0)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let mut collector = Collector::with_client(test_client(), fast_policy(), store_in(&dir));
        let outcome = collector
            .process_url(&format!("{}/contact", server.uri()))
            .await
            .unwrap();

        assert_eq!(outcome, SiteOutcome::RobotsDenied, "robots status {}", status);
    }
}

#[tokio::test]
async fn test_failing_page_retried_then_skipped() {
    let server = MockServer::start().await;
    mount_robots(&server, 200, "User-agent: *\nAllow: /").await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;
    mount_page(&server, "/up", html_page(Some("Up"), "up@shop.com")).await;

    let policy = BackoffPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(100),
        polite_delay: Duration::ZERO,
    };
    let dir = TempDir::new().unwrap();
    let mut collector = Collector::with_client(test_client(), policy, store_in(&dir));
    let urls = vec![
        format!("{}/down", server.uri()),
        format!("{}/up", server.uri()),
    ];

    let start = Instant::now();
    let stats = collector.run(&urls).await.unwrap();
    let elapsed = start.elapsed();

    // 100 + 200 + 400 ms of backoff; a fourth wait (800 ms) must not happen
    assert!(elapsed >= Duration::from_millis(700), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(1400), "{:?}", elapsed);
    assert_eq!(stats.count(SiteOutcome::FetchFailed), 1);
    assert_eq!(stats.count(SiteOutcome::Harvested), 1);
}

#[tokio::test]
async fn test_courtesy_delay_after_successful_fetch() {
    let server = MockServer::start().await;
    mount_page(&server, "/", html_page(Some("Shop"), "hi@shop.com")).await;

    let policy = BackoffPolicy {
        max_attempts: 3,
        base_delay: Duration::from_secs(5),
        polite_delay: Duration::from_millis(300),
    };

    let start = Instant::now();
    let result = fetch_with_backoff(&test_client(), &format!("{}/", server.uri()), &policy).await;
    let elapsed = start.elapsed();

    match result {
        FetchResult::Success { attempts, .. } => assert_eq!(attempts, 1),
        other => panic!("expected success, got {:?}", other),
    }
    assert!(elapsed >= Duration::from_millis(300), "{:?}", elapsed);
    assert!(elapsed < Duration::from_secs(5), "{:?}", elapsed);
}

#[tokio::test]
async fn test_invalid_entries_skipped() {
    let dir = TempDir::new().unwrap();
    let mut collector = Collector::with_client(test_client(), fast_policy(), store_in(&dir));
    let urls = vec!["not a url".to_string(), "ftp://files.example/".to_string()];

    let stats = collector.run(&urls).await.unwrap();
    assert_eq!(stats.count(SiteOutcome::InvalidUrl), 2);
    assert!(collector.robots().is_empty());
}

#[tokio::test]
async fn test_first_seen_url_wins_within_run() {
    let server = MockServer::start().await;
    mount_robots(&server, 200, "").await;
    mount_page(&server, "/one", html_page(Some("One"), "team@shop.com")).await;
    mount_page(
        &server,
        "/two",
        html_page(Some("Two"), "team@shop.com and press@shop.com"),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let mut collector = Collector::with_client(test_client(), fast_policy(), store_in(&dir));
    let one = format!("{}/one", server.uri());
    collector
        .run(&[one.clone(), format!("{}/two", server.uri())])
        .await
        .unwrap();

    let records = collector.into_store().load_all().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].address, "team@shop.com");
    assert_eq!(records[0].source_url, one);
    assert_eq!(records[1].address, "press@shop.com");
}

#[tokio::test]
async fn test_separate_runs_append_duplicates() {
    let server = MockServer::start().await;
    mount_robots(&server, 200, "").await;
    mount_page(&server, "/", html_page(Some("Shop"), "team@shop.com")).await;

    let dir = TempDir::new().unwrap();
    let urls = vec![format!("{}/", server.uri())];

    for _ in 0..2 {
        let mut collector = Collector::with_client(test_client(), fast_policy(), store_in(&dir));
        collector.run(&urls).await.unwrap();
    }

    let store = store_in(&dir);
    let addresses = store.load_addresses().unwrap();
    assert_eq!(addresses, vec!["team@shop.com", "team@shop.com"]);

    // The sender collapses them again
    assert_eq!(dedupe_addresses(addresses), vec!["team@shop.com"]);
}

#[tokio::test]
async fn test_collect_from_configured_files() {
    let server = MockServer::start().await;
    mount_robots(&server, 200, "").await;
    mount_page(&server, "/", html_page(Some("Shop"), "orders@shop.com")).await;

    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.files.url_list = dir.path().join("websites.txt").display().to_string();
    config.files.email_store = dir.path().join("emails.csv").display().to_string();
    config.crawler.polite_delay_ms = 0;
    config.crawler.base_delay_ms = 10;

    write_url_list(
        dir.path().join("websites.txt").as_path(),
        &[format!("{}/", server.uri()), String::new()],
    )
    .unwrap();

    let stats = collect(&config).await.unwrap();
    assert_eq!(stats.records_written, 1);
    assert_eq!(stats.total_sites(), 1);

    let records = CsvEmailStore::new(&config.files.email_store)
        .load_all()
        .unwrap();
    assert_eq!(records[0].address, "orders@shop.com");
}

#[tokio::test]
async fn test_collect_without_url_list() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.files.url_list = dir.path().join("websites.txt").display().to_string();

    let result = collect(&config).await;
    assert!(matches!(
        result,
        Err(TrawlError::Storage(StorageError::NotFound(_)))
    ));
}
