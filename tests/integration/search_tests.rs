use mailtrawl::config::Config;
use mailtrawl::search::{search_and_persist, SearchClient};
use mailtrawl::storage::read_url_list;
use mailtrawl::TrawlError;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RESULTS_PAGE: &str = r#"<html><body>
<div class="result">
  <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fbakery.example%2Fcontact&rut=1">Bakery</a>
</div>
<div class="result">
  <a class="result__a" href="https://florist.example/">Florist</a>
</div>
<div class="result">
  <a class="result__a" href="https://florist.example/">Florist duplicate</a>
</div>
<div class="result">
  <a class="result__a" href="https://butcher.example/about">Butcher</a>
</div>
</body></html>"#;

fn config_for(server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.search.endpoint = format!("{}/html/", server.uri());
    config.files.url_list = dir.path().join("websites.txt").display().to_string();
    config
}

#[tokio::test]
async fn test_search_results_persisted_in_rank_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", "bakery contact"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(RESULTS_PAGE, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);

    let count = search_and_persist(&config, "bakery contact", 10)
        .await
        .unwrap();
    assert_eq!(count, 3);

    let urls = read_url_list(Path::new(&config.files.url_list)).unwrap();
    assert_eq!(
        urls,
        vec![
            "https://bakery.example/contact",
            "https://florist.example/",
            "https://butcher.example/about",
        ]
    );
}

#[tokio::test]
async fn test_search_limit_truncates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(RESULTS_PAGE, "text/html"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);

    let client = SearchClient::new(&config).unwrap();
    let results = client.search("anything", 1).await.unwrap();
    assert_eq!(results, vec!["https://bakery.example/contact"]);
}

#[tokio::test]
async fn test_search_failure_leaves_list_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("slow down"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);
    std::fs::write(&config.files.url_list, "https://previous.example/\n").unwrap();

    let result = search_and_persist(&config, "bakery", 10).await;
    match result {
        Err(TrawlError::SearchFailed { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "slow down");
        }
        other => panic!("expected SearchFailed, got {:?}", other),
    }

    let urls = read_url_list(Path::new(&config.files.url_list)).unwrap();
    assert_eq!(urls, vec!["https://previous.example/"]);
}
