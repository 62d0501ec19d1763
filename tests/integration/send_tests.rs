use async_trait::async_trait;
use mailtrawl::compose::{generate_email, CompletionError};
use mailtrawl::config::{CompletionSettings, Config};
use mailtrawl::mailer::{dispatch_all, MailError, Mailer};
use serde_json::json;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records every delivery and fails for the configured recipients
#[derive(Default)]
struct RecordingMailer {
    failing: Vec<String>,
    attempts: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        self.attempts
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));

        if self.failing.iter().any(|f| f == to) {
            return Err(MailError::Transport("550 mailbox unavailable".to_string()));
        }
        Ok(())
    }
}

fn settings() -> CompletionSettings {
    CompletionSettings {
        api_key: "test-key".to_string(),
    }
}

fn config_for(server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.completion.base_url = format!("{}/v1", server.uri());
    config.files.context = dir.path().join("context.txt").display().to_string();
    config
}

#[tokio::test]
async fn test_generate_email_sends_prompt_and_returns_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "open-mistral-7b",
            "messages": [
                {"role": "system", "content": "You are an assistant that generates professional emails."},
                {"role": "user", "content": "Context: We bake bread.\n\nUser request: Spring offer\n"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Dear baker,\nHello."}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);
    std::fs::write(&config.files.context, "We bake bread.").unwrap();

    let content = generate_email(&config, &settings(), "Spring offer")
        .await
        .unwrap();
    assert_eq!(content, "Dear baker,\nHello.");
}

#[tokio::test]
async fn test_completion_error_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);
    std::fs::write(&config.files.context, "ctx").unwrap();

    let result = generate_email(&config, &settings(), "topic").await;
    match result {
        Err(CompletionError::Api { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "Unauthorized");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_completion_without_choices_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);
    std::fs::write(&config.files.context, "ctx").unwrap();

    let result = generate_email(&config, &settings(), "topic").await;
    assert!(matches!(result, Err(CompletionError::EmptyResponse)));
}

#[tokio::test]
async fn test_unresponsive_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"choices": []}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = config_for(&server, &dir);
    config.completion.request_timeout_secs = 1;
    std::fs::write(&config.files.context, "ctx").unwrap();

    let start = Instant::now();
    let result = generate_email(&config, &settings(), "topic").await;

    assert!(matches!(result, Err(CompletionError::Network(_))), "{:?}", result);
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_missing_context_skips_remote_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);

    let result = generate_email(&config, &settings(), "topic").await;
    assert!(result.unwrap_err().is_context_missing());
}

#[tokio::test]
async fn test_dispatch_isolates_recipient_failures() {
    let mailer = RecordingMailer {
        failing: vec!["broken@shop.com".to_string()],
        ..Default::default()
    };
    let addresses = vec![
        "first@shop.com".to_string(),
        "broken@shop.com".to_string(),
        "last@shop.com".to_string(),
    ];

    let report = dispatch_all(&mailer, &addresses, "Hello", "Body text").await;

    assert_eq!(report.sent, vec!["first@shop.com", "last@shop.com"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "broken@shop.com");
    assert!(report.failed[0].1.contains("550"));

    let attempts = mailer.attempts.lock().unwrap();
    assert_eq!(attempts.len(), 3);
    assert!(attempts
        .iter()
        .all(|(_, subject, body)| subject == "Hello" && body == "Body text"));
}

#[tokio::test]
async fn test_dispatch_to_nobody() {
    let mailer = RecordingMailer::default();
    let report = dispatch_all(&mailer, &[], "Hello", "Body").await;

    assert_eq!(report.attempted(), 0);
    assert!(mailer.attempts.lock().unwrap().is_empty());
}
