//! Contract tests for SummarizerClient against a simulated chat-completions
//! service.

use docsum_core::SummaryStyle;
use docsum_lifecycle::Summarizer;
use docsum_summarizer::{SummarizerClient, SummarizerConfig, SummarizerError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> SummarizerClient {
    let config = SummarizerConfig::local_mock(&mock_server.uri(), "test-key").unwrap();
    SummarizerClient::new(config).unwrap()
}

fn completion(text: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn summarize_sends_prompt_and_returns_trimmed_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o-mini",
            "max_tokens": 500,
            "messages": [
                {"role": "system", "content": "You are a helpful assistant that summarizes text content."},
                {"role": "user", "content": "Provide a brief, concise summary in 2-3 sentences.\n\nText to summarize:\nRust is a systems language."}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion("  Rust is fast and safe.\n".into())),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let text = client
        .summarize("Rust is a systems language.", SummaryStyle::Brief)
        .await
        .unwrap();
    assert_eq!(text, "Rust is fast and safe.");
}

#[tokio::test]
async fn upstream_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .summarize("text", SummaryStyle::Detailed)
        .await
        .unwrap_err();
    match err {
        SummarizerError::ApiError { status, body, .. } => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn blank_completion_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(serde_json::Value::Null)))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .summarize("text", SummaryStyle::BulletPoints)
        .await
        .unwrap_err();
    assert!(matches!(err, SummarizerError::EmptyCompletion));
}

#[tokio::test]
async fn malformed_body_is_a_deserialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.summarize("text", SummaryStyle::Brief).await.unwrap_err();
    assert!(matches!(err, SummarizerError::Deserialization { .. }));
}

#[tokio::test]
async fn trait_impl_maps_failures_to_summarize_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let summarizer: &dyn Summarizer = &client;
    let err = summarizer
        .summarize("text", SummaryStyle::Brief)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("500"));
}
