//! Tests for the fetch boundary: every failure class becomes a fallback
//! outcome, nothing is ever raised to the caller.

mod support;

use hf_chat::fetcher::{self, FetchFailure, FetchOutcome};

#[tokio::test]
async fn returns_generated_text_on_success() {
    let url = support::serve_once("200 OK", r#"[{"generated_text": " Hi there!"}]"#).await;
    let client = support::test_client(&url);

    assert_eq!(
        client.fetch("Hello").await,
        FetchOutcome::Reply(" Hi there!".to_string())
    );
}

#[tokio::test]
async fn falls_back_on_http_error() {
    let url = support::serve_once(
        "503 Service Unavailable",
        r#"{"error":"Model is currently loading"}"#,
    )
    .await;
    let client = support::test_client(&url);

    match client.fetch("Hello").await {
        FetchOutcome::Fallback { reason, text } => {
            assert_eq!(reason, FetchFailure::Http(503));
            assert!(text.starts_with("Mock AI Response: You said \"Hello\""));
        }
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[tokio::test]
async fn falls_back_on_connection_refused() {
    let url = support::refused_url().await;
    let client = support::test_client(&url);

    match client.fetch("Hello").await {
        FetchOutcome::Fallback { reason, .. } => assert_eq!(reason, FetchFailure::Network),
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[tokio::test]
async fn falls_back_on_malformed_payload() {
    let url = support::serve_once("200 OK", "this is not json").await;
    let client = support::test_client(&url);

    match client.fetch("Hello").await {
        FetchOutcome::Fallback { reason, .. } => assert_eq!(reason, FetchFailure::Payload),
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[tokio::test]
async fn falls_back_when_generated_text_is_missing() {
    let url = support::serve_once("200 OK", "[{}]").await;
    let client = support::test_client(&url);

    match client.fetch("Hello").await {
        FetchOutcome::Fallback { reason, .. } => assert_eq!(reason, FetchFailure::Payload),
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[tokio::test]
async fn falls_back_on_empty_payload_array() {
    let url = support::serve_once("200 OK", "[]").await;
    let client = support::test_client(&url);

    assert!(client.fetch("Hello").await.is_fallback());
}

#[test]
fn fallback_text_echoes_the_utterance() {
    assert_eq!(
        fetcher::fallback_text("Hello"),
        "Mock AI Response: You said \"Hello\". How can I assist you further?"
    );
}
