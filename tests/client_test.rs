// Integration tests for the demo API client and remote chat

use std::time::Duration;

use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use habu_assistant::chat::{ChatService, ReplySource};
use habu_assistant::client::{
    render_panel, ApiClient, ClientError, ErrorKind, RecoveryState, MAX_RETRY_ATTEMPTS,
};
use habu_assistant::modes::{ChatMode, UserPreferences};

fn client(url: &str) -> ApiClient {
    ApiClient::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_support_request_body_and_reply() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/customer-support/assess")
        .match_body(Matcher::PartialJson(json!({
            "query": "Can a small retail brand use lookalike modeling?",
            "industry": "retail",
            "customerSize": "small"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "summary": "✅ Yes, lookalike modeling is available",
                "confidence_score": 0.85,
                "tools_used": ["use_case_library"]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let service = ChatService::new(Some(client(&server.url())));
    let reply = service
        .send(
            "Can a small retail brand use lookalike modeling?",
            ChatMode::CustomerSupport,
            &UserPreferences::default(),
            &[],
            &CancellationToken::new(),
        )
        .await?;

    mock.assert_async().await;
    assert_eq!(reply.source, ReplySource::Remote);
    assert_eq!(reply.content, "✅ Yes, lookalike modeling is available");
    assert_eq!(reply.metadata.confidence_score, Some(0.85));
    assert_eq!(reply.metadata.tools_used, vec!["use_case_library"]);
    assert!(reply.metadata.is_ai_powered);
    Ok(())
}

#[tokio::test]
async fn test_technical_request_context() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/technical-expert/query")
        .match_body(Matcher::PartialJson(json!({
            "context": {
                "programmingLanguage": "javascript",
                "useCase": "identity_resolution",
                "errorType": "401_authentication"
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let service = ChatService::new(Some(client(&server.url())));
    let reply = service
        .send(
            "Getting 401 on identity calls from javascript",
            ChatMode::TechnicalExpert,
            &UserPreferences::default(),
            &[],
            &CancellationToken::new(),
        )
        .await?;

    mock.assert_async().await;
    // Missing summary falls back to the default text
    assert_eq!(reply.content, "Technical response");
    Ok(())
}

#[tokio::test]
async fn test_status_classification() {
    let cases = [
        (401, ErrorKind::Auth),
        (403, ErrorKind::Auth),
        (404, ErrorKind::Api),
        (503, ErrorKind::Server),
        (418, ErrorKind::Unknown),
    ];

    for (status, expected) in cases {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/health")
            .with_status(status)
            .with_body("nope")
            .create_async()
            .await;

        let err = client(&server.url()).health().await.unwrap_err();
        assert_eq!(err.status(), Some(status as u16));
        assert_eq!(err.kind(), expected, "status {}", status);
        assert!(err.to_string().starts_with("API request failed: "));
    }
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on port 1
    let err = client("http://127.0.0.1:1").health().await.unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }));
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/mcp/habu_list_partners")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = client(&server.url()).list_partners().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
    assert_eq!(err.kind(), ErrorKind::Unknown);
}

#[tokio::test]
async fn test_cancelled_request() {
    let server = mockito::Server::new_async().await;
    let service = ChatService::new(Some(client(&server.url())));

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = service
        .send(
            "hello",
            ChatMode::CustomerSupport,
            &UserPreferences::default(),
            &[],
            &cancel,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Cancelled { .. }));
    assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_templates_listing() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/mcp/habu_enhanced_templates")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "count": 2,
                "templates": [
                    {"name": "Global Sentiment", "category": "Sentiment Analysis", "status": "READY"},
                    {"name": "Combined Intelligence", "category": "Combined", "status": "MISSING_DATASETS"}
                ],
                "mock_mode": false
            })
            .to_string(),
        )
        .create_async()
        .await;

    let listing = client(&server.url()).enhanced_templates().await?;
    let ctx = habu_assistant::prompts::TemplateContext::from_templates(&listing.templates);
    assert_eq!(ctx.total_templates, 2);
    assert_eq!(ctx.ready_templates, 1);
    assert_eq!(ctx.missing_dataset_templates, 1);
    assert!(ctx.has_sentiment_analysis);
    assert!(ctx.has_combined_analysis);
    Ok(())
}

#[tokio::test]
async fn test_retries_are_capped() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/enhanced-chat")
        .with_status(502)
        .create_async()
        .await;

    let api = client(&server.url());
    let request = ChatService::build_request("hi", None);
    let cancel = CancellationToken::new();
    let mut recovery = RecoveryState::new();

    let err = api.send_chat(&request, &cancel).await.unwrap_err();
    recovery.handle_error(&err);

    for _ in 0..MAX_RETRY_ATTEMPTS {
        assert!(recovery.begin_retry());
        let err = api.send_chat(&request, &cancel).await.unwrap_err();
        recovery.retry_failed(&err);
    }

    assert!(!recovery.begin_retry());
    let record = recovery.current().unwrap();
    assert_eq!(record.kind, ErrorKind::Server);
    assert!(render_panel(record).contains("Retries exhausted (3/3)"));
}
