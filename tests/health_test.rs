// Integration tests for service health checks

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use habu_assistant::client::ApiClient;
use habu_assistant::health::{
    check_all, HealthMonitor, HealthProbe, HttpProbe, OverallHealth, Readiness, ServiceCheck,
    ServiceEndpoint, ServiceStatus, StatusIndicators,
};

fn probe() -> HttpProbe {
    HttpProbe::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_healthy_service_keeps_details() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/health")
        .match_header("x-api-key", "demo-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"status": "healthy", "mock_mode": true}).to_string())
        .create_async()
        .await;

    let endpoint = ServiceEndpoint::new("Demo API", server.url(), "/api/health").with_api_key("demo-key");
    let check = probe().check(&endpoint).await;

    mock.assert_async().await;
    assert_eq!(check.status, ServiceStatus::Healthy);
    assert!(check.response_time_ms.is_some());
    assert_eq!(check.details["mock_mode"], json!(true));
    Ok(())
}

#[tokio::test]
async fn test_mixed_services_are_degraded() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(json!({"openai_configured": true}).to_string())
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/broken/health")
        .with_status(500)
        .create_async()
        .await;

    let endpoints = vec![
        ServiceEndpoint::new("MCP Server", server.url(), "/health"),
        ServiceEndpoint::new("Admin", format!("{}/broken", server.url()), "/health"),
    ];
    let snapshot = check_all(&probe(), &endpoints).await;

    assert_eq!(snapshot.services.len(), 2);
    assert_eq!(snapshot.services[0].status, ServiceStatus::Healthy);
    assert_eq!(snapshot.services[1].status, ServiceStatus::Degraded);
    assert_eq!(snapshot.overall, OverallHealth::Degraded);
    assert!(snapshot.openai_configured);
    assert!(!snapshot.mock_mode);
}

#[tokio::test]
async fn test_unreachable_service_is_down() {
    let endpoints = vec![
        ServiceEndpoint::new("Gone", "http://127.0.0.1:1", "/health"),
        ServiceEndpoint::new("Also gone", "http://127.0.0.1:1", "/api/health"),
        ServiceEndpoint::new("Still gone", "http://127.0.0.1:1", "/status"),
    ];
    let snapshot = check_all(&probe(), &endpoints).await;

    assert!(snapshot.services.iter().all(|s| s.status == ServiceStatus::Down));
    assert!(snapshot.services.iter().all(|s| s.response_time_ms.is_none()));
    assert_eq!(snapshot.overall, OverallHealth::Critical);
}

#[tokio::test]
async fn test_monitor_stores_latest_snapshot() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/health")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let monitor = HealthMonitor::new(
        Arc::new(probe()),
        vec![ServiceEndpoint::new("MCP Server", server.url(), "/health")],
    );
    assert!(monitor.latest().await.is_none());

    monitor.check_now().await;
    let latest = monitor.latest().await.expect("snapshot stored");
    assert_eq!(latest.overall, OverallHealth::Healthy);
}

#[tokio::test]
async fn test_status_indicators_from_health_endpoint() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/health")
        .with_status(200)
        .with_body(
            json!({
                "status": "healthy",
                "mcp_server": "online",
                "openai_available": true,
                "real_api_mode": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ApiClient::new(server.url(), Duration::from_secs(5))?;
    let report = client.health().await?;
    let indicators = StatusIndicators::from_report(Some(&report));

    assert_eq!(indicators.readiness(), Readiness::Excellent);
    assert_eq!(
        indicators.lines(),
        vec![
            "🟢 MCP Server Online",
            "🟢 API Connected",
            "🟢 AI-Powered (GPT-4)",
            "🟢 Live Cleanroom Data"
        ]
    );
    Ok(())
}

/// Service that takes a minute to answer
struct StalledProbe;

#[async_trait]
impl HealthProbe for StalledProbe {
    async fn check(&self, endpoint: &ServiceEndpoint) -> ServiceCheck {
        tokio::time::sleep(Duration::from_secs(60)).await;
        ServiceCheck {
            name: endpoint.name.clone(),
            status: ServiceStatus::Healthy,
            url: endpoint.url.clone(),
            response_time_ms: Some(60_000),
            last_check: Utc::now(),
            details: json!({}),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_cancel_interrupts_running_checks() {
    let monitor = HealthMonitor::new(
        Arc::new(StalledProbe),
        vec![ServiceEndpoint::new("Demo API", "http://localhost", "/api/health")],
    );
    let cancel = CancellationToken::new();
    let handle = monitor.spawn(cancel.clone());

    tokio::time::sleep(Duration::from_millis(10)).await;
    let started = tokio::time::Instant::now();
    cancel.cancel();
    handle.await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(monitor.latest().await.is_none());
}
