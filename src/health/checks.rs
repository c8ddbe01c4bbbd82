// Service health checks

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A service to probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub name: String,
    pub url: String,
    #[serde(default = "default_health_path")]
    pub health_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_health_path() -> String {
    "/health".to_string()
}

impl ServiceEndpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>, health_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            health_path: health_path.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn check_url(&self) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), self.health_path)
    }
}

/// Services checked when none are configured
pub fn default_services() -> Vec<ServiceEndpoint> {
    vec![
        ServiceEndpoint::new("Demo API", "https://habu-demo-api-v2.onrender.com", "/api/health"),
        ServiceEndpoint::new("MCP Server", "https://habu-mcp-server-v2.onrender.com", "/health"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
    Down,
    Unknown,
}

impl ServiceStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            ServiceStatus::Healthy => "✅",
            ServiceStatus::Degraded => "⚠️",
            ServiceStatus::Down => "❌",
            ServiceStatus::Unknown => "❔",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCheck {
    pub name: String,
    pub status: ServiceStatus,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    pub last_check: DateTime<Utc>,
    pub details: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallHealth {
    Healthy,
    Degraded,
    Critical,
}

impl OverallHealth {
    /// All healthy, at least half healthy, or worse
    pub fn classify(checks: &[ServiceCheck]) -> Self {
        let healthy = checks
            .iter()
            .filter(|c| c.status == ServiceStatus::Healthy)
            .count();
        if healthy == checks.len() {
            OverallHealth::Healthy
        } else if healthy * 2 >= checks.len() {
            OverallHealth::Degraded
        } else {
            OverallHealth::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub services: Vec<ServiceCheck>,
    pub overall: OverallHealth,
    pub last_updated: DateTime<Utc>,
    pub mock_mode: bool,
    pub openai_configured: bool,
}

impl HealthSnapshot {
    pub fn from_checks(services: Vec<ServiceCheck>) -> Self {
        let flag = |key: &str| {
            services
                .first()
                .and_then(|s| s.details.get(key))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        };
        let mock_mode = flag("mock_mode");
        let openai_configured = flag("openai_configured");

        Self {
            overall: OverallHealth::classify(&services),
            services,
            last_updated: Utc::now(),
            mock_mode,
            openai_configured,
        }
    }
}

#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self, endpoint: &ServiceEndpoint) -> ServiceCheck;
}

pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build health check HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HealthProbe for HttpProbe {
    async fn check(&self, endpoint: &ServiceEndpoint) -> ServiceCheck {
        let started = Instant::now();
        let mut request = self.client.get(endpoint.check_url());
        if let Some(key) = &endpoint.api_key {
            request = request.header("X-API-Key", key);
        }

        let (status, response_time_ms, details) = match request.send().await {
            Ok(resp) => {
                let elapsed = started.elapsed().as_millis() as u64;
                if resp.status().is_success() {
                    let details = resp.json::<Value>().await.unwrap_or_else(|_| json!({}));
                    (ServiceStatus::Healthy, Some(elapsed), details)
                } else {
                    let details = json!({ "error": format!("HTTP {}", resp.status().as_u16()) });
                    (ServiceStatus::Degraded, Some(elapsed), details)
                }
            }
            Err(e) => (ServiceStatus::Down, None, json!({ "error": e.to_string() })),
        };

        tracing::debug!(
            service = %endpoint.name,
            status = ?status,
            "Health check finished"
        );

        ServiceCheck {
            name: endpoint.name.clone(),
            status,
            url: endpoint.url.clone(),
            response_time_ms,
            last_check: Utc::now(),
            details,
        }
    }
}

/// Probe every endpoint concurrently
pub async fn check_all(probe: &dyn HealthProbe, endpoints: &[ServiceEndpoint]) -> HealthSnapshot {
    let checks = join_all(endpoints.iter().map(|e| probe.check(e))).await;
    HealthSnapshot::from_checks(checks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(status: ServiceStatus, details: Value) -> ServiceCheck {
        ServiceCheck {
            name: "svc".to_string(),
            status,
            url: "http://localhost".to_string(),
            response_time_ms: None,
            last_check: Utc::now(),
            details,
        }
    }

    #[test]
    fn test_overall_classification() {
        use ServiceStatus::*;
        let all = |statuses: &[ServiceStatus]| {
            let checks: Vec<_> = statuses.iter().map(|s| check(*s, json!({}))).collect();
            OverallHealth::classify(&checks)
        };

        assert_eq!(all(&[Healthy, Healthy]), OverallHealth::Healthy);
        assert_eq!(all(&[Healthy, Down]), OverallHealth::Degraded);
        assert_eq!(all(&[Healthy, Healthy, Degraded, Down]), OverallHealth::Degraded);
        assert_eq!(all(&[Healthy, Down, Down]), OverallHealth::Critical);
        assert_eq!(all(&[Degraded]), OverallHealth::Critical);
    }

    #[test]
    fn test_snapshot_flags_from_first_service() {
        let snapshot = HealthSnapshot::from_checks(vec![
            check(ServiceStatus::Healthy, json!({"mock_mode": true, "openai_configured": false})),
            check(ServiceStatus::Healthy, json!({"openai_configured": true})),
        ]);
        assert!(snapshot.mock_mode);
        assert!(!snapshot.openai_configured);

        let empty = HealthSnapshot::from_checks(vec![]);
        assert!(!empty.mock_mode);
    }

    #[test]
    fn test_check_url() {
        let endpoint = ServiceEndpoint::new("Demo API", "http://localhost:5001/", "/api/health");
        assert_eq!(endpoint.check_url(), "http://localhost:5001/api/health");
        assert_eq!(default_services().len(), 2);
    }

    #[test]
    fn test_endpoint_from_toml() {
        let endpoint: ServiceEndpoint =
            toml::from_str("name = \"MCP Server\"\nurl = \"http://localhost:8000\"\napi_key = \"k\"")
                .unwrap();
        assert_eq!(endpoint.health_path, "/health");
        assert_eq!(endpoint.api_key.as_deref(), Some("k"));
    }
}
