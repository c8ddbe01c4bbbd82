// HTTP client for the demo API

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use super::error::ClientError;
use super::types::{
    ChatReply, ChatRequest, HealthReport, PartnerListing, TemplateListing,
    ENHANCED_TEMPLATES_PATH, HEALTH_PATH, LIST_PARTNERS_PATH, LIST_TEMPLATES_PATH,
};

pub struct ApiClient {
    base_url: String,
    http: Client,
    timeout_secs: u64,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            timeout_secs: timeout.as_secs(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a chat message to the endpoint matching the request. Resolves to
    /// `Cancelled` as soon as `cancel` fires.
    pub async fn send_chat(
        &self,
        request: &ChatRequest,
        cancel: &CancellationToken,
    ) -> Result<ChatReply, ClientError> {
        let url = self.url(request.path());
        let body = request.body().map_err(|e| ClientError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!("POST {}", url);
        let send = async {
            let resp = self
                .http
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| ClientError::from_reqwest(&url, e, self.timeout_secs))?;
            self.decode::<ChatReply>(&url, resp).await
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Chat request to {} cancelled", url);
                Err(ClientError::Cancelled { url: url.clone() })
            }
            result = send => result,
        }
    }

    pub async fn list_templates(&self) -> Result<TemplateListing, ClientError> {
        self.get_json(LIST_TEMPLATES_PATH).await
    }

    pub async fn enhanced_templates(&self) -> Result<TemplateListing, ClientError> {
        self.get_json(ENHANCED_TEMPLATES_PATH).await
    }

    pub async fn list_partners(&self) -> Result<PartnerListing, ClientError> {
        self.get_json(LIST_PARTNERS_PATH).await
    }

    pub async fn health(&self) -> Result<HealthReport, ClientError> {
        self.get_json(HEALTH_PATH).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(&url, e, self.timeout_secs))?;
        self.decode(&url, resp).await
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        url: &str,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let text = resp
            .text()
            .await
            .map_err(|e| ClientError::from_reqwest(url, e, self.timeout_secs))?;
        tracing::debug!("{} responded with {} bytes", url, text.len());
        serde_json::from_str(&text).map_err(|e| ClientError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new("http://localhost:5001/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5001");
        assert_eq!(client.url("/api/health"), "http://localhost:5001/api/health");
    }
}
