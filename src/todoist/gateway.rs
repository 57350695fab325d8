//! Authenticated HTTP gateway to the remote task service
//!
//! One request per call. The gateway attaches the bearer credential and a
//! JSON content type, then classifies the response status:
//!
//! - `2xx` returns the body text
//! - `401` becomes [`IntakeError::Unauthorized`]
//! - anything else becomes [`IntakeError::RequestFailed`] with the raw body
//!
//! Network-level failures surface as [`IntakeError::TransportError`]. There
//! are no retries; deadlines come from the client timeout.

use crate::error::{IntakeError, IntakeResult};
use crate::gateway_span;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn, Instrument};

/// Default Todoist REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/rest/v2";

/// Gateway configuration
#[derive(Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(2),
        }
    }
}

/// HTTP gateway holding the client, base URL and credential
#[derive(Debug, Clone)]
pub struct HttpGateway {
    config: GatewayConfig,
    client: Client,
}

impl HttpGateway {
    /// Create a gateway with a client bounded by the configured timeout
    pub fn new(config: GatewayConfig) -> IntakeResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| IntakeError::transport(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Whether a non-empty credential is configured
    pub fn has_credential(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Issue one authenticated request and classify the response
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> IntakeResult<String> {
        let span = gateway_span!(method = %method, path = %path);
        self.send(method, path, query, body).instrument(span).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> IntakeResult<String> {
        let url = self.endpoint(path);
        debug!(method = %method, url = %url, "Task service request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.config.api_key)
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            let error_msg = format!(
                "{} {} failed: {} (is_connect: {}, is_timeout: {})",
                method,
                url,
                e,
                e.is_connect(),
                e.is_timeout()
            );
            warn!("Task service network error: {}", error_msg);
            IntakeError::transport(error_msg)
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| IntakeError::transport(format!("failed to read response body: {e}")))?;

        debug!(status, bytes = text.len(), "Task service response");
        classify_status(status, text)
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Map an HTTP status and body onto the outcome taxonomy (pure function)
pub fn classify_status(status: u16, body: String) -> IntakeResult<String> {
    match status {
        200..=299 => Ok(body),
        401 => {
            warn!("Task service rejected credential");
            Err(IntakeError::Unauthorized)
        }
        _ => {
            warn!(status, body = %body, "Task service call failed");
            Err(IntakeError::RequestFailed { status, body })
        }
    }
}
