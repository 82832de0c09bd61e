// Collector transport: HTTP POST of the payload, reduced to a status classification.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::models::Payload;

/// Default collector endpoint.
pub const DEFAULT_COLLECTOR_URL: &str = "https://platform-api.newrelic.com/platform/v1/metrics";

const LICENSE_HEADER: &str = "X-License-Key";

/// Outcome of one transmission, as the session's reset/retain policy sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    Success,
    BadRequest,
    /// Credential rejected; retrying can never succeed.
    Unauthorized,
    NotFound,
    MethodNotAllowed,
    PayloadTooLarge,
    ServerError,
    ServiceUnavailable,
    GatewayTimeout,
    Other(u16),
}

impl SendStatus {
    pub fn from_code(code: u16) -> Self {
        match code {
            200..=299 => SendStatus::Success,
            400 => SendStatus::BadRequest,
            401 | 403 => SendStatus::Unauthorized,
            404 => SendStatus::NotFound,
            405 => SendStatus::MethodNotAllowed,
            413 => SendStatus::PayloadTooLarge,
            500 => SendStatus::ServerError,
            503 => SendStatus::ServiceUnavailable,
            504 => SendStatus::GatewayTimeout,
            other => SendStatus::Other(other),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SendStatus::Success)
    }

    /// Only a rejected credential stops the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SendStatus::Unauthorized)
    }
}

impl std::fmt::Display for SendStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendStatus::Other(code) => write!(f, "unexpected status {}", code),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Delivers a payload to the collector. Implementations must bound their own I/O time.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: &Payload) -> SendStatus;
}

/// reqwest-backed collector client.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    license_key: String,
    verbose: bool,
}

impl HttpTransport {
    pub fn new(url: &str, license_key: &str, timeout: Duration) -> Result<Self, AgentError> {
        reqwest::Url::parse(url).map_err(|e| AgentError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            license_key: license_key.to_string(),
            verbose: false,
        })
    }

    /// Logs every payload (pretty-printed) at debug level before posting.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn encode(&self, payload: &Payload) -> Result<Vec<u8>, AgentError> {
        let body = if self.verbose {
            let pretty = serde_json::to_string_pretty(payload)?;
            debug!(operation = "post_metrics", "Posting request:\n{}", pretty);
            pretty.into_bytes()
        } else {
            serde_json::to_vec(payload)?
        };
        Ok(body)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, payload: &Payload) -> SendStatus {
        let body = match self.encode(payload) {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, operation = "encode_payload", "payload encoding failed");
                return SendStatus::BadRequest;
            }
        };

        let response = self
            .client
            .post(&self.url)
            .header(LICENSE_HEADER, &self.license_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(body)
            .send()
            .await;

        match response {
            Ok(resp) => SendStatus::from_code(resp.status().as_u16()),
            Err(e) => {
                warn!(error = %e, operation = "post_metrics", "collector request failed");
                SendStatus::ServiceUnavailable
            }
        }
    }
}
