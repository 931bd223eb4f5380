//! HTTP transport seam
//!
//! The [`ApiClient`](crate::ApiClient) never talks to `reqwest` directly; it
//! goes through the [`Transport`] trait so the list screens can be driven by
//! an in-memory transport in tests. [`ReqwestTransport`] is the production
//! implementation.
//!
//! No retries and no timeout override: a request lives as long as the
//! underlying client lets it.

use async_trait::async_trait;
use cadence_core::{DeskError, DeskResult};
use reqwest::Client;
use serde_json::Value;

// ============================================================================
// Request / Response Shapes
// ============================================================================

/// HTTP methods used by the desk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

/// A response as seen by the client: status plus decoded body
///
/// Empty bodies decode to `Value::Null`; bodies that are not JSON are kept
/// as a `Value::String`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

impl RawResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends one request and hands back the raw response
///
/// Implementations only fail for network-level problems; any HTTP status,
/// including 4xx/5xx, is a successful transport round-trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, path: &str, body: Option<Value>)
    -> DeskResult<RawResponse>;
}

// ============================================================================
// reqwest Transport
// ============================================================================

/// Production transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// The underlying reqwest HTTP client.
    client: Client,
    /// Base URL of the backend (e.g. `http://127.0.0.1:8080`).
    base_url: String,
    /// Optional bearer token attached to every request.
    token: Option<String>,
}

impl ReqwestTransport {
    /// Create a transport for `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Clear the bearer token
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for an API path
    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> DeskResult<RawResponse> {
        let url = self.url(path);
        let mut req = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
        };
        if let Some(body) = &body {
            req = req.json(body);
        }
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        tracing::debug!(method = method.as_str(), %url, "sending request");

        let response = req
            .send()
            .await
            .map_err(|e| DeskError::request(e.to_string()))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| DeskError::request(e.to_string()))?;

        Ok(RawResponse::new(status, decode_body(&bytes)))
    }
}

fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

// ============================================================================
// Tests
// ============================================================================
