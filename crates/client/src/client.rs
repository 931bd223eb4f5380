//! REST client
//!
//! [`ApiClient`] turns resource-level operations (list, total count,
//! statistics, create, action, update, get one) into transport calls and
//! applies the response contract:
//!
//! - reads succeed on any 2xx status and yield `ApiResponse { data }`
//! - a list read always has a total-count sibling under
//!   `/api/<resource>/statistics/total-count`
//! - writes succeed only on status 200; everything else (201 included) is a
//!   [`DeskError::WriteFailed`]

use std::sync::Arc;

use cadence_core::{CountRequest, DeskError, DeskResult, FetchRequest, build_filter_query, build_query};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::transport::{Method, RawResponse, ReqwestTransport, Transport};

// ============================================================================
// Response Shapes
// ============================================================================

/// Envelope every successful operation returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Payload of a total-count read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalCount {
    pub count: u64,
}

/// Payload of a successful create: the server-assigned identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    pub id: String,
}

#[derive(Deserialize)]
struct CountBody {
    #[serde(default)]
    count: Option<u64>,
}

// ============================================================================
// Client
// ============================================================================

/// Typed access to the backend over a [`Transport`]
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client owning `transport`
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Create a client over a shared transport
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a `reqwest`-backed client from configuration
    pub fn from_config(config: &ClientConfig) -> DeskResult<Self> {
        config.validate()?;
        let mut transport = ReqwestTransport::new(&config.base_url);
        if let Some(token) = &config.token {
            transport = transport.with_token(token);
        }
        Ok(Self::new(transport))
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// `GET /api/<resource>?<query>`
    pub async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        request: &FetchRequest,
    ) -> DeskResult<ApiResponse<Vec<T>>> {
        let path = build_query(&resource_path(resource), request);
        let body = self.read(&path).await?;
        if body.is_null() {
            return Ok(ApiResponse::new(Vec::new()));
        }
        Ok(ApiResponse::new(decode(body)?))
    }

    /// `GET /api/<resource>/statistics/total-count?<filters>`
    ///
    /// A missing or null `count` reads as zero.
    pub async fn total_count(
        &self,
        resource: &str,
        request: &CountRequest,
    ) -> DeskResult<ApiResponse<TotalCount>> {
        let base = format!("{}/statistics/total-count", resource_path(resource));
        let body = self.read(&build_filter_query(&base, request)).await?;
        let count = if body.is_null() {
            0
        } else {
            decode::<CountBody>(body)?.count.unwrap_or(0)
        };
        Ok(ApiResponse::new(TotalCount { count }))
    }

    /// `GET /api/<resource>/statistics`
    pub async fn statistics<T: DeserializeOwned + Default>(
        &self,
        resource: &str,
    ) -> DeskResult<ApiResponse<T>> {
        let body = self
            .read(&format!("{}/statistics", resource_path(resource)))
            .await?;
        if body.is_null() {
            return Ok(ApiResponse::new(T::default()));
        }
        Ok(ApiResponse::new(decode(body)?))
    }

    /// `GET /api/<resource>/<id>`
    pub async fn get_one<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: &str,
    ) -> DeskResult<ApiResponse<T>> {
        let body = self
            .read(&format!("{}/{}", resource_path(resource), id))
            .await?;
        Ok(ApiResponse::new(decode(body)?))
    }

    /// `GET /api/<resource>` without paging
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        resource: &str,
    ) -> DeskResult<ApiResponse<Vec<T>>> {
        let body = self.read(&resource_path(resource)).await?;
        if body.is_null() {
            return Ok(ApiResponse::new(Vec::new()));
        }
        Ok(ApiResponse::new(decode(body)?))
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    /// `POST /api/<resource>` returning the new identifier
    pub async fn create<B: Serialize + ?Sized>(
        &self,
        resource: &str,
        body: &B,
    ) -> DeskResult<ApiResponse<Created>> {
        let payload = serde_json::to_value(body)?;
        let response = self
            .write(
                Method::Post,
                &resource_path(resource),
                Some(payload),
                &format!("create {resource}"),
            )
            .await?;

        let id = created_id(&response.body).ok_or_else(|| {
            DeskError::decode(format!("create {resource} returned no identifier"))
        })?;
        tracing::info!(resource, %id, "created");
        Ok(ApiResponse::new(Created { id }))
    }

    /// `POST /api/<resource>/<subaction>/<id>` with no body
    pub async fn action(&self, resource: &str, subaction: &str, id: &str) -> DeskResult<()> {
        let path = format!("{}/{}/{}", resource_path(resource), subaction, id);
        self.write(Method::Post, &path, None, &format!("{subaction} {resource} {id}"))
            .await?;
        tracing::info!(resource, subaction, id, "action applied");
        Ok(())
    }

    /// `PUT /api/<resource>/<id>` returning the decoded entity
    pub async fn update<B, T>(
        &self,
        resource: &str,
        id: &str,
        body: &B,
    ) -> DeskResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_value(body)?;
        let path = format!("{}/{}", resource_path(resource), id);
        let response = self
            .write(Method::Put, &path, Some(payload), &format!("update {resource} {id}"))
            .await?;
        tracing::info!(resource, id, "updated");
        Ok(ApiResponse::new(decode(response.body)?))
    }

    // ------------------------------------------------------------------------
    // Response handling
    // ------------------------------------------------------------------------

    async fn read(&self, path: &str) -> DeskResult<Value> {
        let response = self.transport.send(Method::Get, path, None).await?;
        if !response.is_success() {
            tracing::debug!(path, status = response.status, "read rejected");
            return Err(DeskError::api(response.status, error_message(&response)));
        }
        Ok(response.body)
    }

    async fn write(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        operation: &str,
    ) -> DeskResult<RawResponse> {
        let response = self.transport.send(method, path, body).await?;
        if response.status != 200 {
            tracing::warn!(path, status = response.status, "write rejected");
            return Err(DeskError::write_failed(operation, response.status));
        }
        Ok(response)
    }
}

fn resource_path(resource: &str) -> String {
    format!("/api/{}", resource.trim_matches('/'))
}

fn decode<T: DeserializeOwned>(body: Value) -> DeskResult<T> {
    serde_json::from_value(body).map_err(|e| DeskError::decode(e.to_string()))
}

/// `surrogateId`, falling back to `id`; numbers are stringified
fn created_id(body: &Value) -> Option<String> {
    ["surrogateId", "id"]
        .iter()
        .filter_map(|key| body.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn error_message(response: &RawResponse) -> String {
    match &response.body {
        Value::String(text) if !text.is_empty() => text.clone(),
        Value::Object(map) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", response.status)),
        _ => format!("HTTP {}", response.status),
    }
}

// ============================================================================
// Tests
// ============================================================================
