//! # Cadence Client
//!
//! REST access for Cadence Desk.
//!
//! - **Transport**: the `Transport` seam and its `reqwest` implementation
//! - **Client**: `ApiClient` and the `{ data }` response contract
//! - **Resources**: calls, mailings, contacts, cadences, users
//! - **Service**: `run_service` dispatch and error handlers
//! - **Config**: `ClientConfig` loaded from TOML
//!
//! ## Example
//!
//! ```rust,ignore
//! use cadence_client::{ApiClient, ClientConfig, resources::{CallsApi, ListResource}};
//! use cadence_core::FetchRequest;
//!
//! let client = ApiClient::from_config(&ClientConfig::default())?;
//! let calls = CallsApi::new(client).list(FetchRequest::new(0, 10)).await?;
//! ```

pub mod client;
pub mod config;
pub mod resources;
pub mod service;
pub mod transport;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use client::{ApiClient, ApiResponse, Created, TotalCount};
pub use config::ClientConfig;
pub use resources::ListResource;
pub use service::{ErrorHandler, ServicePayload, TracingErrorHandler, run_service};
pub use transport::{Method, RawResponse, ReqwestTransport, Transport};
