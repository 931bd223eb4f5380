//! Service dispatch
//!
//! [`run_service`] runs one async operation and routes its outcome to exactly
//! one of two callbacks: the unwrapped payload on success, or the HTTP status
//! (when there is one) and the error on failure.

use std::future::Future;

use cadence_core::{DeskError, DeskResult};

use crate::client::ApiResponse;

/// A successful operation result that can be unwrapped for `on_success`
pub trait ServicePayload {
    type Data;

    fn into_data(self) -> Self::Data;
}

impl<T> ServicePayload for ApiResponse<T> {
    type Data = T;

    fn into_data(self) -> T {
        self.data
    }
}

impl ServicePayload for () {
    type Data = ();

    fn into_data(self) {}
}

/// Invoke `operation(args)` and route the outcome
///
/// `on_error` receives `None` as the status for failures that never reached
/// the server.
pub async fn run_service<A, R, Op, Fut, S, E>(args: A, operation: Op, on_success: S, on_error: E)
where
    Op: FnOnce(A) -> Fut,
    Fut: Future<Output = DeskResult<R>>,
    R: ServicePayload,
    S: FnOnce(R::Data),
    E: FnOnce(Option<u16>, DeskError),
{
    match operation(args).await {
        Ok(response) => on_success(response.into_data()),
        Err(error) => on_error(error.status(), error),
    }
}

// ============================================================================
// Error Handlers
// ============================================================================

/// Shared sink for routed failures
pub trait ErrorHandler: Send + Sync {
    fn handle_error(&self, status: Option<u16>, error: &DeskError);
}

impl<F> ErrorHandler for F
where
    F: Fn(Option<u16>, &DeskError) + Send + Sync,
{
    fn handle_error(&self, status: Option<u16>, error: &DeskError) {
        self(status, error)
    }
}

/// Logs routed failures through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorHandler;

impl ErrorHandler for TracingErrorHandler {
    fn handle_error(&self, status: Option<u16>, error: &DeskError) {
        match status {
            Some(401) => tracing::warn!(status = 401, "session rejected: {error}"),
            Some(status) => tracing::warn!(status, "{error}"),
            None => tracing::warn!("{error}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_success_unwraps_data() {
        let mut seen = None;
        let mut failed = false;
        run_service(
            21,
            |n: u32| async move { Ok(ApiResponse::new(n * 2)) },
            |data: u32| seen = Some(data),
            |_, _| failed = true,
        )
        .await;
        assert_eq!(seen, Some(42));
        assert!(!failed);
    }

    #[tokio::test]
    async fn test_failure_routes_status() {
        let mut routed = None;
        let mut succeeded = false;
        run_service(
            (),
            |_| async { Err::<ApiResponse<()>, _>(DeskError::api(403, "forbidden")) },
            |_| succeeded = true,
            |status, error| routed = Some((status, error.to_string())),
        )
        .await;
        assert!(!succeeded);
        assert_eq!(
            routed,
            Some((Some(403), "API error (403): forbidden".to_string()))
        );
    }

    #[tokio::test]
    async fn test_network_failure_has_sentinel_status() {
        let mut status_seen = Some(0);
        run_service(
            (),
            |_| async { Err::<(), _>(DeskError::request("connection refused")) },
            |_| {},
            |status, _| status_seen = status,
        )
        .await;
        assert_eq!(status_seen, None);
    }

    #[test]
    fn test_closure_error_handler() {
        let log = Mutex::new(Vec::new());
        let handler = |status: Option<u16>, _: &DeskError| {
            log.lock().unwrap().push(status);
        };
        handler.handle_error(Some(500), &DeskError::api(500, "boom"));
        TracingErrorHandler.handle_error(None, &DeskError::request("offline"));
        assert_eq!(*log.lock().unwrap(), vec![Some(500)]);
    }
}
