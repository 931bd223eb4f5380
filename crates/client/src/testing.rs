//! In-memory transport for tests
//!
//! Routes are matched on method plus the path up to `?`, so a single route
//! answers every page of a list. Routes can be replaced while a client holds
//! the transport, which lets a test script "before" and "after" responses
//! around an action.

use std::sync::Mutex;

use async_trait::async_trait;
use cadence_core::{DeskError, DeskResult};
use serde_json::Value;

use crate::transport::{Method, RawResponse, Transport};

/// A request seen by the stub
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    /// Full path including the query string
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum Reply {
    Response(RawResponse),
    Failure(String),
}

#[derive(Debug, Clone)]
struct Route {
    method: Method,
    path: String,
    reply: Reply,
}

/// Scripted [`Transport`]; unmatched requests get a 404
#[derive(Debug, Default)]
pub struct StubTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and `body`, replacing any earlier route
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.set_route(method, path, Reply::Response(RawResponse::new(status, body)));
    }

    /// Fail `method path` at the network level
    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.set_route(method, path, Reply::Failure(message.to_string()));
    }

    /// Builder form of [`respond`](Self::respond)
    pub fn with(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.respond(method, path, status, body);
        self
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Requests whose path (before `?`) equals `path`
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| route_key(&r.path) == path)
            .collect()
    }

    /// Forget the recorded requests
    pub fn clear_requests(&self) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.clear();
        }
    }

    fn set_route(&self, method: Method, path: &str, reply: Reply) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.retain(|r| !(r.method == method && r.path == path));
            routes.push(Route {
                method,
                path: path.to_string(),
                reply,
            });
        }
    }
}

fn route_key(path: &str) -> &str {
    path.split_once('?').map(|(p, _)| p).unwrap_or(path)
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> DeskResult<RawResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                method,
                path: path.to_string(),
                body,
            });
        }

        let reply = self.routes.lock().ok().and_then(|routes| {
            routes
                .iter()
                .find(|r| r.method == method && r.path == route_key(path))
                .map(|r| r.reply.clone())
        });

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(DeskError::request(message)),
            None => Ok(RawResponse::new(404, Value::Null)),
        }
    }
}
