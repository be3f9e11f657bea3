//! In-memory gateway double for resolver tests.

use crate::error::{ClientError, ClientResult};
use crate::gateway::Gateway;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

/// Gateway double serving canned bodies by exact path, recording every
/// attempted path in order. Unrouted paths fail like a 404 would.
#[derive(Default)]
pub(crate) struct StubGateway {
    routes: Vec<(String, Value)>,
    call_log: Mutex<Vec<String>>,
    post_log: Mutex<Vec<(String, Value)>>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for GETs and POSTs of exactly `path`.
    pub fn route(mut self, path: &str, body: Value) -> Self {
        self.routes.push((path.to_string(), body));
        self
    }

    /// Every attempted path (GET and POST), in order.
    pub fn calls(&self) -> Vec<String> {
        self.call_log.lock().clone()
    }

    /// POSTed payloads, in order.
    pub fn posts(&self) -> Vec<(String, Value)> {
        self.post_log.lock().clone()
    }

    fn lookup(&self, path: &str) -> ClientResult<Value> {
        self.routes
            .iter()
            .find(|(routed, _)| routed == path)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| ClientError::Http(format!("HTTP 404 Not Found: {path}")))
    }
}

#[async_trait]
impl Gateway for StubGateway {
    async fn get_json(&self, path: &str) -> ClientResult<Value> {
        self.call_log.lock().push(path.to_string());
        self.lookup(path)
    }

    async fn post_json(&self, path: &str, body: &Value) -> ClientResult<Value> {
        self.call_log.lock().push(path.to_string());
        self.post_log.lock().push((path.to_string(), body.clone()));
        self.lookup(path)
    }
}
