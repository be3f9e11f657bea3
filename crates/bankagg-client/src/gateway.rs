//! HTTP gateway to the remote account service.
//!
//! All traffic goes through the [`Gateway`] trait so the resolvers can be
//! driven by an in-memory double in tests. The real implementation wraps
//! reqwest and attaches the bearer token from the session store whenever
//! one is present.

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use bankagg_session::SessionStore;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON request transport, relative to the API base URL.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// GET `path` and parse the JSON body.
    async fn get_json(&self, path: &str) -> ClientResult<Value>;

    /// POST `body` to `path` and parse the JSON response.
    async fn post_json(&self, path: &str, body: &Value) -> ClientResult<Value>;
}

/// reqwest-backed gateway.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl HttpGateway {
    /// Create a gateway for `base_url` (e.g. "https://localhost:7250/api").
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Http(format!("Failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.client.request(method, url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn execute(&self, request: RequestBuilder) -> ClientResult<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Http(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Http(format!("HTTP {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Http(format!("Failed to parse response: {e}")))
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn get_json(&self, path: &str) -> ClientResult<Value> {
        debug!(%path, "GET");
        self.execute(self.request(Method::GET, path)).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> ClientResult<Value> {
        debug!(%path, "POST");
        self.execute(self.request(Method::POST, path).json(body)).await
    }
}
