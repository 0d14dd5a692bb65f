//! Thin client adapter over the managed GraphQL endpoint.
//!
//! The adapter exposes `query` for reads and `mutate` for writes; the
//! credential scheme is selected per call through [`AuthMode`] because the
//! feed is readable anonymously while writes require an authenticated
//! identity. No retry policy is implemented: a failed call surfaces its
//! error directly to the caller for display.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::{AppError, GraphQlErrorEntry, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Selector for which credential scheme authorizes a given API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Anonymous access via the API key (reads)
    ApiKey,
    /// Authenticated user-pool identity, carrying its access token (writes)
    UserPool(String),
}

/// Query/mutation interface handlers depend on, so tests can substitute a
/// scripted implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// Execute a read operation. Reads are anonymous (API key).
    async fn query(&self, document: &str, variables: Value) -> Result<Value>;

    /// Execute a write operation with the given credential scheme.
    async fn mutate(&self, document: &str, variables: Value, auth: AuthMode) -> Result<Value>;
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorEntry>>,
}

/// Client for the managed GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn send(&self, document: &str, variables: Value, auth: AuthMode) -> Result<Value> {
        let request = self.http.post(&self.endpoint).json(&GraphQlRequest {
            query: document,
            variables,
        });

        let request = match &auth {
            AuthMode::ApiKey => request.header("x-api-key", &self.api_key),
            AuthMode::UserPool(token) => request.bearer_auth(token),
        };

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        let envelope: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("Malformed response (HTTP {status}): {e}")))?;

        envelope_to_result(envelope, status.as_u16())
    }
}

/// Partial or full GraphQL errors win over any data in the envelope; an
/// empty envelope is a transport-level failure.
fn envelope_to_result(envelope: GraphQlResponse, http_status: u16) -> Result<Value> {
    if let Some(errors) = envelope.errors {
        if !errors.is_empty() {
            return Err(AppError::GraphQl(errors));
        }
    }

    envelope
        .data
        .ok_or_else(|| AppError::Network(format!("Response carried no data (HTTP {http_status})")))
}

#[async_trait]
impl GraphApi for ApiClient {
    async fn query(&self, document: &str, variables: Value) -> Result<Value> {
        self.send(document, variables, AuthMode::ApiKey).await
    }

    async fn mutate(&self, document: &str, variables: Value, auth: AuthMode) -> Result<Value> {
        self.send(document, variables, auth).await
    }
}
