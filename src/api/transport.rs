//! HTTP transport seam
//!
//! The gateway client talks to the network through the [`Transport`] trait so
//! the request pipeline (caching, invalidation, fallback) is testable against
//! a scripted transport. The production implementation wraps `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Per-request timeout, matching the original client's 10-second limit
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A fully prepared outgoing request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL (base URL already joined with the resource path)
    pub url: String,
    /// Token attached as `Authorization: Token <value>` when present
    pub auth_token: Option<String>,
    /// JSON request body for writes
    pub body: Option<Value>,
}

/// A raw response before classification
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

/// Network-level failures; anything that produced no HTTP status at all
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request exceeded the transport timeout
    #[error("request timed out")]
    Timeout,

    /// DNS resolution or connection failure
    #[error("connection failed: {0}")]
    Connect(String),
}

/// Dispatches a prepared request and returns the raw response.
///
/// One call, one dispatch; retries are never attempted here or above.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request, returning the response or a network-level error
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Production transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with a shared connection pool
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .timeout(REQUEST_TIMEOUT)
            .header("Content-Type", "application/json");

        if let Some(token) = &request.auth_token {
            builder = builder.header("Authorization", format!("Token {token}"));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Connect(err.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Connect(err.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted transport for pipeline tests

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Pops pre-scripted outcomes in order and records every dispatched request
    pub struct MockTransport {
        outcomes: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
        requests: Mutex<Vec<TransportRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                outcomes: Mutex::new(VecDeque::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Scripts a successful response with the given status and JSON body
        pub fn push_response(&self, status: u16, body: &Value) {
            self.outcomes
                .lock()
                .unwrap()
                .push_back(Ok(TransportResponse {
                    status,
                    body: body.to_string(),
                }));
        }

        /// Scripts a raw (possibly non-JSON) response body
        pub fn push_raw(&self, status: u16, body: &str) {
            self.outcomes
                .lock()
                .unwrap()
                .push_back(Ok(TransportResponse {
                    status,
                    body: body.to_string(),
                }));
        }

        /// Scripts a network-level failure
        pub fn push_error(&self, error: TransportError) {
            self.outcomes.lock().unwrap().push_back(Err(error));
        }

        /// Number of requests actually dispatched to this transport
        pub fn dispatch_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        /// Clone of the nth dispatched request
        pub fn request(&self, index: usize) -> TransportRequest {
            self.requests.lock().unwrap()[index].clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(
            &self,
            request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Connect("no scripted response".to_string())))
        }
    }
}
