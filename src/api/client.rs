//! The API gateway client
//!
//! One request pipeline applies every cross-cutting policy: auth-header
//! injection from the session store, request/response logging, read caching
//! with write invalidation, and the opt-in fixture fallback. Callers see plain
//! `get`/`post`/`patch`/`delete` over JSON payloads.
//!
//! Per call the pipeline moves through `PENDING → {CACHE_HIT, DISPATCHED}`,
//! `DISPATCHED → {SUCCEEDED, FAILED}`, `FAILED → {FALLBACK_RESOLVED,
//! PROPAGATED}`. Exactly one dispatch is attempted; fallback substitution is a
//! resolution, not a retry. Cache writes happen only on a clean success or a
//! resolved fallback.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde_json::{json, Value};

use crate::session::SessionStore;

use super::cache::ResponseCache;
use super::error::ApiError;
use super::fixtures::fixture_for;
use super::policy::{is_auth_sensitive, policy_for_path, Criticality};
use super::transport::{HttpTransport, Transport, TransportRequest, TransportResponse};

/// Whether failed reads of known resources may resolve to substitute data.
///
/// Disabled by default; fabricating data is a demo convenience and must be an
/// explicit, environment-gated choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackMode {
    /// Every failure propagates to the caller
    Disabled,
    /// Critical-resource reads may resolve to mock fixtures, non-critical
    /// reads to empty lists, per the resource policy table
    DemoFixtures,
}

/// Uniform request interface over the hospital management REST backend
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    cache: ResponseCache,
    session: Arc<SessionStore>,
    fallback: FallbackMode,
}

impl ApiClient {
    /// Creates a client over the real HTTP transport
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>, fallback: FallbackMode) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()), base_url, session, fallback)
    }

    /// Creates a client over a custom transport (used by tests)
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        session: Arc<SessionStore>,
        fallback: FallbackMode,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            cache: ResponseCache::new(),
            session,
            fallback,
        }
    }

    /// Overrides the read-cache TTL
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = ResponseCache::with_ttl(ttl);
        self
    }

    /// The shared session store this client injects tokens from
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Drops every cached read.
    ///
    /// Called around login and logout: cached listings are scoped to the role
    /// that fetched them and must not leak across sessions.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Idempotent read; consults the cache before dispatching
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, path, None).await
    }

    /// Creates a resource; invalidates related cache entries on success
    pub async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Partially updates a resource; invalidates related cache entries on success
    pub async fn patch(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// Deletes a resource; invalidates related cache entries on success
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, None).await
    }

    /// The full pipeline for one call
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let is_read = method == Method::GET;
        // The current-user probe must never be answered from a cache that
        // could outlive the session it was recorded under.
        let cacheable = is_read && !is_auth_sensitive(path);

        if cacheable {
            if let Some(hit) = self.cache.get(path) {
                tracing::debug!(%path, "cache hit");
                return Ok(hit);
            }
        }

        let request = TransportRequest {
            method: method.clone(),
            url: format!("{}{}", self.base_url, path),
            auth_token: self.session.token(),
            body,
        };
        tracing::debug!(%method, %path, "dispatching request");

        match self.transport.send(request).await {
            Ok(response) if (200..300).contains(&response.status) => {
                let value = Self::decode_body(&response)?;
                tracing::debug!(status = response.status, %path, "request succeeded");
                if cacheable {
                    self.cache.insert(path, &value);
                } else if !is_read {
                    self.invalidate_for(path);
                }
                Ok(value)
            }
            Ok(response) => {
                let error = self.classify_status(path, response);
                self.resolve_failure(is_read, path, error)
            }
            Err(transport_error) => {
                self.resolve_failure(is_read, path, ApiError::Network(transport_error.to_string()))
            }
        }
    }

    /// Parses a 2xx body into a JSON value.
    ///
    /// An empty body (204 deletes) becomes `null`. Malformed bodies are not
    /// repaired; they propagate as `Decode` and are never cached.
    fn decode_body(response: &TransportResponse) -> Result<Value, ApiError> {
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Maps a non-2xx response to the error taxonomy
    fn classify_status(&self, path: &str, response: TransportResponse) -> ApiError {
        match response.status {
            400 => ApiError::validation_from_body(&response.body),
            401 | 403 => {
                // A rejected token on a data endpoint means the session is dead.
                if response.status == 401 && !is_auth_sensitive(path) {
                    tracing::warn!(%path, "401 on non-auth endpoint, clearing session");
                    self.session.clear();
                }
                ApiError::Auth {
                    status: response.status,
                    detail: ApiError::auth_detail_from_body(&response.body),
                }
            }
            404 => ApiError::NotFound {
                path: path.to_string(),
            },
            status => ApiError::Server {
                status,
                body: response.body,
            },
        }
    }

    /// Decides between fallback resolution and propagation for a failed call
    fn resolve_failure(
        &self,
        is_read: bool,
        path: &str,
        error: ApiError,
    ) -> Result<Value, ApiError> {
        if !is_read || self.fallback == FallbackMode::Disabled || is_auth_sensitive(path) {
            return Err(error);
        }

        let Some(policy) = policy_for_path(path) else {
            return Err(error);
        };

        match (policy.criticality, &error) {
            (Criticality::Critical, ApiError::NotFound { .. } | ApiError::Network(_)) => {
                if let Some(fixture) = fixture_for(policy.name) {
                    tracing::warn!(resource = policy.name, %path, "substituting mock fixture");
                    // Cache the substitute so subsequent reads stay consistent
                    // until TTL expiry.
                    self.cache.insert(path, &fixture);
                    return Ok(fixture);
                }
                Err(error)
            }
            (Criticality::NonCritical, ApiError::NotFound { .. }) => {
                tracing::warn!(resource = policy.name, %path, "substituting empty result");
                Ok(json!([]))
            }
            _ => Err(error),
        }
    }

    /// Purges cached reads related to a successfully mutated resource
    fn invalidate_for(&self, path: &str) {
        if let Some(policy) = policy_for_path(path) {
            for prefix in policy.invalidates {
                let removed = self.cache.purge_containing(prefix);
                if removed > 0 {
                    tracing::debug!(prefix, removed, "invalidated cache entries");
                }
            }
        }
    }
}
