//! API gateway client for the hospital management backend
//!
//! Every outgoing request flows through [`ApiClient`], which applies four
//! cross-cutting policies invisibly to callers: auth-header injection from the
//! session store, request/response logging, a short-lived in-memory read cache
//! with write invalidation, and an opt-in mock-fixture fallback for a narrow
//! set of resources when the backend is unreachable.

mod cache;
mod client;
mod error;
mod fixtures;
mod policy;
pub mod transport;

pub use cache::ResponseCache;
pub use client::{ApiClient, FallbackMode};
pub use error::ApiError;
pub use fixtures::fixture_for;
pub use policy::{policy_for_path, Criticality, ResourcePolicy};
pub use transport::{HttpTransport, Transport, TransportError, TransportRequest, TransportResponse};
