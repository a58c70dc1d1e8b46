//! Axum framework adapters for the zero-cost HTTP traits.
//!
//! This module implements `AuthRequest` and `AuthResponseBuilder` for Axum's types
//! using newtype wrappers to avoid the orphan rule, while maintaining zero runtime cost.
//!
//! # Architecture
//!
//! The traits are defined in `keel_core`, and we implement them here using
//! newtype wrappers:
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  keel_core::AuthRequest (trait)            │
//! └────────────────┬───────────────────────────┘
//!                  │
//!                  ▼
//! ┌────────────────────────────────────────────┐
//! │  AxumRequest(axum::Request)                │
//! │  impl AuthRequest for AxumRequest { }      │  ← Zero cost!
//! └────────────────────────────────────────────┘
//! ```

use axum::body::{Body, Bytes};
use axum::extract::Request as AxumExtractRequest;
use axum::http::{Response, StatusCode};
use keel_core::{AccountError, AuthRequest, AuthResponseBuilder};
use serde::Serialize;

/// Upper bound on a request body read into memory.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Newtype wrapper around Axum's Request type.
///
/// This wrapper is zero-cost (repr(transparent)) and allows us to implement
/// `keel_core::AuthRequest` without violating the orphan rule.
#[repr(transparent)]
pub struct AxumRequest(pub AxumExtractRequest);

impl From<AxumExtractRequest> for AxumRequest {
    fn from(req: AxumExtractRequest) -> Self {
        AxumRequest(req)
    }
}

impl From<AxumRequest> for AxumExtractRequest {
    fn from(wrapper: AxumRequest) -> Self {
        wrapper.0
    }
}

impl AxumRequest {
    /// Consume the request and buffer its body.
    pub async fn into_body_bytes(self) -> Result<Bytes, AccountError> {
        axum::body::to_bytes(self.0.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|e| AccountError::ValidationFailure(format!("Invalid request body: {e}")))
    }
}

/// Delegates to Axum's existing accessors without any allocation or copying.
impl AuthRequest for AxumRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.headers().get(name)?.to_str().ok()
    }

    fn method(&self) -> &str {
        self.0.method().as_str()
    }

    fn path(&self) -> &str {
        self.0.uri().path()
    }
}

/// Newtype wrapper around Axum's response builder.
pub struct AxumResponseBuilder {
    builder: axum::http::response::Builder,
    body: Option<String>,
}

impl AxumResponseBuilder {
    /// Create a new Axum response builder
    pub fn new() -> Self {
        Self {
            builder: Response::builder(),
            body: None,
        }
    }
}

impl Default for AxumResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthResponseBuilder for AxumResponseBuilder {
    type Response = Response<Body>;

    fn status(mut self, code: u16) -> Self {
        self.builder = self.builder.status(code);
        self
    }

    fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    fn json_body<T: Serialize>(mut self, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(json) => {
                self.builder = self.builder.header("content-type", "application/json");
                self.body = Some(json);
            }
            Err(e) => tracing::error!(error = %e, "Failed to serialize response body"),
        }
        self
    }

    fn build(self) -> Self::Response {
        let body = self.body.unwrap_or_default();
        self.builder.body(Body::from(body)).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to build response");
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        })
    }
}

/// Helper function to create an Axum response builder
///
/// This is a convenience function for use in route handlers:
///
/// ```ignore
/// use keel_axum::response_builder;
///
/// async fn preflight() -> Response {
///     handlers::handle_preflight(response_builder())
/// }
/// ```
pub fn response_builder() -> AxumResponseBuilder {
    AxumResponseBuilder::new()
}
