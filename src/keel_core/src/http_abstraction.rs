//! Zero-cost HTTP abstraction traits for the account handlers.
//!
//! This module defines trait-based HTTP abstractions that frameworks implement directly
//! on their own types (via newtype wrappers), avoiding any allocation or copying overhead.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  keel_core: Defines HTTP traits          │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  keel_axum: Newtype wrappers             │
//! │  struct AxumRequest(axum::Request)       │
//! │  impl AuthRequest for AxumRequest { }    │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  keel_adapters::handlers use the traits  │
//! │  (generic over framework)                │
//! └──────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{access_token::AccessToken, account_error::AccountError};

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Success body: `{"message": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure body: `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Trait for HTTP requests handled by the account handlers.
///
/// Web frameworks implement this trait on newtype wrappers of their request types.
///
/// # Implementation Notes
///
/// - Return `&str` references directly from the framework's data structures
/// - Case-insensitive header lookup should be handled by implementor
pub trait AuthRequest {
    /// Get a header value by name.
    ///
    /// Returns `None` if the header doesn't exist or isn't valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Get the HTTP method (GET, POST, etc.)
    fn method(&self) -> &str;

    /// Get the request path
    fn path(&self) -> &str;

    /// The caller's bearer token from the `Authorization` header, if well formed.
    fn bearer_token(&self) -> Option<AccessToken> {
        self.header("authorization")
            .and_then(AccessToken::from_authorization_header)
    }

    fn is_preflight(&self) -> bool {
        self.method().eq_ignore_ascii_case("OPTIONS")
    }
}

/// Trait for building HTTP responses.
///
/// This follows the builder pattern, allowing method chaining:
/// ```ignore
/// builder
///     .status(200)
///     .header("content-type", "application/json")
///     .json_body(&MessageResponse::new("done"))
///     .build()
/// ```
pub trait AuthResponseBuilder: Sized {
    /// The final response type produced by this builder
    type Response;

    /// Set the HTTP status code
    fn status(self, code: u16) -> Self;

    /// Add an HTTP header
    fn header(self, name: &str, value: &str) -> Self;

    /// Serialize `body` as JSON and set `Content-Type: application/json`.
    fn json_body<T: Serialize>(self, body: &T) -> Self;

    /// Build the final response
    ///
    /// This consumes the builder and produces the framework's response type.
    fn build(self) -> Self::Response;
}

/// Helper methods for the responses every account handler produces.
///
/// Automatically implemented for all types that implement `AuthResponseBuilder`.
pub trait AuthResponseHelpers: AuthResponseBuilder {
    /// Attach the permissive CORS headers browsers need to call the handlers.
    fn with_cors(self) -> Self {
        self.header("access-control-allow-origin", CORS_ALLOW_ORIGIN)
            .header("access-control-allow-headers", CORS_ALLOW_HEADERS)
    }

    /// Empty 200 answer to a CORS preflight.
    fn preflight(self) -> Self::Response {
        self.with_cors().status(200).build()
    }

    /// 200 with `{"message": ...}`.
    fn ok_message(self, message: &str) -> Self::Response {
        self.with_cors()
            .status(200)
            .json_body(&MessageResponse::new(message))
            .build()
    }

    /// `{"error": ...}` with the status the error maps to.
    fn account_error(self, error: &AccountError) -> Self::Response {
        self.with_cors()
            .status(error.status_code())
            .json_body(&ErrorResponse {
                error: error.to_string(),
            })
            .build()
    }
}

// Blanket implementation for all AuthResponseBuilder types
impl<T: AuthResponseBuilder> AuthResponseHelpers for T {}
