//! Framework-agnostic account handlers.
//!
//! These handlers contain the request/response logic without any framework dependencies.
//! Framework-specific routes (Axum, Actix, etc.) extract the bearer token and body from
//! requests, call these handlers, and get a framework response back through the
//! `AuthResponseBuilder` they pass in.

pub mod change_password;
pub mod invalidation;
pub mod preflight;
pub mod self_deletion;

pub use change_password::{PasswordChangeRequest, handle_change_password};
pub use invalidation::handle_invalidation;
pub use preflight::handle_preflight;
pub use self_deletion::handle_self_deletion;

use keel_core::AccountError;
use serde::de::DeserializeOwned;

/// Parse a JSON request body into its typed schema.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, AccountError> {
    serde_json::from_slice(body)
        .map_err(|e| AccountError::ValidationFailure(format!("Invalid request body: {e}")))
}
