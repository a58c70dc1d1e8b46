//! Axum-specific route handlers.
//!
//! Each route answers both `POST` and `OPTIONS`: preflights get the empty CORS
//! answer, everything else is read into a bearer token and a body and passed to
//! the framework-agnostic handler.

pub mod change_password;
pub mod invalidation;
pub mod self_deletion;

pub use change_password::{PasswordState, change_password};
pub use invalidation::{InvalidationState, invalidate_user};
pub use self_deletion::{SelfDeletionState, delete_self};
