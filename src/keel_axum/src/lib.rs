//! Axum integration for the keel account handlers.
//!
//! This crate provides zero-cost Axum adapters for the framework-agnostic
//! HTTP traits defined in `keel_core`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  keel_core: HTTP trait definitions       │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  keel_axum: Axum implementations         │
//! │  - AxumRequest newtype wrapper           │
//! │  - AxumResponseBuilder                   │
//! │  - Axum route handlers                   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use axum::{Router, routing::post};
//! use keel_axum::routes::{self, PasswordState};
//!
//! let app = Router::new()
//!     .route(
//!         "/secure_update_password",
//!         post(routes::change_password).options(routes::change_password),
//!     )
//!     .with_state(PasswordState::new(resolver, verifier, admin));
//! ```

pub mod adapters;
pub mod routes;

// Re-export for convenience
pub use adapters::{AxumRequest, AxumResponseBuilder, response_builder};
