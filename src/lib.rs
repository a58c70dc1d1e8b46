//! # Keel - Account Lifecycle Service Library
//!
//! This is a facade crate that re-exports all public APIs from the account service components.
//! Use this crate to get access to password change, self-deletion and invalidation in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! keel = { path = "../keel" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `UserId`, `Password`, `Profile`, `AccessToken`, etc.
//! - **Ports**: `ProfileStore`, `ObjectStore`, `IdentityResolver`, `AdminAuthApi`, etc.
//! - **Use cases**: `ChangePasswordUseCase`, `SelfDeletionUseCase`, `ProfileEditor`, etc.
//! - **Adapters**: `SupabaseClient`, `PostgresProfileStore`, the in-memory stores
//! - **Service**: `AccountService` - The main entry point for the account service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use keel_core::*;
}

pub use keel_core::{
    AccessToken, AccountError, AnonymizedContact, Identity, ObjectName, ObjectNamespace, Password,
    PasswordError, Profile, ProfilePatch, ProfileUpsert, UserId,
};

// ============================================================================
// Ports
// ============================================================================

/// Storage ports
pub mod repositories {
    pub use keel_core::{
        AccessScope, ObjectStore, ObjectStoreError, ProfileStore, ProfileStoreError,
    };
}

pub use keel_core::{
    AccessScope, AccountGateway, AdminAuthApi, AuthApiError, CredentialVerifier, GatewayError,
    IdentityResolver, ObjectStore, ObjectStoreError, ProfileStore, ProfileStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use keel_application::*;
}

pub use keel_application::{
    ChangePasswordUseCase, InvalidateAccountUseCase, Notice, ProfileEditor, ProfileForm,
    SelfDeletionUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Framework-agnostic request handlers
    pub mod handlers {
        pub use keel_adapters::handlers::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use keel_adapters::persistence::*;
    }

    /// Hosted platform client
    pub mod platform {
        pub use keel_adapters::platform::*;
    }

    /// JWT authentication utilities
    pub mod auth {
        pub use keel_adapters::auth_validation::*;
    }

    /// Configuration
    pub mod config {
        pub use keel_adapters::config::*;
    }

    /// Axum integration
    pub mod axum {
        pub use keel_axum::*;
    }
}

pub use keel_adapters::{
    HashMapAuthStore, HashMapObjectStore, HashMapProfileStore, JwtIdentityResolver,
    JwtValidationConfig, PostgresProfileStore, SupabaseClient,
};

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

/// Main account service
pub use keel_service::AccountService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the ports
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
