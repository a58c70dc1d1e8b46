pub mod domain;
pub mod http_abstraction;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    access_token::AccessToken,
    account_error::{AccountError, INVALID_OLD_PASSWORD},
    anonymized_contact::AnonymizedContact,
    identity::Identity,
    object_namespace::{ObjectName, ObjectNamespace},
    password::{Password, PasswordError},
    profile::{Profile, ProfilePatch, ProfileUpsert},
    user_id::{UserId, UserIdError},
};

pub use ports::{
    repositories::{AccessScope, ObjectStore, ObjectStoreError, ProfileStore, ProfileStoreError},
    services::{
        AccountGateway, AdminAuthApi, AuthApiError, CredentialVerifier, GatewayError,
        IdentityResolver,
    },
};

pub use http_abstraction::{
    AuthRequest, AuthResponseBuilder, AuthResponseHelpers, CORS_ALLOW_HEADERS, CORS_ALLOW_ORIGIN,
    ErrorResponse, MessageResponse,
};
