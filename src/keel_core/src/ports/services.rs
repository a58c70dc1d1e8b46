use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    access_token::AccessToken, anonymized_contact::AnonymizedContact, identity::Identity,
    password::Password, user_id::UserId,
};

// Authentication subsystem ports and errors
#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("{0}")]
    InvalidToken(String),
    #[error("{0}")]
    UserNotFound(String),
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    UnexpectedError(String),
}

impl PartialEq for AuthApiError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::InvalidToken(_), Self::InvalidToken(_))
                | (Self::UserNotFound(_), Self::UserNotFound(_))
                | (Self::Rejected(_), Self::Rejected(_))
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve_identity(&self, token: &AccessToken) -> Result<Identity, AuthApiError>;
}

/// Trusted comparison of a secret against the stored credential, evaluated in
/// the caller's own scope.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify_credential(
        &self,
        identity: &Identity,
        secret: &Password,
    ) -> Result<bool, AuthApiError>;
}

/// Operations that require the elevated-privilege credential.
#[async_trait]
pub trait AdminAuthApi: Send + Sync {
    async fn set_credential(
        &self,
        user_id: &UserId,
        new_secret: &Password,
    ) -> Result<(), AuthApiError>;
    async fn delete_account(&self, user_id: &UserId) -> Result<(), AuthApiError>;
    async fn anonymize_contact(
        &self,
        user_id: &UserId,
        contact: &AnonymizedContact,
    ) -> Result<(), AuthApiError>;
}

// Remote account operations invoked by the client surface
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait AccountGateway: Send + Sync {
    async fn change_password(
        &self,
        token: &AccessToken,
        old_password: &Password,
        new_password: &Password,
    ) -> Result<(), GatewayError>;
    async fn delete_account(&self, token: &AccessToken) -> Result<(), GatewayError>;
    async fn sign_out(&self, token: &AccessToken) -> Result<(), GatewayError>;
}
