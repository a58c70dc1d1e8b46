use thiserror::Error;

use crate::{
    domain::password::PasswordError,
    ports::{
        repositories::{ObjectStoreError, ProfileStoreError},
        services::AuthApiError,
    },
};

pub const INVALID_OLD_PASSWORD: &str = "Invalid old password";

/// Error taxonomy of the account-lifecycle flows.
///
/// Every variant is reported to the caller as `{"error": <message>}`.
#[derive(Debug, Error, PartialEq)]
pub enum AccountError {
    /// Missing or invalid bearer token.
    #[error("{0}")]
    Unauthenticated(String),

    /// The old secret does not match the stored credential.
    #[error("Invalid old password")]
    InvalidCredential,

    /// An external platform call returned an error.
    #[error("{0}")]
    UpstreamFailure(String),

    #[error("{0}")]
    ValidationFailure(String),
}

impl AccountError {
    /// HTTP status reported for this error.
    ///
    /// Always 400: caller errors and infrastructure failures are not
    /// distinguished on the wire.
    pub fn status_code(&self) -> u16 {
        400
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }
}

impl From<AuthApiError> for AccountError {
    fn from(error: AuthApiError) -> Self {
        match error {
            AuthApiError::InvalidToken(msg) => AccountError::Unauthenticated(msg),
            AuthApiError::UserNotFound(msg)
            | AuthApiError::Rejected(msg)
            | AuthApiError::UnexpectedError(msg) => AccountError::UpstreamFailure(msg),
        }
    }
}

impl From<ProfileStoreError> for AccountError {
    fn from(error: ProfileStoreError) -> Self {
        AccountError::UpstreamFailure(error.to_string())
    }
}

impl From<ObjectStoreError> for AccountError {
    fn from(error: ObjectStoreError) -> Self {
        AccountError::UpstreamFailure(error.to_string())
    }
}

impl From<PasswordError> for AccountError {
    fn from(error: PasswordError) -> Self {
        AccountError::ValidationFailure(error.to_string())
    }
}
