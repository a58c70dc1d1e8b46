use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    access_token::AccessToken,
    object_namespace::{ObjectName, ObjectNamespace},
    profile::{Profile, ProfilePatch, ProfileUpsert},
    user_id::UserId,
};

/// Whose authority a storage call runs under.
///
/// `Caller` calls are subject to row-level security for the token's identity;
/// `Service` calls use the elevated-privilege key.
#[derive(Debug, Clone, Copy)]
pub enum AccessScope<'a> {
    Caller(&'a AccessToken),
    Service,
}

// ProfileStore port trait and errors
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("{0}")]
    ConstraintViolation(String),
    #[error("{0}")]
    UnexpectedError(String),
}

impl PartialEq for ProfileStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ConstraintViolation(_), Self::ConstraintViolation(_))
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn upsert(
        &self,
        scope: AccessScope<'_>,
        row: &ProfileUpsert,
    ) -> Result<(), ProfileStoreError>;
    async fn select_one(
        &self,
        scope: AccessScope<'_>,
        id: &UserId,
    ) -> Result<Option<Profile>, ProfileStoreError>;
    async fn update(
        &self,
        scope: AccessScope<'_>,
        id: &UserId,
        fields: &ProfilePatch,
    ) -> Result<(), ProfileStoreError>;
}

// ObjectStore port trait and errors
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("{0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list(
        &self,
        scope: AccessScope<'_>,
        namespace: &ObjectNamespace,
    ) -> Result<Vec<ObjectName>, ObjectStoreError>;
    async fn remove_many(
        &self,
        scope: AccessScope<'_>,
        namespace: &ObjectNamespace,
        names: &[ObjectName],
    ) -> Result<(), ObjectStoreError>;
}
