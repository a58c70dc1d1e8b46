//! Framework-agnostic self-deletion handler.
//!
//! Irreversible: the caller's stored objects are removed, then the account.

use keel_application::{SelfDeletionUseCase, authenticate_caller};
use keel_core::{
    AccessToken, AccountError, AdminAuthApi, AuthResponseBuilder, AuthResponseHelpers,
    IdentityResolver, ObjectStore, ProfileStore, UserId,
};

pub const USER_DELETED: &str = "User deleted successfully";

/// Framework-agnostic self-deletion handler.
///
/// # Type Parameters
/// * `I` - Resolves the caller from the bearer token
/// * `P` - Profile store used to confirm the caller's row
/// * `O` - Object store holding the caller's files
/// * `A` - Elevated API that deletes the account
/// * `B` - Response builder for the framework being used
///
/// # Arguments
/// * `bucket` - Bucket holding the caller's avatar folder
/// * `token` - Bearer token extracted by the route, if any
/// * `builder` - HTTP response builder
pub async fn handle_self_deletion<I, P, O, A, B>(
    resolver: I,
    profiles: P,
    objects: O,
    admin: A,
    bucket: &str,
    token: Option<AccessToken>,
    builder: B,
) -> B::Response
where
    I: IdentityResolver,
    P: ProfileStore,
    O: ObjectStore,
    A: AdminAuthApi,
    B: AuthResponseBuilder,
{
    match delete_self(resolver, profiles, objects, admin, bucket, token).await {
        Ok(user_id) => {
            tracing::info!(%user_id, "User and files deleted");
            builder.ok_message(USER_DELETED)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Self-deletion failed");
            builder.account_error(&e)
        }
    }
}

async fn delete_self<I, P, O, A>(
    resolver: I,
    profiles: P,
    objects: O,
    admin: A,
    bucket: &str,
    token: Option<AccessToken>,
) -> Result<UserId, AccountError>
where
    I: IdentityResolver,
    P: ProfileStore,
    O: ObjectStore,
    A: AdminAuthApi,
{
    let identity = authenticate_caller(&resolver, token.as_ref()).await?;

    SelfDeletionUseCase::new(profiles, objects, admin, bucket)
        .execute(&identity)
        .await
}
