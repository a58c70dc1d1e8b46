//! Framework-agnostic invalidation handler.
//!
//! Anonymizes the caller's own account. The account and its profile row are
//! kept.

use keel_application::{InvalidateAccountUseCase, authenticate_caller};
use keel_core::{
    AccessToken, AccountError, AdminAuthApi, AuthResponseBuilder, AuthResponseHelpers,
    IdentityResolver, ProfileStore, UserId,
};

pub const USER_INVALIDATED: &str = "User invalidated successfully";

/// Framework-agnostic invalidation handler.
///
/// # Arguments
/// * `placeholder_domain` - Domain of the placeholder email written over the
///   caller's address
/// * `token` - Bearer token extracted by the route, if any
/// * `builder` - HTTP response builder
pub async fn handle_invalidation<I, P, A, B>(
    resolver: I,
    profiles: P,
    admin: A,
    placeholder_domain: &str,
    token: Option<AccessToken>,
    builder: B,
) -> B::Response
where
    I: IdentityResolver,
    P: ProfileStore,
    A: AdminAuthApi,
    B: AuthResponseBuilder,
{
    match invalidate(resolver, profiles, admin, placeholder_domain, token).await {
        Ok(user_id) => {
            tracing::info!(%user_id, "Profile invalidated");
            builder.ok_message(USER_INVALIDATED)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Invalidation failed");
            builder.account_error(&e)
        }
    }
}

async fn invalidate<I, P, A>(
    resolver: I,
    profiles: P,
    admin: A,
    placeholder_domain: &str,
    token: Option<AccessToken>,
) -> Result<UserId, AccountError>
where
    I: IdentityResolver,
    P: ProfileStore,
    A: AdminAuthApi,
{
    let identity = authenticate_caller(&resolver, token.as_ref()).await?;

    InvalidateAccountUseCase::new(profiles, admin, placeholder_domain)
        .execute(&identity)
        .await
}
