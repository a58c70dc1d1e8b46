use keel_core::{
    AccessScope, AccessToken, AccountError, Identity, IdentityResolver, ProfileStore, UserId,
};

pub const MISSING_AUTHORIZATION: &str = "Missing authorization header";
pub const UNKNOWN_SUBJECT: &str = "invalid JWT: user from sub claim in JWT does not exist";

/// Resolve the caller behind a bearer token.
///
/// A missing token and a token the authentication subsystem rejects both fail
/// with `AccountError::Unauthenticated`.
#[tracing::instrument(name = "authenticate_caller", skip_all)]
pub async fn authenticate_caller<I>(
    resolver: &I,
    token: Option<&AccessToken>,
) -> Result<Identity, AccountError>
where
    I: IdentityResolver,
{
    let token =
        token.ok_or_else(|| AccountError::Unauthenticated(MISSING_AUTHORIZATION.to_string()))?;

    let identity = resolver.resolve_identity(token).await?;
    tracing::debug!(user_id = %identity.id(), "Caller resolved");

    Ok(identity)
}

/// Look up the caller's own profile row, inside the caller's scope, and return
/// its id.
///
/// This confirms the identity against the relational store; it grants no
/// authority beyond the token's. A token whose subject has no row any more is
/// `Unauthenticated`: a locally validated token outlives its deleted account.
#[tracing::instrument(name = "confirm_profile", skip_all, fields(user_id = %identity.id()))]
pub async fn confirm_profile<P>(profiles: &P, identity: &Identity) -> Result<UserId, AccountError>
where
    P: ProfileStore,
{
    let profile = profiles
        .select_one(AccessScope::Caller(identity.access_token()), identity.id())
        .await?
        .ok_or_else(|| AccountError::Unauthenticated(UNKNOWN_SUBJECT.to_string()))?;

    Ok(profile.id)
}
