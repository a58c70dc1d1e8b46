//! Framework-agnostic password change handler.
//!
//! The old secret is verified in the caller's own scope before the new one is
//! set with the elevated-privilege credential.

use keel_application::{ChangePasswordUseCase, authenticate_caller};
use keel_core::{
    AccessToken, AccountError, AdminAuthApi, AuthResponseBuilder, AuthResponseHelpers,
    CredentialVerifier, IdentityResolver, Password,
};
use secrecy::Secret;
use serde::Deserialize;

use super::parse_json;

pub const PASSWORD_UPDATED: &str = "Password updated successfully";

/// Body of a password change request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub old_password: Secret<String>,
    pub new_password: Secret<String>,
}

/// Framework-agnostic password change handler.
///
/// # Type Parameters
/// * `I` - Resolves the caller from the bearer token
/// * `V` - Verifies the old password in the caller's scope
/// * `A` - Elevated API that stores the new password
/// * `B` - Response builder for the framework being used
///
/// # Arguments
/// * `token` - Bearer token extracted by the route, if any
/// * `body` - Raw JSON body
/// * `builder` - HTTP response builder
///
/// # Returns
/// 200 `{"message": ...}` on success, otherwise 400 `{"error": ...}`
pub async fn handle_change_password<I, V, A, B>(
    resolver: I,
    verifier: V,
    admin: A,
    token: Option<AccessToken>,
    body: &[u8],
    builder: B,
) -> B::Response
where
    I: IdentityResolver,
    V: CredentialVerifier,
    A: AdminAuthApi,
    B: AuthResponseBuilder,
{
    match change_password(resolver, verifier, admin, token, body).await {
        Ok(()) => builder.ok_message(PASSWORD_UPDATED),
        Err(e) => {
            tracing::warn!(error = %e, "Password change failed");
            builder.account_error(&e)
        }
    }
}

async fn change_password<I, V, A>(
    resolver: I,
    verifier: V,
    admin: A,
    token: Option<AccessToken>,
    body: &[u8],
) -> Result<(), AccountError>
where
    I: IdentityResolver,
    V: CredentialVerifier,
    A: AdminAuthApi,
{
    let identity = authenticate_caller(&resolver, token.as_ref()).await?;

    let request: PasswordChangeRequest = parse_json(body)?;
    // An empty old password can never match the stored credential
    let old_password =
        Password::try_from(request.old_password).map_err(|_| AccountError::InvalidCredential)?;
    let new_password = Password::try_from(request.new_password)?;

    ChangePasswordUseCase::new(verifier, admin)
        .execute(&identity, old_password, new_password)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::RecordingBuilder;
    use crate::persistence::HashMapAuthStore;
    use keel_core::{INVALID_OLD_PASSWORD, UserId};
    use serde_json::json;

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_string())).unwrap()
    }

    async fn signed_in(store: &HashMapAuthStore) -> (UserId, AccessToken) {
        let user_id = store
            .create_account("alice@example.com", &password("old123"))
            .await
            .unwrap();
        let token = store.issue_session(&user_id).await.unwrap();
        (user_id, token)
    }

    fn body(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[tokio::test]
    async fn test_matching_old_password_updates_credential() {
        let store = HashMapAuthStore::new();
        let (_, token) = signed_in(&store).await;

        let response = handle_change_password(
            store.clone(),
            store.clone(),
            store.clone(),
            Some(token.clone()),
            &body(json!({ "oldPassword": "old123", "newPassword": "newSecure!1" })),
            RecordingBuilder::default(),
        )
        .await;

        assert_eq!(response.status, 200);
        assert_eq!(response.message().as_deref(), Some(PASSWORD_UPDATED));
        assert_eq!(
            response.header_value("access-control-allow-origin"),
            Some("*")
        );

        let identity = store.resolve_identity(&token).await.unwrap();
        assert!(
            store
                .verify_credential(&identity, &password("newSecure!1"))
                .await
                .unwrap()
        );
        assert!(
            !store
                .verify_credential(&identity, &password("old123"))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_wrong_old_password_is_rejected() {
        let store = HashMapAuthStore::new();
        let (_, token) = signed_in(&store).await;

        let response = handle_change_password(
            store.clone(),
            store.clone(),
            store.clone(),
            Some(token.clone()),
            &body(json!({ "oldPassword": "wrong", "newPassword": "x" })),
            RecordingBuilder::default(),
        )
        .await;

        assert_eq!(response.status, 400);
        assert_eq!(response.error().as_deref(), Some(INVALID_OLD_PASSWORD));

        let identity = store.resolve_identity(&token).await.unwrap();
        assert!(
            store
                .verify_credential(&identity, &password("old123"))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected_before_body_is_read() {
        let store = HashMapAuthStore::new();

        let response = handle_change_password(
            store.clone(),
            store.clone(),
            store.clone(),
            None,
            b"not json",
            RecordingBuilder::default(),
        )
        .await;

        assert_eq!(response.status, 400);
        assert_eq!(
            response.error().as_deref(),
            Some(keel_application::MISSING_AUTHORIZATION)
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_validation_failure() {
        let store = HashMapAuthStore::new();
        let (_, token) = signed_in(&store).await;

        let response = handle_change_password(
            store.clone(),
            store.clone(),
            store.clone(),
            Some(token),
            &body(json!({ "old_password": "old123" })),
            RecordingBuilder::default(),
        )
        .await;

        assert_eq!(response.status, 400);
        assert!(
            response
                .error()
                .is_some_and(|e| e.starts_with("Invalid request body"))
        );
    }

    #[tokio::test]
    async fn test_weak_new_password_reports_upstream_message() {
        let store = HashMapAuthStore::new();
        let (_, token) = signed_in(&store).await;

        let response = handle_change_password(
            store.clone(),
            store.clone(),
            store.clone(),
            Some(token),
            &body(json!({ "oldPassword": "old123", "newPassword": "x" })),
            RecordingBuilder::default(),
        )
        .await;

        assert_eq!(response.status, 400);
        assert_eq!(
            response.error().as_deref(),
            Some("Password should be at least 6 characters.")
        );
    }

    #[tokio::test]
    async fn test_empty_old_password_is_invalid_credential() {
        let store = HashMapAuthStore::new();
        let (_, token) = signed_in(&store).await;

        let response = handle_change_password(
            store.clone(),
            store.clone(),
            store.clone(),
            Some(token.clone()),
            &body(json!({ "oldPassword": "", "newPassword": "newSecure!1" })),
            RecordingBuilder::default(),
        )
        .await;

        assert_eq!(response.status, 400);
        assert_eq!(response.error().as_deref(), Some(INVALID_OLD_PASSWORD));

        let identity = store.resolve_identity(&token).await.unwrap();
        assert!(
            store
                .verify_credential(&identity, &password("old123"))
                .await
                .unwrap()
        );
    }
}
