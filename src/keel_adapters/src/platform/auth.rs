use keel_core::{
    AccessScope, AccessToken, AdminAuthApi, AnonymizedContact, AuthApiError, CredentialVerifier,
    Identity, IdentityResolver, Password, UserId,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PlatformError, SupabaseClient, send};

const USER_PATH: &str = "/auth/v1/user";
const LOGOUT_PATH: &str = "/auth/v1/logout";
const ADMIN_USERS_PATH: &str = "/auth/v1/admin/users";
const VERIFY_PASSWORD_RPC: &str = "/rest/v1/rpc/verify_user_password";

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
    email: Option<String>,
}

#[derive(Serialize)]
struct PasswordPayload<'a> {
    password: &'a str,
}

impl SupabaseClient {
    fn admin_user_path(user_id: &UserId) -> String {
        format!("{ADMIN_USERS_PATH}/{user_id}")
    }

    /// Invalidate the caller's session.
    #[tracing::instrument(name = "Signing out", skip_all)]
    pub async fn logout(&self, token: &AccessToken) -> Result<(), PlatformError> {
        let request = self.http_client.post(self.url(LOGOUT_PATH)?);
        send(self.authorize(request, AccessScope::Caller(token))).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IdentityResolver for SupabaseClient {
    #[tracing::instrument(name = "Resolving caller identity", skip_all)]
    async fn resolve_identity(&self, token: &AccessToken) -> Result<Identity, AuthApiError> {
        let request = self.http_client.get(self.url(USER_PATH)?);

        let response = send(self.authorize(request, AccessScope::Caller(token)))
            .await
            .map_err(|e| match e.status() {
                Some(status) if (400..500).contains(&status) => {
                    AuthApiError::InvalidToken(e.to_string())
                }
                _ => AuthApiError::from(e),
            })?;

        let user: UserResponse = response
            .json()
            .await
            .map_err(|e| AuthApiError::UnexpectedError(e.to_string()))?;

        Ok(Identity::new(UserId::from(user.id), user.email, token.clone()))
    }
}

#[async_trait::async_trait]
impl CredentialVerifier for SupabaseClient {
    #[tracing::instrument(name = "Verifying credential", skip_all, fields(user_id = %identity.id()))]
    async fn verify_credential(
        &self,
        identity: &Identity,
        secret: &Password,
    ) -> Result<bool, AuthApiError> {
        let request = self
            .http_client
            .post(self.url(VERIFY_PASSWORD_RPC)?)
            .json(&PasswordPayload {
                password: secret.as_ref().expose_secret(),
            });

        let response = send(self.authorize(request, AccessScope::Caller(identity.access_token())))
            .await?;

        response
            .json::<bool>()
            .await
            .map_err(|e| AuthApiError::UnexpectedError(e.to_string()))
    }
}

#[async_trait::async_trait]
impl AdminAuthApi for SupabaseClient {
    #[tracing::instrument(name = "Setting credential", skip_all, fields(user_id = %user_id))]
    async fn set_credential(
        &self,
        user_id: &UserId,
        new_secret: &Password,
    ) -> Result<(), AuthApiError> {
        let request = self
            .http_client
            .put(self.url(&Self::admin_user_path(user_id))?)
            .json(&PasswordPayload {
                password: new_secret.as_ref().expose_secret(),
            });

        send(self.authorize(request, AccessScope::Service)).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Deleting account", skip_all, fields(user_id = %user_id))]
    async fn delete_account(&self, user_id: &UserId) -> Result<(), AuthApiError> {
        let request = self
            .http_client
            .delete(self.url(&Self::admin_user_path(user_id))?);

        send(self.authorize(request, AccessScope::Service)).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Anonymizing contact", skip_all, fields(user_id = %user_id))]
    async fn anonymize_contact(
        &self,
        user_id: &UserId,
        contact: &AnonymizedContact,
    ) -> Result<(), AuthApiError> {
        let request = self
            .http_client
            .put(self.url(&Self::admin_user_path(user_id))?)
            .json(contact);

        send(self.authorize(request, AccessScope::Service)).await?;
        Ok(())
    }
}
