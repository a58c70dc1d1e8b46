use keel_core::{AccessScope, AccessToken, AccountGateway, GatewayError, Password};
use secrecy::ExposeSecret;
use serde::Serialize;

use super::{SupabaseClient, send};

const FUNCTIONS_PATH: &str = "/functions/v1";
pub const CHANGE_PASSWORD_FUNCTION: &str = "secure_update_password";
pub const SELF_DELETION_FUNCTION: &str = "user-self-deletion";
pub const INVALIDATION_FUNCTION: &str = "user-invalidation";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordChangePayload<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

impl SupabaseClient {
    async fn invoke<T: Serialize + ?Sized>(
        &self,
        function: &str,
        token: &AccessToken,
        body: &T,
    ) -> Result<(), GatewayError> {
        let request = self
            .http_client
            .post(self.url(&format!("{FUNCTIONS_PATH}/{function}"))?)
            .json(body);

        send(self.authorize(request, AccessScope::Caller(token))).await?;
        Ok(())
    }
}

/// The account handlers as seen from the client surface.
#[async_trait::async_trait]
impl AccountGateway for SupabaseClient {
    #[tracing::instrument(name = "Invoking password change", skip_all)]
    async fn change_password(
        &self,
        token: &AccessToken,
        old_password: &Password,
        new_password: &Password,
    ) -> Result<(), GatewayError> {
        let payload = PasswordChangePayload {
            old_password: old_password.as_ref().expose_secret(),
            new_password: new_password.as_ref().expose_secret(),
        };
        self.invoke(CHANGE_PASSWORD_FUNCTION, token, &payload).await
    }

    #[tracing::instrument(name = "Invoking self-deletion", skip_all)]
    async fn delete_account(&self, token: &AccessToken) -> Result<(), GatewayError> {
        self.invoke(SELF_DELETION_FUNCTION, token, &serde_json::json!({}))
            .await
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), GatewayError> {
        self.logout(token).await?;
        Ok(())
    }
}
