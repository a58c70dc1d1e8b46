use keel_core::{AccountError, AdminAuthApi, CredentialVerifier, Identity, Password};

/// Change password use case - verifies the old secret, then sets the new one
/// with the elevated-privilege API.
pub struct ChangePasswordUseCase<V, A>
where
    V: CredentialVerifier,
    A: AdminAuthApi,
{
    verifier: V,
    admin: A,
}

impl<V, A> ChangePasswordUseCase<V, A>
where
    V: CredentialVerifier,
    A: AdminAuthApi,
{
    pub fn new(verifier: V, admin: A) -> Self {
        Self { verifier, admin }
    }

    /// Execute the change password use case
    ///
    /// # Arguments
    /// * `identity` - The authenticated caller
    /// * `old_password` - Secret that must match the stored credential
    /// * `new_password` - Secret to store
    ///
    /// # Returns
    /// Ok(()) once the elevated update returns without error. A failed
    /// verification call is reported as `InvalidCredential`, the same as a
    /// mismatch, and leaves the credential untouched.
    #[tracing::instrument(
        name = "ChangePasswordUseCase::execute",
        skip_all,
        fields(user_id = %identity.id())
    )]
    pub async fn execute(
        &self,
        identity: &Identity,
        old_password: Password,
        new_password: Password,
    ) -> Result<(), AccountError> {
        let matches = self
            .verifier
            .verify_credential(identity, &old_password)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Credential verification failed");
                false
            });

        if !matches {
            return Err(AccountError::InvalidCredential);
        }

        self.admin
            .set_credential(identity.id(), &new_password)
            .await?;

        tracing::info!("Password updated");
        Ok(())
    }
}
