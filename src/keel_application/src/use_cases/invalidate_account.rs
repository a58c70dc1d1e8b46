use keel_core::{
    AccessScope, AccountError, AdminAuthApi, AnonymizedContact, Identity, ProfilePatch,
    ProfileStore, UserId,
};

use crate::use_cases::authenticate::confirm_profile;

/// Invalidate account use case - anonymizes the caller's account without
/// deleting it.
///
/// The contact data in the authentication subsystem is replaced by a
/// placeholder and the profile's display fields are blanked. Both records
/// survive.
pub struct InvalidateAccountUseCase<P, A>
where
    P: ProfileStore,
    A: AdminAuthApi,
{
    profiles: P,
    admin: A,
    placeholder_domain: String,
}

impl<P, A> InvalidateAccountUseCase<P, A>
where
    P: ProfileStore,
    A: AdminAuthApi,
{
    pub fn new(profiles: P, admin: A, placeholder_domain: impl Into<String>) -> Self {
        Self {
            profiles,
            admin,
            placeholder_domain: placeholder_domain.into(),
        }
    }

    /// Execute the invalidation use case on the caller's own account.
    #[tracing::instrument(
        name = "InvalidateAccountUseCase::execute",
        skip_all,
        fields(user_id = %identity.id())
    )]
    pub async fn execute(&self, identity: &Identity) -> Result<UserId, AccountError> {
        let user_id = confirm_profile(&self.profiles, identity).await?;

        let contact = AnonymizedContact::for_user(&user_id, &self.placeholder_domain);
        self.admin.anonymize_contact(&user_id, &contact).await?;

        self.profiles
            .update(AccessScope::Service, &user_id, &ProfilePatch::cleared())
            .await?;

        tracing::info!("Account invalidated");
        Ok(user_id)
    }
}
