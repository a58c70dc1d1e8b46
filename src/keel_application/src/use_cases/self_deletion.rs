use keel_core::{
    AccessScope, AccountError, AdminAuthApi, Identity, ObjectNamespace, ObjectStore, ProfileStore,
    UserId,
};

use crate::use_cases::authenticate::confirm_profile;

/// Self-deletion use case - removes the caller's stored objects, then the
/// caller's account.
///
/// Objects always go first. If the account removal fails afterwards the
/// objects are not restored.
pub struct SelfDeletionUseCase<P, O, A>
where
    P: ProfileStore,
    O: ObjectStore,
    A: AdminAuthApi,
{
    profiles: P,
    objects: O,
    admin: A,
    bucket: String,
}

impl<P, O, A> SelfDeletionUseCase<P, O, A>
where
    P: ProfileStore,
    O: ObjectStore,
    A: AdminAuthApi,
{
    pub fn new(profiles: P, objects: O, admin: A, bucket: impl Into<String>) -> Self {
        Self {
            profiles,
            objects,
            admin,
            bucket: bucket.into(),
        }
    }

    /// Execute the self-deletion use case
    ///
    /// # Arguments
    /// * `identity` - The authenticated caller
    ///
    /// # Returns
    /// The id of the deleted account, or the first error encountered
    #[tracing::instrument(
        name = "SelfDeletionUseCase::execute",
        skip_all,
        fields(user_id = %identity.id())
    )]
    pub async fn execute(&self, identity: &Identity) -> Result<UserId, AccountError> {
        let user_id = confirm_profile(&self.profiles, identity).await?;

        let namespace = ObjectNamespace::for_identity(&self.bucket, &user_id);
        let names = self
            .objects
            .list(AccessScope::Caller(identity.access_token()), &namespace)
            .await?;

        if names.is_empty() {
            tracing::debug!("No stored objects to remove");
        } else {
            self.objects
                .remove_many(AccessScope::Service, &namespace, &names)
                .await?;
            tracing::info!(count = names.len(), "Stored objects removed");
        }

        self.admin.delete_account(&user_id).await?;

        tracing::info!("Account deleted");
        Ok(user_id)
    }
}
