use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use keel_core::{
    AccessScope, Profile, ProfilePatch, ProfileStore, ProfileStoreError, ProfileUpsert, UserId,
};

use super::{USERNAME_CONSTRAINT, USERNAME_TAKEN, username_is_unique_key, username_is_valid};

/// In-memory `profiles` table.
///
/// Access scopes are not enforced; every scope sees every row. Non-empty
/// usernames are unique, like the partial index on the SQL table.
#[derive(Default, Clone)]
pub struct HashMapProfileStore {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
}

impl HashMapProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a row directly, bypassing the constraint checks.
    pub async fn insert(&self, profile: Profile) {
        self.profiles.write().await.insert(profile.id, profile);
    }

    pub async fn remove(&self, id: &UserId) -> Option<Profile> {
        self.profiles.write().await.remove(id)
    }

    pub async fn get(&self, id: &UserId) -> Option<Profile> {
        self.profiles.read().await.get(id).cloned()
    }
}

fn check_username(
    profiles: &HashMap<UserId, Profile>,
    id: &UserId,
    username: Option<&str>,
) -> Result<(), ProfileStoreError> {
    if !username_is_valid(username) {
        return Err(ProfileStoreError::ConstraintViolation(
            USERNAME_CONSTRAINT.to_string(),
        ));
    }

    let taken = username_is_unique_key(username)
        && profiles
            .values()
            .any(|p| p.id != *id && p.username.as_deref() == username);
    if taken {
        return Err(ProfileStoreError::ConstraintViolation(
            USERNAME_TAKEN.to_string(),
        ));
    }
    Ok(())
}

#[async_trait::async_trait]
impl ProfileStore for HashMapProfileStore {
    async fn upsert(
        &self,
        _scope: AccessScope<'_>,
        row: &ProfileUpsert,
    ) -> Result<(), ProfileStoreError> {
        let mut profiles = self.profiles.write().await;
        check_username(&profiles, &row.id, row.username.as_deref())?;

        profiles
            .entry(row.id)
            .or_insert_with(|| Profile::empty(row.id))
            .apply_upsert(row);
        Ok(())
    }

    async fn select_one(
        &self,
        _scope: AccessScope<'_>,
        id: &UserId,
    ) -> Result<Option<Profile>, ProfileStoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(id).cloned())
    }

    async fn update(
        &self,
        _scope: AccessScope<'_>,
        id: &UserId,
        fields: &ProfilePatch,
    ) -> Result<(), ProfileStoreError> {
        let mut profiles = self.profiles.write().await;
        check_username(&profiles, id, fields.username.as_deref())?;

        // Like an UPDATE ... WHERE id = $1, a missing row is not an error
        if let Some(profile) = profiles.get_mut(id) {
            profile.apply_patch(fields);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fake::{Fake, faker::internet::en::Username};

    fn upsert_for(id: UserId, username: Option<String>) -> ProfileUpsert {
        ProfileUpsert {
            id,
            username,
            website: Some("https://a.example".to_string()),
            avatar_url: Some("avatars/123.png".to_string()),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_overwrites() {
        let store = HashMapProfileStore::new();
        let id = UserId::new();
        let first: String = Username().fake();
        let second = format!("{first}-renamed");

        store
            .upsert(AccessScope::Service, &upsert_for(id, Some(first)))
            .await
            .unwrap();
        store
            .upsert(AccessScope::Service, &upsert_for(id, Some(second.clone())))
            .await
            .unwrap();

        let profile = store.get(&id).await.unwrap();
        assert_eq!(profile.username, Some(second));
    }

    #[tokio::test]
    async fn test_short_username_violates_constraint() {
        let store = HashMapProfileStore::new();
        let id = UserId::new();

        let result = store
            .upsert(AccessScope::Service, &upsert_for(id, Some("al".to_string())))
            .await;

        assert_eq!(
            result,
            Err(ProfileStoreError::ConstraintViolation(String::new()))
        );
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_cleared_patch_is_allowed() {
        let store = HashMapProfileStore::new();
        let id = UserId::new();
        store
            .upsert(AccessScope::Service, &upsert_for(id, Some("alice".to_string())))
            .await
            .unwrap();

        store
            .update(AccessScope::Service, &id, &ProfilePatch::cleared())
            .await
            .unwrap();

        let profile = store.get(&id).await.unwrap();
        assert_eq!(profile.username.as_deref(), Some(""));
        assert_eq!(profile.website.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_update_of_missing_row_is_noop() {
        let store = HashMapProfileStore::new();
        let id = UserId::new();

        store
            .update(AccessScope::Service, &id, &ProfilePatch::cleared())
            .await
            .unwrap();

        assert!(
            store
                .select_one(AccessScope::Service, &id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_violates_constraint() {
        let store = HashMapProfileStore::new();
        let username: String = Username().fake();
        store
            .upsert(AccessScope::Service, &upsert_for(UserId::new(), Some(username.clone())))
            .await
            .unwrap();

        let other = UserId::new();
        let result = store
            .upsert(AccessScope::Service, &upsert_for(other, Some(username)))
            .await;

        assert_eq!(
            result,
            Err(ProfileStoreError::ConstraintViolation(String::new()))
        );
        assert!(store.get(&other).await.is_none());
    }

    #[tokio::test]
    async fn test_many_rows_can_be_cleared() {
        let store = HashMapProfileStore::new();
        let ids = [UserId::new(), UserId::new()];
        for (id, username) in ids.iter().zip(["alice", "bob_smith"]) {
            store
                .upsert(AccessScope::Service, &upsert_for(*id, Some(username.to_string())))
                .await
                .unwrap();
        }

        for id in &ids {
            store
                .update(AccessScope::Service, id, &ProfilePatch::cleared())
                .await
                .unwrap();
        }

        for id in &ids {
            assert_eq!(store.get(id).await.unwrap().username.as_deref(), Some(""));
        }
    }
}
