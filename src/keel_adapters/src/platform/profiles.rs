use keel_core::{
    AccessScope, Profile, ProfilePatch, ProfileStore, ProfileStoreError, ProfileUpsert, UserId,
};

use super::{SupabaseClient, send};

const PROFILES_PATH: &str = "/rest/v1/profiles";
const PREFER_HEADER: &str = "Prefer";
const PREFER_MERGE: &str = "resolution=merge-duplicates,return=minimal";
const PREFER_MINIMAL: &str = "return=minimal";

fn id_filter(id: &UserId) -> String {
    format!("eq.{id}")
}

#[async_trait::async_trait]
impl ProfileStore for SupabaseClient {
    #[tracing::instrument(name = "Upserting profile", skip_all, fields(user_id = %row.id))]
    async fn upsert(
        &self,
        scope: AccessScope<'_>,
        row: &ProfileUpsert,
    ) -> Result<(), ProfileStoreError> {
        let request = self
            .http_client
            .post(self.url(PROFILES_PATH)?)
            .header(PREFER_HEADER, PREFER_MERGE)
            .json(row);

        send(self.authorize(request, scope)).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Selecting profile", skip_all, fields(user_id = %id))]
    async fn select_one(
        &self,
        scope: AccessScope<'_>,
        id: &UserId,
    ) -> Result<Option<Profile>, ProfileStoreError> {
        let request = self
            .http_client
            .get(self.url(PROFILES_PATH)?)
            .query(&[("select", "*".to_string()), ("id", id_filter(id))]);

        let rows: Vec<Profile> = send(self.authorize(request, scope))
            .await?
            .json()
            .await
            .map_err(|e| ProfileStoreError::UnexpectedError(e.to_string()))?;

        Ok(rows.into_iter().next())
    }

    #[tracing::instrument(name = "Updating profile", skip_all, fields(user_id = %id))]
    async fn update(
        &self,
        scope: AccessScope<'_>,
        id: &UserId,
        fields: &ProfilePatch,
    ) -> Result<(), ProfileStoreError> {
        let request = self
            .http_client
            .patch(self.url(PROFILES_PATH)?)
            .query(&[("id", id_filter(id))])
            .header(PREFER_HEADER, PREFER_MINIMAL)
            .json(fields);

        send(self.authorize(request, scope)).await?;
        Ok(())
    }
}
