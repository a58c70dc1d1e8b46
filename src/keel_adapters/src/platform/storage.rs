use keel_core::{AccessScope, ObjectName, ObjectNamespace, ObjectStore, ObjectStoreError};
use serde::{Deserialize, Serialize};

use super::{SupabaseClient, send};

const LIST_PATH: &str = "/storage/v1/object/list";
const OBJECT_PATH: &str = "/storage/v1/object";
pub const LIST_PAGE_SIZE: usize = 100;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListRequest<'a> {
    prefix: &'a str,
    limit: usize,
    offset: usize,
    sort_by: SortBy,
}

#[derive(Serialize)]
struct SortBy {
    column: &'static str,
    order: &'static str,
}

// Folders come back with a null id and are listed in turn
#[derive(Deserialize)]
struct ListEntry {
    name: String,
    id: Option<String>,
}

#[derive(Serialize)]
struct RemoveRequest {
    prefixes: Vec<String>,
}

impl SupabaseClient {
    /// Every entry directly inside `prefix`, across all pages.
    async fn list_folder(
        &self,
        scope: AccessScope<'_>,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ListEntry>, ObjectStoreError> {
        let url = self.url(&format!("{LIST_PATH}/{bucket}"))?;
        let mut entries = Vec::new();
        let mut offset = 0;

        loop {
            let request = self.http_client.post(url.clone()).json(&ListRequest {
                prefix,
                limit: LIST_PAGE_SIZE,
                offset,
                sort_by: SortBy {
                    column: "name",
                    order: "asc",
                },
            });

            let page: Vec<ListEntry> = send(self.authorize(request, scope))
                .await?
                .json()
                .await
                .map_err(|e| ObjectStoreError::UnexpectedError(e.to_string()))?;

            let fetched = page.len();
            entries.extend(page);

            if fetched < LIST_PAGE_SIZE {
                return Ok(entries);
            }
            offset += fetched;
        }
    }
}

fn join(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        name.to_owned()
    } else {
        format!("{folder}/{name}")
    }
}

#[async_trait::async_trait]
impl ObjectStore for SupabaseClient {
    /// Lists the namespace recursively. Names of nested objects are relative
    /// to the namespace prefix, e.g. `nested/a.png`.
    #[tracing::instrument(name = "Listing objects", skip_all, fields(bucket = %namespace.bucket()))]
    async fn list(
        &self,
        scope: AccessScope<'_>,
        namespace: &ObjectNamespace,
    ) -> Result<Vec<ObjectName>, ObjectStoreError> {
        let mut names = Vec::new();
        let mut folders = vec![String::new()];

        while let Some(folder) = folders.pop() {
            let prefix = join(namespace.prefix().trim_end_matches('/'), &folder);
            for entry in self.list_folder(scope, namespace.bucket(), &prefix).await? {
                let name = join(&folder, &entry.name);
                match entry.id {
                    Some(_) => names.push(ObjectName::new(name)),
                    None => folders.push(name),
                }
            }
        }

        tracing::debug!(count = names.len(), "Objects listed");
        Ok(names)
    }

    #[tracing::instrument(name = "Removing objects", skip_all, fields(bucket = %namespace.bucket(), count = names.len()))]
    async fn remove_many(
        &self,
        scope: AccessScope<'_>,
        namespace: &ObjectNamespace,
        names: &[ObjectName],
    ) -> Result<(), ObjectStoreError> {
        let request = self
            .http_client
            .delete(self.url(&format!("{OBJECT_PATH}/{}", namespace.bucket()))?)
            .json(&RemoveRequest {
                prefixes: names.iter().map(|name| namespace.path(name)).collect(),
            });

        send(self.authorize(request, scope)).await?;
        Ok(())
    }
}
