use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use keel_core::{AccessScope, ObjectName, ObjectNamespace, ObjectStore, ObjectStoreError};

/// In-memory object storage: full object paths grouped by bucket.
#[derive(Default, Clone)]
pub struct HashMapObjectStore {
    buckets: Arc<RwLock<HashMap<String, BTreeSet<String>>>>,
}

impl HashMapObjectStore {
    pub fn new() -> Self {
        Self {
            buckets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_buckets<I, S>(buckets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let buckets = buckets
            .into_iter()
            .map(|bucket| (bucket.into(), BTreeSet::new()))
            .collect();
        Self {
            buckets: Arc::new(RwLock::new(buckets)),
        }
    }

    pub async fn put(&self, bucket: &str, path: impl Into<String>) {
        self.buckets
            .write()
            .await
            .entry(bucket.to_owned())
            .or_default()
            .insert(path.into());
    }

    pub async fn contains(&self, bucket: &str, path: &str) -> bool {
        self.buckets
            .read()
            .await
            .get(bucket)
            .is_some_and(|paths| paths.contains(path))
    }

    /// Number of objects under `namespace`, nested folders included.
    pub async fn count(&self, namespace: &ObjectNamespace) -> usize {
        let buckets = self.buckets.read().await;
        buckets
            .get(namespace.bucket())
            .map(|paths| names_under(paths, namespace.prefix()).count())
            .unwrap_or(0)
    }
}

// Names are relative to the prefix; nested folders are included
fn names_under<'a>(
    paths: &'a BTreeSet<String>,
    prefix: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    paths.iter().filter_map(move |path| {
        let name = if prefix.is_empty() {
            path.as_str()
        } else {
            path.strip_prefix(prefix)?.strip_prefix('/')?
        };
        (!name.is_empty()).then_some(name)
    })
}

#[async_trait::async_trait]
impl ObjectStore for HashMapObjectStore {
    async fn list(
        &self,
        _scope: AccessScope<'_>,
        namespace: &ObjectNamespace,
    ) -> Result<Vec<ObjectName>, ObjectStoreError> {
        let buckets = self.buckets.read().await;
        let Some(paths) = buckets.get(namespace.bucket()) else {
            return Err(ObjectStoreError::UnexpectedError(
                "Bucket not found".to_string(),
            ));
        };

        Ok(names_under(paths, namespace.prefix())
            .map(ObjectName::new)
            .collect())
    }

    async fn remove_many(
        &self,
        _scope: AccessScope<'_>,
        namespace: &ObjectNamespace,
        names: &[ObjectName],
    ) -> Result<(), ObjectStoreError> {
        let mut buckets = self.buckets.write().await;
        let paths = buckets.get_mut(namespace.bucket()).ok_or_else(|| {
            ObjectStoreError::UnexpectedError("Bucket not found".to_string())
        })?;

        for name in names {
            paths.remove(&namespace.path(name));
        }
        Ok(())
    }
}
