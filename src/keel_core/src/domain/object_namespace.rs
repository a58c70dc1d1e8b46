use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::user_id::UserId;

/// Name of a stored object relative to its namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectName(String);

impl ObjectName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bucket plus the folder prefix owned by one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectNamespace {
    bucket: String,
    prefix: String,
}

impl ObjectNamespace {
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    /// The folder in `bucket` that holds the objects of `user_id`.
    pub fn for_identity(bucket: impl Into<String>, user_id: &UserId) -> Self {
        Self::new(bucket, user_id.to_string())
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full object path inside the bucket.
    pub fn path(&self, name: &ObjectName) -> String {
        if self.prefix.is_empty() {
            return name.as_str().to_owned();
        }
        format!("{}/{}", self.prefix.trim_end_matches('/'), name)
    }
}
