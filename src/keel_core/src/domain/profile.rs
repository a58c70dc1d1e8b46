use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user_id::UserId;

/// Identity-linked profile row.
///
/// Keyed by the identity id; mutated only through [`ProfileUpsert`] and
/// [`ProfilePatch`]. Last write wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn empty(id: UserId) -> Self {
        Self {
            id,
            username: None,
            website: None,
            avatar_url: None,
            full_name: None,
            updated_at: None,
        }
    }

    /// Merge an upsert into this row. `full_name` is not part of an upsert and
    /// is left untouched.
    pub fn apply_upsert(&mut self, upsert: &ProfileUpsert) {
        self.username = upsert.username.clone();
        self.website = upsert.website.clone();
        self.avatar_url = upsert.avatar_url.clone();
        self.updated_at = Some(upsert.updated_at);
    }

    pub fn apply_patch(&mut self, patch: &ProfilePatch) {
        if let Some(full_name) = &patch.full_name {
            self.full_name = Some(full_name.clone());
        }
        if let Some(username) = &patch.username {
            self.username = Some(username.clone());
        }
        if let Some(avatar_url) = &patch.avatar_url {
            self.avatar_url = Some(avatar_url.clone());
        }
        if let Some(website) = &patch.website {
            self.website = Some(website.clone());
        }
    }
}

/// Row written by the profile editor on submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpsert {
    pub id: UserId,
    pub username: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of the display fields. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl ProfilePatch {
    /// Blank out every display field; used when anonymizing an account.
    pub fn cleared() -> Self {
        Self {
            full_name: Some(String::new()),
            username: Some(String::new()),
            avatar_url: Some(String::new()),
            website: Some(String::new()),
        }
    }
}
