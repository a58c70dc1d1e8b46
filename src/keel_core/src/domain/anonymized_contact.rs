use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::user_id::UserId;

/// De-identified contact data written over an account during invalidation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnonymizedContact {
    pub email: String,
    pub phone: String,
    pub user_metadata: Value,
    pub app_metadata: Value,
}

impl AnonymizedContact {
    /// Placeholder contact for `user_id`: `<id>@<placeholder_domain>`, no
    /// phone, and `deleted: true` in both metadata documents.
    pub fn for_user(user_id: &UserId, placeholder_domain: &str) -> Self {
        Self {
            email: format!("{user_id}@{placeholder_domain}"),
            phone: String::new(),
            user_metadata: json!({ "deleted": true }),
            app_metadata: json!({ "deleted": true }),
        }
    }
}
