pub mod hashmap_auth_store;
pub mod hashmap_object_store;
pub mod hashmap_profile_store;
pub mod postgres_profile_store;

pub use hashmap_auth_store::HashMapAuthStore;
pub use hashmap_object_store::HashMapObjectStore;
pub use hashmap_profile_store::HashMapProfileStore;
pub use postgres_profile_store::PostgresProfileStore;

/// Minimum username length enforced by the `profiles` table.
pub const USERNAME_MIN_LENGTH: usize = 3;
pub(crate) const USERNAME_CONSTRAINT: &str =
    "new row for relation \"profiles\" violates check constraint \"username_length\"";
pub(crate) const USERNAME_TAKEN: &str =
    "duplicate key value violates unique constraint \"profiles_username_key\"";

/// `""` is allowed so that an anonymized row still satisfies the constraint.
pub(crate) fn username_is_valid(username: Option<&str>) -> bool {
    match username {
        None | Some("") => true,
        Some(name) => name.chars().count() >= USERNAME_MIN_LENGTH,
    }
}

/// Whether `username` takes part in the uniqueness rule. Empty names are exempt.
pub(crate) fn username_is_unique_key(username: Option<&str>) -> bool {
    username.is_some_and(|name| !name.is_empty())
}
