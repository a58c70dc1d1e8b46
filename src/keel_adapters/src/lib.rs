pub mod auth_validation;
pub mod config;
pub mod handlers;
pub mod persistence;
pub mod platform;

pub use auth_validation::{JwtIdentityResolver, JwtValidationConfig};
pub use config::{AccountServiceSetting, ConfigError};
pub use handlers::{
    PasswordChangeRequest, handle_change_password, handle_invalidation, handle_preflight,
    handle_self_deletion,
};
pub use persistence::{
    HashMapAuthStore, HashMapObjectStore, HashMapProfileStore, PostgresProfileStore,
};
pub use platform::{PlatformError, SupabaseClient};
