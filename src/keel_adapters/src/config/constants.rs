pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    pub const APP_CONFIG_DIR_ENV_VAR: &str = "APP_CONFIG_DIR";
    pub const SUPABASE_URL_ENV_VAR: &str = "SUPABASE_URL";
    pub const SUPABASE_ANON_KEY_ENV_VAR: &str = "SUPABASE_ANON_KEY";
    pub const SUPABASE_SERVICE_ROLE_KEY_ENV_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";
    pub const SUPABASE_JWT_SECRET_ENV_VAR: &str = "SUPABASE_JWT_SECRET";
}

pub const DEFAULT_CONFIG_DIR: &str = "config";
pub const DEFAULT_ENVIRONMENT: &str = "local";
pub const ENV_PREFIX: &str = "APP";
pub const ENV_SEPARATOR: &str = "__";

pub mod prod {
    pub const AVATAR_BUCKET: &str = "avatars";
    pub const PLACEHOLDER_EMAIL_DOMAIN: &str = "deleted-users.example.com";
}
