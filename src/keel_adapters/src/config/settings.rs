use std::path::Path;
use std::time::Duration;

use ::config::{Config, ConfigError, Environment, File, FileFormat};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{
    DEFAULT_CONFIG_DIR, DEFAULT_ENVIRONMENT, ENV_PREFIX, ENV_SEPARATOR,
    prod,
    env::{
        APP_CONFIG_DIR_ENV_VAR, APP_ENVIRONMENT_ENV_VAR, SUPABASE_ANON_KEY_ENV_VAR,
        SUPABASE_JWT_SECRET_ENV_VAR, SUPABASE_SERVICE_ROLE_KEY_ENV_VAR, SUPABASE_URL_ENV_VAR,
    },
};

#[derive(Debug, Clone, Deserialize)]
pub struct AccountServiceSetting {
    pub application: ApplicationSetting,
    pub platform: PlatformSetting,
    #[serde(default)]
    pub storage: StorageSetting,
    #[serde(default)]
    pub invalidation: InvalidationSetting,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSetting {
    pub host: String,
    pub port: u16,
}

impl ApplicationSetting {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformSetting {
    pub url: String,
    pub anon_key: Secret<String>,
    pub service_role_key: Secret<String>,
    /// Enables local token validation when present.
    #[serde(default)]
    pub jwt_secret: Option<Secret<String>>,
    pub timeout_in_millis: u64,
}

impl PlatformSetting {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSetting {
    pub avatar_bucket: String,
}

impl Default for StorageSetting {
    fn default() -> Self {
        Self {
            avatar_bucket: prod::AVATAR_BUCKET.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvalidationSetting {
    pub placeholder_email_domain: String,
}

impl Default for InvalidationSetting {
    fn default() -> Self {
        Self {
            placeholder_email_domain: prod::PLACEHOLDER_EMAIL_DOMAIN.to_string(),
        }
    }
}

impl AccountServiceSetting {
    /// Load from `config/base.json`, `config/<APP_ENVIRONMENT>.json`, `APP_*`
    /// variables and the platform's own `SUPABASE_*` variables, in that order.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let dir = std::env::var(APP_CONFIG_DIR_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
        let environment = std::env::var(APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());

        Self::load_from(Path::new(&dir), &environment)
    }

    pub fn load_from(dir: &Path, environment: &str) -> Result<Self, ConfigError> {
        let base = dir.join("base.json");
        let overlay = dir.join(format!("{environment}.json"));

        Config::builder()
            .add_source(File::from(base).format(FileFormat::Json))
            .add_source(File::from(overlay).format(FileFormat::Json).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .set_override_option("platform.url", platform_var(SUPABASE_URL_ENV_VAR))?
            .set_override_option("platform.anon_key", platform_var(SUPABASE_ANON_KEY_ENV_VAR))?
            .set_override_option(
                "platform.service_role_key",
                platform_var(SUPABASE_SERVICE_ROLE_KEY_ENV_VAR),
            )?
            .set_override_option("platform.jwt_secret", platform_var(SUPABASE_JWT_SECRET_ENV_VAR))?
            .build()?
            .try_deserialize()
    }
}

fn platform_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
