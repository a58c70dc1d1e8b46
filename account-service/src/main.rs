use color_eyre::eyre::Result;
use keel::{
    AccountService, IdentityResolver, JwtIdentityResolver, JwtValidationConfig, SupabaseClient,
    adapters::config::AccountServiceSetting,
};
use reqwest::Client as HttpClient;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let config = AccountServiceSetting::load()?;

    let http_client = HttpClient::builder()
        .timeout(config.platform.timeout())
        .build()?;

    let platform = SupabaseClient::new(
        config.platform.url.clone(),
        config.platform.anon_key.clone(),
        config.platform.service_role_key.clone(),
        http_client,
    );

    let listener = tokio::net::TcpListener::bind(config.application.address()).await?;

    // Tokens are checked locally when the signing secret is known
    match config.platform.jwt_secret.clone() {
        Some(secret) => {
            tracing::info!("Validating access tokens locally");
            let resolver = JwtIdentityResolver::new(JwtValidationConfig::new(secret));
            serve(resolver, platform, &config, listener).await
        }
        None => {
            tracing::info!("Resolving access tokens through the auth API");
            serve(platform.clone(), platform, &config, listener).await
        }
    }
}

async fn serve<I>(
    resolver: I,
    platform: SupabaseClient,
    config: &AccountServiceSetting,
    listener: tokio::net::TcpListener,
) -> Result<()>
where
    I: IdentityResolver + Clone + 'static,
{
    let account_service = AccountService::new(
        resolver,
        platform.clone(),
        platform.clone(),
        platform.clone(),
        platform,
        config.storage.avatar_bucket.clone(),
        config.invalidation.placeholder_email_domain.clone(),
    );

    account_service.run_standalone(listener).await?;
    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
