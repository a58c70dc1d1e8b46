use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use keel_core::{AccessToken, AuthApiError, Identity, IdentityResolver, UserId};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

#[derive(Clone)]
pub struct JwtValidationConfig {
    pub jwt_secret: Secret<String>,
    pub audience: String,
}

impl JwtValidationConfig {
    pub fn new(jwt_secret: Secret<String>) -> Self {
        Self {
            jwt_secret,
            audience: AUTHENTICATED_AUDIENCE.to_string(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// Access-token claims issued by the platform's authentication service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub aud: String,
    pub exp: usize,
    #[serde(default)]
    pub email: Option<String>,
}

/// Resolves identities locally by checking the token's HS256 signature with
/// the platform's JWT secret instead of calling the user endpoint.
///
/// Signature, expiry and audience are checked. A revoked session whose token
/// has not yet expired still resolves.
#[derive(Clone)]
pub struct JwtIdentityResolver {
    config: JwtValidationConfig,
}

impl JwtIdentityResolver {
    pub fn new(config: JwtValidationConfig) -> Self {
        Self { config }
    }

    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.config.audience.as_str()]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
    }
}

#[async_trait]
impl IdentityResolver for JwtIdentityResolver {
    #[tracing::instrument(name = "Validating access token", skip_all)]
    async fn resolve_identity(&self, token: &AccessToken) -> Result<Identity, AuthApiError> {
        let claims = self
            .validate(token.expose())
            .map_err(|e| AuthApiError::InvalidToken(format!("invalid JWT: {e}")))?;

        Ok(Identity::new(
            UserId::from(claims.sub),
            claims.email,
            token.clone(),
        ))
    }
}
