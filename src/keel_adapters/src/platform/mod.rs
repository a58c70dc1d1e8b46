//! REST clients for the hosted platform: authentication, relational storage,
//! object storage and edge functions.
//!
//! One [`SupabaseClient`] carries the base URL and both keys. Every call picks
//! its authority explicitly through an [`AccessScope`]: caller-scoped calls
//! send the anon key with the caller's bearer token, service-scoped calls send
//! the service-role key.

pub mod auth;
pub mod functions;
pub mod profiles;
pub mod storage;

use keel_core::{AccessScope, AuthApiError, GatewayError, ObjectStoreError, ProfileStoreError};
use reqwest::{Client, RequestBuilder, Response, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

const APIKEY_HEADER: &str = "apikey";

#[derive(Clone)]
pub struct SupabaseClient {
    http_client: Client,
    base_url: String,
    anon_key: Secret<String>,
    service_role_key: Secret<String>,
}

impl SupabaseClient {
    pub fn new(
        base_url: String,
        anon_key: Secret<String>,
        service_role_key: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            anon_key,
            service_role_key,
        }
    }

    fn url(&self, path: &str) -> Result<Url, PlatformError> {
        let base = Url::parse(&self.base_url).map_err(|e| PlatformError::InvalidUrl(e.to_string()))?;
        base.join(path)
            .map_err(|e| PlatformError::InvalidUrl(e.to_string()))
    }

    fn authorize(&self, request: RequestBuilder, scope: AccessScope<'_>) -> RequestBuilder {
        match scope {
            AccessScope::Caller(token) => request
                .header(APIKEY_HEADER, self.anon_key.expose_secret())
                .bearer_auth(token.expose()),
            AccessScope::Service => request
                .header(APIKEY_HEADER, self.service_role_key.expose_secret())
                .bearer_auth(self.service_role_key.expose_secret()),
        }
    }
}

/// Send the request and turn a non-success status into [`PlatformError::Api`].
async fn send(request: RequestBuilder) -> Result<Response, PlatformError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let parsed = serde_json::from_str::<ErrorBody>(&body).unwrap_or_default();
    let message = parsed
        .message()
        .map(str::to_owned)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_owned()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_owned());

    Err(PlatformError::Api {
        status: status.as_u16(),
        code: parsed.code,
        message,
    })
}

// The services disagree on where the message goes
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<serde_json::Value>,
    code: Option<serde_json::Value>,
}

impl ErrorBody {
    fn message(&self) -> Option<&str> {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref())
            .or(self.error.as_ref().and_then(|e| e.as_str()))
    }
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<serde_json::Value>,
        message: String,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid platform URL: {0}")]
    InvalidUrl(String),
}

impl PlatformError {
    pub fn status(&self) -> Option<u16> {
        match self {
            PlatformError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Postgres integrity-constraint violation (SQLSTATE class 23).
    fn is_constraint_violation(&self) -> bool {
        match self {
            PlatformError::Api {
                code: Some(code), ..
            } => code.as_str().is_some_and(|c| c.starts_with("23")),
            PlatformError::Api { status, .. } => *status == 409,
            _ => false,
        }
    }
}

impl From<PlatformError> for AuthApiError {
    fn from(error: PlatformError) -> Self {
        match error.status() {
            Some(404) => AuthApiError::UserNotFound(error.to_string()),
            Some(status) if (400..500).contains(&status) => {
                AuthApiError::Rejected(error.to_string())
            }
            _ => AuthApiError::UnexpectedError(error.to_string()),
        }
    }
}

impl From<PlatformError> for ProfileStoreError {
    fn from(error: PlatformError) -> Self {
        if error.is_constraint_violation() {
            ProfileStoreError::ConstraintViolation(error.to_string())
        } else {
            ProfileStoreError::UnexpectedError(error.to_string())
        }
    }
}

impl From<PlatformError> for ObjectStoreError {
    fn from(error: PlatformError) -> Self {
        ObjectStoreError::UnexpectedError(error.to_string())
    }
}

impl From<PlatformError> for GatewayError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::Api { .. } => GatewayError::Rejected(error.to_string()),
            _ => GatewayError::UnexpectedError(error.to_string()),
        }
    }
}
