use secrecy::{ExposeSecret, Secret};

const BEARER_SCHEME: &str = "bearer";

/// Short-lived bearer credential supplied by the caller on every request.
///
/// Never persisted and never logged.
#[derive(Debug, Clone)]
pub struct AccessToken(Secret<String>);

impl AccessToken {
    pub fn new(token: Secret<String>) -> Self {
        Self(token)
    }

    /// Parse an `Authorization` header value of the form `Bearer <token>`.
    ///
    /// The scheme is matched case-insensitively. Any other scheme, or an empty
    /// token, yields `None`.
    pub fn from_authorization_header(value: &str) -> Option<Self> {
        let (scheme, token) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            return None;
        }

        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        Some(Self(Secret::new(token.to_owned())))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl AsRef<Secret<String>> for AccessToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for AccessToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}
