use crate::domain::{access_token::AccessToken, user_id::UserId};

/// The authenticated caller as resolved from a bearer token.
///
/// The token travels with the identity so that calls made on the caller's
/// behalf stay inside the caller's row-level-security scope.
#[derive(Debug, Clone)]
pub struct Identity {
    id: UserId,
    email: Option<String>,
    access_token: AccessToken,
}

impl Identity {
    pub fn new(id: UserId, email: Option<String>, access_token: AccessToken) -> Self {
        Self {
            id,
            email,
            access_token,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }
}
