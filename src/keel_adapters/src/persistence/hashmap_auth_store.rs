use std::collections::HashMap;
use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use rand::{Rng, distr::Alphanumeric};
use secrecy::{ExposeSecret, Secret};
use serde_json::{Value, json};
use tokio::sync::RwLock;

use keel_core::{
    AccessToken, AdminAuthApi, AnonymizedContact, AuthApiError, CredentialVerifier, Identity,
    IdentityResolver, Password, Profile, UserId,
};

use super::HashMapProfileStore;

pub const MIN_PASSWORD_LENGTH: usize = 6;
const SESSION_TOKEN_LENGTH: usize = 32;

const INVALID_TOKEN: &str = "invalid JWT: unable to parse or verify signature";
const USER_NOT_FOUND: &str = "User not found";
const WEAK_PASSWORD: &str = "Password should be at least 6 characters.";
const EMAIL_EXISTS: &str = "A user with this email address has already been registered";

#[derive(Debug, Clone)]
struct Account {
    email: Option<String>,
    phone: Option<String>,
    password_hash: Secret<String>,
    user_metadata: Value,
    app_metadata: Value,
}

/// In-memory authentication subsystem.
///
/// Credentials are argon2 hashes, sessions are opaque random tokens. When a
/// profile store is attached, creating an account inserts its empty profile
/// row and deleting it removes the row.
#[derive(Default, Clone)]
pub struct HashMapAuthStore {
    accounts: Arc<RwLock<HashMap<UserId, Account>>>,
    sessions: Arc<RwLock<HashMap<String, UserId>>>,
    profiles: Option<HashMapProfileStore>,
}

impl HashMapAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: HashMapProfileStore) -> Self {
        Self {
            profiles: Some(profiles),
            ..Self::default()
        }
    }

    #[tracing::instrument(name = "HashMapAuthStore::create_account", skip_all)]
    pub async fn create_account(
        &self,
        email: &str,
        password: &Password,
    ) -> Result<UserId, AuthApiError> {
        check_strength(password)?;
        if self.email_taken(email, None).await {
            return Err(AuthApiError::Rejected(EMAIL_EXISTS.to_string()));
        }

        let password_hash = compute_password_hash(password.clone())
            .await
            .map_err(AuthApiError::UnexpectedError)?;

        let user_id = UserId::new();
        self.accounts.write().await.insert(
            user_id,
            Account {
                email: Some(email.to_owned()),
                phone: None,
                password_hash,
                user_metadata: json!({}),
                app_metadata: json!({}),
            },
        );

        if let Some(profiles) = &self.profiles {
            profiles.insert(Profile::empty(user_id)).await;
        }

        Ok(user_id)
    }

    /// Start a session for `user_id` and return its bearer token.
    pub async fn issue_session(&self, user_id: &UserId) -> Result<AccessToken, AuthApiError> {
        if !self.accounts.read().await.contains_key(user_id) {
            return Err(AuthApiError::UserNotFound(USER_NOT_FOUND.to_string()));
        }

        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_TOKEN_LENGTH)
            .map(char::from)
            .collect();

        self.sessions.write().await.insert(token.clone(), *user_id);
        Ok(AccessToken::new(Secret::new(token)))
    }

    pub async fn revoke_session(&self, token: &AccessToken) {
        self.sessions.write().await.remove(token.expose());
    }

    pub async fn contains(&self, user_id: &UserId) -> bool {
        self.accounts.read().await.contains_key(user_id)
    }

    pub async fn email(&self, user_id: &UserId) -> Option<String> {
        let accounts = self.accounts.read().await;
        accounts.get(user_id).and_then(|a| a.email.clone())
    }

    pub async fn phone(&self, user_id: &UserId) -> Option<String> {
        let accounts = self.accounts.read().await;
        accounts.get(user_id).and_then(|a| a.phone.clone())
    }

    /// Whether both metadata documents carry `deleted: true`.
    pub async fn is_marked_deleted(&self, user_id: &UserId) -> bool {
        let accounts = self.accounts.read().await;
        accounts.get(user_id).is_some_and(|a| {
            a.user_metadata["deleted"] == Value::Bool(true)
                && a.app_metadata["deleted"] == Value::Bool(true)
        })
    }

    async fn email_taken(&self, email: &str, except: Option<&UserId>) -> bool {
        let accounts = self.accounts.read().await;
        accounts
            .iter()
            .any(|(id, a)| Some(id) != except && a.email.as_deref() == Some(email))
    }
}

#[async_trait::async_trait]
impl IdentityResolver for HashMapAuthStore {
    async fn resolve_identity(&self, token: &AccessToken) -> Result<Identity, AuthApiError> {
        let user_id = self
            .sessions
            .read()
            .await
            .get(token.expose())
            .copied()
            .ok_or_else(|| AuthApiError::InvalidToken(INVALID_TOKEN.to_string()))?;

        let accounts = self.accounts.read().await;
        let account = accounts
            .get(&user_id)
            .ok_or_else(|| AuthApiError::InvalidToken(INVALID_TOKEN.to_string()))?;

        Ok(Identity::new(user_id, account.email.clone(), token.clone()))
    }
}

#[async_trait::async_trait]
impl CredentialVerifier for HashMapAuthStore {
    #[tracing::instrument(name = "HashMapAuthStore::verify_credential", skip_all)]
    async fn verify_credential(
        &self,
        identity: &Identity,
        secret: &Password,
    ) -> Result<bool, AuthApiError> {
        let expected = {
            let accounts = self.accounts.read().await;
            match accounts.get(identity.id()) {
                Some(account) => account.password_hash.clone(),
                None => return Ok(false),
            }
        };

        Ok(verify_password_hash(expected, secret.clone()).await.is_ok())
    }
}

#[async_trait::async_trait]
impl AdminAuthApi for HashMapAuthStore {
    #[tracing::instrument(name = "HashMapAuthStore::set_credential", skip_all)]
    async fn set_credential(
        &self,
        user_id: &UserId,
        new_secret: &Password,
    ) -> Result<(), AuthApiError> {
        check_strength(new_secret)?;
        if !self.contains(user_id).await {
            return Err(AuthApiError::UserNotFound(USER_NOT_FOUND.to_string()));
        }

        let password_hash = compute_password_hash(new_secret.clone())
            .await
            .map_err(AuthApiError::UnexpectedError)?;

        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(user_id)
            .ok_or_else(|| AuthApiError::UserNotFound(USER_NOT_FOUND.to_string()))?;
        account.password_hash = password_hash;
        Ok(())
    }

    async fn delete_account(&self, user_id: &UserId) -> Result<(), AuthApiError> {
        self.accounts
            .write()
            .await
            .remove(user_id)
            .ok_or_else(|| AuthApiError::UserNotFound(USER_NOT_FOUND.to_string()))?;

        self.sessions.write().await.retain(|_, owner| owner != user_id);

        if let Some(profiles) = &self.profiles {
            profiles.remove(user_id).await;
        }
        Ok(())
    }

    async fn anonymize_contact(
        &self,
        user_id: &UserId,
        contact: &AnonymizedContact,
    ) -> Result<(), AuthApiError> {
        if self.email_taken(&contact.email, Some(user_id)).await {
            return Err(AuthApiError::Rejected(EMAIL_EXISTS.to_string()));
        }

        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(user_id)
            .ok_or_else(|| AuthApiError::UserNotFound(USER_NOT_FOUND.to_string()))?;

        account.email = Some(contact.email.clone());
        account.phone = Some(contact.phone.clone());
        account.user_metadata = contact.user_metadata.clone();
        account.app_metadata = contact.app_metadata.clone();
        Ok(())
    }
}

fn check_strength(password: &Password) -> Result<(), AuthApiError> {
    if password.as_ref().expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthApiError::Rejected(WEAK_PASSWORD.to_string()));
    }
    Ok(())
}

fn hasher() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> Result<(), String> {
    let current_span: tracing::Span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            hasher()?
                .verify_password(
                    password_candidate.as_ref().expose_secret().as_bytes(),
                    &expected_password_hash,
                )
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            hasher()?
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}
