//! Headless profile-editing surface.
//!
//! Holds the editable fields of the signed-in user's profile and turns every
//! user action into at most one remote call. Failures surface as a blocking
//! [`Notice`]; nothing is retried and local state is never rolled back.

use std::fmt;

use chrono::{DateTime, Duration, DurationRound, Utc};
use keel_core::{
    AccessScope, AccountGateway, Identity, Password, Profile, ProfileStore, ProfileUpsert,
};
use secrecy::{ExposeSecret, Secret};

/// User-visible notice produced by an editor action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ProfileLoadFailed,
    ProfileUpdated,
    ProfileUpdateFailed,
    PasswordsDoNotMatch,
    PasswordUpdated,
    PasswordUpdateFailed,
    AccountDeleted,
    AccountDeletionFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::ProfileLoadFailed => "Error loading user data!",
            Notice::ProfileUpdated => "Profile updated!",
            Notice::ProfileUpdateFailed => "Error updating the data!",
            Notice::PasswordsDoNotMatch => "New passwords do not match!",
            Notice::PasswordUpdated => "Password updated!",
            Notice::PasswordUpdateFailed => "Error updating the password!",
            Notice::AccountDeleted => "Account deleted successfully!",
            Notice::AccountDeletionFailed => "Error deleting the account!",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::ProfileLoadFailed
                | Notice::ProfileUpdateFailed
                | Notice::PasswordsDoNotMatch
                | Notice::PasswordUpdateFailed
                | Notice::AccountDeletionFailed
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The editable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub username: Option<String>,
    pub website: Option<String>,
    pub avatar_url: String,
}

pub struct ProfileEditor<P, G>
where
    P: ProfileStore,
    G: AccountGateway,
{
    profiles: P,
    gateway: G,
    identity: Identity,
    profile: Option<Profile>,
    form: ProfileForm,
    signed_out: bool,
}

impl<P, G> ProfileEditor<P, G>
where
    P: ProfileStore,
    G: AccountGateway,
{
    pub fn new(profiles: P, gateway: G, identity: Identity) -> Self {
        Self {
            profiles,
            gateway,
            identity,
            profile: None,
            form: ProfileForm::default(),
            signed_out: false,
        }
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    /// The last row fetched or successfully written.
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_signed_out(&self) -> bool {
        self.signed_out
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.form.username = Some(username.into());
    }

    pub fn set_website(&mut self, website: impl Into<String>) {
        self.form.website = Some(website.into());
    }

    /// Fetch the caller's profile and populate the form.
    ///
    /// A missing row leaves the form as it is and is not an error.
    #[tracing::instrument(name = "ProfileEditor::load", skip_all, fields(user_id = %self.identity.id()))]
    pub async fn load(&mut self) -> Option<Notice> {
        let result = self
            .profiles
            .select_one(
                AccessScope::Caller(self.identity.access_token()),
                self.identity.id(),
            )
            .await;

        match result {
            Ok(Some(profile)) => {
                self.form = ProfileForm {
                    username: profile.username.clone(),
                    website: profile.website.clone(),
                    avatar_url: profile.avatar_url.clone().unwrap_or_default(),
                };
                self.profile = Some(profile);
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load profile");
                Some(Notice::ProfileLoadFailed)
            }
        }
    }

    /// Upsert the form back to storage with a fresh `updated_at`.
    #[tracing::instrument(name = "ProfileEditor::submit", skip_all, fields(user_id = %self.identity.id()))]
    pub async fn submit(&mut self) -> Notice {
        let updated_at = next_timestamp(
            self.profile.as_ref().and_then(|p| p.updated_at),
            Utc::now(),
        );

        let row = ProfileUpsert {
            id: *self.identity.id(),
            username: self.form.username.clone(),
            website: self.form.website.clone(),
            avatar_url: Some(self.form.avatar_url.clone()),
            updated_at,
        };

        match self
            .profiles
            .upsert(AccessScope::Caller(self.identity.access_token()), &row)
            .await
        {
            Ok(()) => {
                self.profile
                    .get_or_insert_with(|| Profile::empty(row.id))
                    .apply_upsert(&row);
                Notice::ProfileUpdated
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to update profile");
                Notice::ProfileUpdateFailed
            }
        }
    }

    /// Record a freshly uploaded avatar and persist it right away.
    pub async fn on_avatar_uploaded(&mut self, avatar_url: impl Into<String>) -> Notice {
        self.form.avatar_url = avatar_url.into();
        self.submit().await
    }

    /// Ask the password-change handler to replace the caller's secret.
    ///
    /// `new_password` and `confirmation` must match before any call is made.
    #[tracing::instrument(name = "ProfileEditor::update_password", skip_all)]
    pub async fn update_password(
        &mut self,
        old_password: Secret<String>,
        new_password: Secret<String>,
        confirmation: Secret<String>,
    ) -> Notice {
        if new_password.expose_secret() != confirmation.expose_secret() {
            return Notice::PasswordsDoNotMatch;
        }

        let (Ok(old_password), Ok(new_password)) = (
            Password::try_from(old_password),
            Password::try_from(new_password),
        ) else {
            return Notice::PasswordUpdateFailed;
        };

        match self
            .gateway
            .change_password(self.identity.access_token(), &old_password, &new_password)
            .await
        {
            Ok(()) => Notice::PasswordUpdated,
            Err(e) => {
                tracing::error!(error = %e, "Password change rejected");
                Notice::PasswordUpdateFailed
            }
        }
    }

    /// Ask the self-deletion handler to remove the account, then end the
    /// session whatever the outcome.
    #[tracing::instrument(name = "ProfileEditor::delete_account", skip_all)]
    pub async fn delete_account(&mut self) -> Notice {
        let notice = match self
            .gateway
            .delete_account(self.identity.access_token())
            .await
        {
            Ok(()) => Notice::AccountDeleted,
            Err(e) => {
                tracing::error!(error = %e, "Account deletion failed");
                Notice::AccountDeletionFailed
            }
        };

        self.sign_out().await;
        notice
    }

    /// End the session. Local state is marked signed out even if the remote
    /// call fails.
    pub async fn sign_out(&mut self) {
        if let Err(e) = self.gateway.sign_out(self.identity.access_token()).await {
            tracing::warn!(error = %e, "Sign out failed");
        }
        self.signed_out = true;
    }
}

/// `now` truncated to the store's microsecond resolution, pushed past `prior`
/// when the clock has not advanced.
fn next_timestamp(prior: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    let tick = Duration::microseconds(1);
    let now = now.duration_trunc(tick).unwrap_or(now);
    match prior {
        Some(prior) if prior >= now => prior + tick,
        _ => now,
    }
}
