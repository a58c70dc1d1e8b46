//! Axum-specific password change route.

use axum::{extract::Request, extract::State, response::Response};
use keel_adapters::handlers;
use keel_core::{
    AdminAuthApi, AuthRequest, AuthResponseHelpers, CredentialVerifier, IdentityResolver,
};

use crate::adapters::{AxumRequest, response_builder};

/// Ports the password change route needs.
#[derive(Clone)]
pub struct PasswordState<I, V, A> {
    pub resolver: I,
    pub verifier: V,
    pub admin: A,
}

impl<I, V, A> PasswordState<I, V, A> {
    pub fn new(resolver: I, verifier: V, admin: A) -> Self {
        Self {
            resolver,
            verifier,
            admin,
        }
    }
}

/// Axum password change route.
///
/// The actual password change logic is in the framework-agnostic handler.
#[tracing::instrument(name = "Secure Update Password", skip_all)]
pub async fn change_password<I, V, A>(
    State(state): State<PasswordState<I, V, A>>,
    request: Request,
) -> Response
where
    I: IdentityResolver + Clone + 'static,
    V: CredentialVerifier + Clone + 'static,
    A: AdminAuthApi + Clone + 'static,
{
    let request = AxumRequest::from(request);
    if request.is_preflight() {
        return handlers::handle_preflight(response_builder());
    }

    let token = request.bearer_token();
    let body = match request.into_body_bytes().await {
        Ok(body) => body,
        Err(e) => return response_builder().account_error(&e),
    };

    handlers::handle_change_password(
        state.resolver,
        state.verifier,
        state.admin,
        token,
        &body,
        response_builder(),
    )
    .await
}
