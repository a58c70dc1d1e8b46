//! Axum-specific invalidation route.

use std::sync::Arc;

use axum::{extract::Request, extract::State, response::Response};
use keel_adapters::handlers;
use keel_core::{AdminAuthApi, AuthRequest, IdentityResolver, ProfileStore};

use crate::adapters::{AxumRequest, response_builder};

#[derive(Clone)]
pub struct InvalidationState<I, P, A> {
    pub resolver: I,
    pub profiles: P,
    pub admin: A,
    pub placeholder_domain: Arc<str>,
}

impl<I, P, A> InvalidationState<I, P, A> {
    pub fn new(
        resolver: I,
        profiles: P,
        admin: A,
        placeholder_domain: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            resolver,
            profiles,
            admin,
            placeholder_domain: placeholder_domain.into(),
        }
    }
}

/// Axum invalidation route. Anonymizes the caller's own account.
#[tracing::instrument(name = "User Invalidation", skip_all)]
pub async fn invalidate_user<I, P, A>(
    State(state): State<InvalidationState<I, P, A>>,
    request: Request,
) -> Response
where
    I: IdentityResolver + Clone + 'static,
    P: ProfileStore + Clone + 'static,
    A: AdminAuthApi + Clone + 'static,
{
    let request = AxumRequest::from(request);
    if request.is_preflight() {
        return handlers::handle_preflight(response_builder());
    }

    handlers::handle_invalidation(
        state.resolver,
        state.profiles,
        state.admin,
        &state.placeholder_domain,
        request.bearer_token(),
        response_builder(),
    )
    .await
}
