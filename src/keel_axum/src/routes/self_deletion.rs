//! Axum-specific self-deletion route.

use std::sync::Arc;

use axum::{extract::Request, extract::State, response::Response};
use keel_adapters::handlers;
use keel_core::{AdminAuthApi, AuthRequest, IdentityResolver, ObjectStore, ProfileStore};

use crate::adapters::{AxumRequest, response_builder};

/// Ports and settings the self-deletion route needs.
#[derive(Clone)]
pub struct SelfDeletionState<I, P, O, A> {
    pub resolver: I,
    pub profiles: P,
    pub objects: O,
    pub admin: A,
    pub bucket: Arc<str>,
}

impl<I, P, O, A> SelfDeletionState<I, P, O, A> {
    pub fn new(resolver: I, profiles: P, objects: O, admin: A, bucket: impl Into<Arc<str>>) -> Self {
        Self {
            resolver,
            profiles,
            objects,
            admin,
            bucket: bucket.into(),
        }
    }
}

/// Axum self-deletion route. The request body is ignored.
#[tracing::instrument(name = "User Self Deletion", skip_all)]
pub async fn delete_self<I, P, O, A>(
    State(state): State<SelfDeletionState<I, P, O, A>>,
    request: Request,
) -> Response
where
    I: IdentityResolver + Clone + 'static,
    P: ProfileStore + Clone + 'static,
    O: ObjectStore + Clone + 'static,
    A: AdminAuthApi + Clone + 'static,
{
    let request = AxumRequest::from(request);
    if request.is_preflight() {
        return handlers::handle_preflight(response_builder());
    }

    handlers::handle_self_deletion(
        state.resolver,
        state.profiles,
        state.objects,
        state.admin,
        &state.bucket,
        request.bearer_token(),
        response_builder(),
    )
    .await
}
