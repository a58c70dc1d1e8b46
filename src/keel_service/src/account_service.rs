use axum::{Router, routing::post};
use keel_axum::routes::{
    InvalidationState, PasswordState, SelfDeletionState, change_password, delete_self,
    invalidate_user,
};
use keel_core::{AdminAuthApi, CredentialVerifier, IdentityResolver, ObjectStore, ProfileStore};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::tracing::{make_span_with_request_id, on_request, on_response};

pub const CHANGE_PASSWORD_PATH: &str = "/secure_update_password";
pub const SELF_DELETION_PATH: &str = "/user-self-deletion";
pub const INVALIDATION_PATH: &str = "/user-invalidation";

/// The three account-lifecycle handlers behind one router.
pub struct AccountService {
    router: Router,
}

impl AccountService {
    /// Create a new AccountService from its ports
    ///
    /// # Arguments
    /// * `resolver` - Turns a bearer token into the caller's identity
    /// * `verifier` - Checks a password in the caller's own scope
    /// * `admin` - Elevated account API (password set, metadata rewrite, deletion)
    /// * `profiles` - Profile table
    /// * `objects` - Object storage holding avatars
    /// * `avatar_bucket` - Bucket whose `<user id>/` folder belongs to a user
    /// * `placeholder_domain` - Domain used for anonymized email addresses
    ///
    /// Every port is Clone and shared between the routes; each route only
    /// receives the ports it uses.
    #[allow(clippy::too_many_arguments)]
    pub fn new<I, V, A, P, O>(
        resolver: I,
        verifier: V,
        admin: A,
        profiles: P,
        objects: O,
        avatar_bucket: impl Into<String>,
        placeholder_domain: impl Into<String>,
    ) -> Self
    where
        I: IdentityResolver + Clone + 'static,
        V: CredentialVerifier + Clone + 'static,
        A: AdminAuthApi + Clone + 'static,
        P: ProfileStore + Clone + 'static,
        O: ObjectStore + Clone + 'static,
    {
        let router = Router::new()
            .route(
                CHANGE_PASSWORD_PATH,
                post(change_password::<I, V, A>).options(change_password::<I, V, A>),
            )
            .with_state(PasswordState::new(
                resolver.clone(),
                verifier,
                admin.clone(),
            ))
            .route(
                SELF_DELETION_PATH,
                post(delete_self::<I, P, O, A>).options(delete_self::<I, P, O, A>),
            )
            .with_state(SelfDeletionState::new(
                resolver.clone(),
                profiles.clone(),
                objects,
                admin.clone(),
                avatar_bucket.into(),
            ))
            .route(
                INVALIDATION_PATH,
                post(invalidate_user::<I, P, A>).options(invalidate_user::<I, P, A>),
            )
            .with_state(InvalidationState::new(
                resolver,
                profiles,
                admin,
                placeholder_domain.into(),
            ));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AccountService into a router that can be nested into another application
    pub fn as_nested_router(self) -> Router {
        self.with_trace_layer().router
    }

    /// Run the account service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.as_nested_router();

        tracing::info!("Account service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
