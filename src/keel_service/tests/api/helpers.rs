use fake::{Fake, faker::internet::en::SafeEmail};
use keel_adapters::{HashMapAuthStore, HashMapObjectStore, HashMapProfileStore};
use keel_core::{AccessToken, ObjectNamespace, ObjectStore, Password, UserId};
use keel_service::AccountService;
use secrecy::Secret;

pub const AVATAR_BUCKET: &str = "avatars";
pub const PLACEHOLDER_DOMAIN: &str = "deleted-users.example.com";
pub const PASSWORD: &str = "old123";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub auth: HashMapAuthStore,
    pub profiles: HashMapProfileStore,
    pub objects: HashMapObjectStore,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_objects(HashMapObjectStore::with_buckets([AVATAR_BUCKET])).await
    }

    pub async fn with_objects(objects: HashMapObjectStore) -> Self {
        Self::spawn(objects.clone(), objects).await
    }

    /// Serves `object_store` while tests inspect `objects` directly.
    pub async fn spawn<O>(objects: HashMapObjectStore, object_store: O) -> Self
    where
        O: ObjectStore + Clone + 'static,
    {
        let profiles = HashMapProfileStore::new();
        let auth = HashMapAuthStore::with_profiles(profiles.clone());

        let service = AccountService::new(
            auth.clone(),
            auth.clone(),
            auth.clone(),
            profiles.clone(),
            object_store,
            AVATAR_BUCKET,
            PLACEHOLDER_DOMAIN,
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(service.run_standalone(listener));

        let http_client = reqwest::Client::builder()
            .build()
            .expect("Failed to build http client");

        Self {
            address,
            http_client,
            auth,
            profiles,
            objects,
        }
    }

    /// Creates an account with [`PASSWORD`] and signs it in.
    pub async fn signed_in_user(&self) -> (UserId, AccessToken) {
        let email: String = SafeEmail().fake();
        let password = Password::try_from(Secret::new(PASSWORD.to_string())).unwrap();
        let user_id = self.auth.create_account(&email, &password).await.unwrap();
        let token = self.auth.issue_session(&user_id).await.unwrap();
        (user_id, token)
    }

    pub async fn upload_avatar(&self, user_id: &UserId, name: &str) {
        let namespace = ObjectNamespace::for_identity(AVATAR_BUCKET, user_id);
        self.objects
            .put(AVATAR_BUCKET, namespace.path(&keel_core::ObjectName::new(name)))
            .await;
    }

    pub async fn post_change_password<Body>(
        &self,
        token: Option<&AccessToken>,
        body: &Body,
    ) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.authorized(self.http_client.post(self.url("/secure_update_password")), token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_self_deletion(&self, token: Option<&AccessToken>) -> reqwest::Response {
        self.authorized(self.http_client.post(self.url("/user-self-deletion")), token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_invalidation(&self, token: Option<&AccessToken>) -> reqwest::Response {
        self.authorized(self.http_client.post(self.url("/user-invalidation")), token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn preflight(&self, path: &str) -> reqwest::Response {
        self.http_client
            .request(reqwest::Method::OPTIONS, self.url(path))
            .header("origin", "https://app.example.com")
            .header("access-control-request-method", "POST")
            .send()
            .await
            .expect("Failed to execute request")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    fn authorized(
        &self,
        request: reqwest::RequestBuilder,
        token: Option<&AccessToken>,
    ) -> reqwest::RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }
}

pub async fn message(response: reqwest::Response) -> serde_json::Value {
    response
        .json::<serde_json::Value>()
        .await
        .expect("Response body was not JSON")
}
