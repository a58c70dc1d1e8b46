use keel_adapters::HashMapObjectStore;
use keel_core::{AccessScope, ObjectName, ObjectNamespace, ObjectStore, ObjectStoreError};
use serde_json::json;

use crate::helpers::{AVATAR_BUCKET, TestApp, message};

/// Lists from the wrapped store but refuses every removal.
#[derive(Clone)]
struct RemovalFailingStore(HashMapObjectStore);

#[async_trait::async_trait]
impl ObjectStore for RemovalFailingStore {
    async fn list(
        &self,
        scope: AccessScope<'_>,
        namespace: &ObjectNamespace,
    ) -> Result<Vec<ObjectName>, ObjectStoreError> {
        self.0.list(scope, namespace).await
    }

    async fn remove_many(
        &self,
        _scope: AccessScope<'_>,
        _namespace: &ObjectNamespace,
        _names: &[ObjectName],
    ) -> Result<(), ObjectStoreError> {
        Err(ObjectStoreError::UnexpectedError(
            "Storage unavailable".to_string(),
        ))
    }
}

#[tokio::test]
async fn should_delete_account_profile_and_avatars() {
    let app = TestApp::new().await;
    let (user_id, token) = app.signed_in_user().await;
    let (other_id, _) = app.signed_in_user().await;
    app.upload_avatar(&user_id, "a.png").await;
    app.upload_avatar(&user_id, "b.png").await;
    app.upload_avatar(&other_id, "c.png").await;

    let response = app.post_self_deletion(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        message(response).await,
        json!({ "message": "User deleted successfully" })
    );

    assert!(!app.auth.contains(&user_id).await);
    assert!(app.profiles.get(&user_id).await.is_none());
    assert_eq!(
        app.objects
            .count(&ObjectNamespace::for_identity(AVATAR_BUCKET, &user_id))
            .await,
        0
    );

    assert!(app.auth.contains(&other_id).await);
    assert_eq!(
        app.objects
            .count(&ObjectNamespace::for_identity(AVATAR_BUCKET, &other_id))
            .await,
        1
    );
}

#[tokio::test]
async fn should_reject_second_deletion_with_same_token() {
    let app = TestApp::new().await;
    let (_, token) = app.signed_in_user().await;

    let first = app.post_self_deletion(Some(&token)).await;
    assert_eq!(first.status().as_u16(), 200);

    let second = app.post_self_deletion(Some(&token)).await;
    assert_eq!(second.status().as_u16(), 400);
    assert!(
        message(second).await["error"]
            .as_str()
            .is_some_and(|e| e.starts_with("invalid JWT"))
    );
}

#[tokio::test]
async fn should_keep_account_when_avatar_listing_fails() {
    let app = TestApp::with_objects(HashMapObjectStore::new()).await;
    let (user_id, token) = app.signed_in_user().await;

    let response = app.post_self_deletion(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        message(response).await,
        json!({ "error": "Bucket not found" })
    );
    assert!(app.auth.contains(&user_id).await);
}

#[tokio::test]
async fn should_keep_account_and_avatars_when_avatar_removal_fails() {
    let objects = HashMapObjectStore::with_buckets([AVATAR_BUCKET]);
    let app = TestApp::spawn(objects.clone(), RemovalFailingStore(objects)).await;
    let (user_id, token) = app.signed_in_user().await;
    app.upload_avatar(&user_id, "a.png").await;
    app.upload_avatar(&user_id, "nested/b.png").await;

    let response = app.post_self_deletion(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        message(response).await,
        json!({ "error": "Storage unavailable" })
    );
    assert!(app.auth.contains(&user_id).await);
    assert!(app.profiles.get(&user_id).await.is_some());
    assert_eq!(
        app.objects
            .count(&ObjectNamespace::for_identity(AVATAR_BUCKET, &user_id))
            .await,
        2
    );
}

#[tokio::test]
async fn should_return_400_without_authorization() {
    let app = TestApp::new().await;

    let response = app.post_self_deletion(None).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
