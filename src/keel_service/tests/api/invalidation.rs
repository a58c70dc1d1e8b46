use serde_json::json;

use crate::helpers::{PLACEHOLDER_DOMAIN, TestApp, message};

#[tokio::test]
async fn should_anonymize_account_and_keep_rows() {
    let app = TestApp::new().await;
    let (user_id, token) = app.signed_in_user().await;

    let response = app.post_invalidation(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        message(response).await,
        json!({ "message": "User invalidated successfully" })
    );

    assert!(app.auth.contains(&user_id).await);
    assert!(app.auth.is_marked_deleted(&user_id).await);
    assert_eq!(
        app.auth.email(&user_id).await,
        Some(format!("{user_id}@{PLACEHOLDER_DOMAIN}"))
    );
    assert_eq!(app.auth.phone(&user_id).await.as_deref(), Some(""));

    let profile = app.profiles.get(&user_id).await.expect("profile is kept");
    assert_eq!(profile.username.as_deref(), Some(""));
    assert_eq!(profile.website.as_deref(), Some(""));
    assert_eq!(profile.avatar_url.as_deref(), Some(""));
    assert_eq!(profile.full_name.as_deref(), Some(""));
}

#[tokio::test]
async fn should_be_repeatable() {
    let app = TestApp::new().await;
    let (user_id, token) = app.signed_in_user().await;

    assert_eq!(app.post_invalidation(Some(&token)).await.status().as_u16(), 200);
    assert_eq!(app.post_invalidation(Some(&token)).await.status().as_u16(), 200);
    assert!(app.auth.is_marked_deleted(&user_id).await);
}

#[tokio::test]
async fn should_invalidate_several_users_with_profiles() {
    let app = TestApp::new().await;
    let (first_id, first_token) = app.signed_in_user().await;
    let (second_id, second_token) = app.signed_in_user().await;

    assert_eq!(app.post_invalidation(Some(&first_token)).await.status().as_u16(), 200);
    let response = app.post_invalidation(Some(&second_token)).await;

    assert_eq!(response.status().as_u16(), 200);
    for user_id in [first_id, second_id] {
        assert!(app.auth.is_marked_deleted(&user_id).await);
        let profile = app.profiles.get(&user_id).await.expect("profile is kept");
        assert_eq!(profile.username.as_deref(), Some(""));
    }
}

#[tokio::test]
async fn should_return_400_for_unknown_token() {
    let app = TestApp::new().await;
    let (user_id, _) = app.signed_in_user().await;
    let forged = keel_core::AccessToken::new(secrecy::Secret::new("forged".to_string()));

    let response = app.post_invalidation(Some(&forged)).await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(!app.auth.is_marked_deleted(&user_id).await);
}
