use keel_core::{CredentialVerifier, IdentityResolver, Password};
use secrecy::Secret;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp, message};

fn password(raw: &str) -> Password {
    Password::try_from(Secret::new(raw.to_string())).unwrap()
}

#[tokio::test]
async fn should_return_200_when_old_password_matches() {
    let app = TestApp::new().await;
    let (_, token) = app.signed_in_user().await;

    let response = app
        .post_change_password(
            Some(&token),
            &json!({ "oldPassword": PASSWORD, "newPassword": "newSecure!1" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(
        message(response).await,
        json!({ "message": "Password updated successfully" })
    );

    let identity = app.auth.resolve_identity(&token).await.unwrap();
    assert!(
        app.auth
            .verify_credential(&identity, &password("newSecure!1"))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn should_return_400_when_old_password_is_wrong() {
    let app = TestApp::new().await;
    let (_, token) = app.signed_in_user().await;

    let response = app
        .post_change_password(
            Some(&token),
            &json!({ "oldPassword": "wrong", "newPassword": "x" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        message(response).await,
        json!({ "error": "Invalid old password" })
    );

    let identity = app.auth.resolve_identity(&token).await.unwrap();
    assert!(
        app.auth
            .verify_credential(&identity, &password(PASSWORD))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn should_return_400_without_authorization() {
    let app = TestApp::new().await;

    let response = app
        .post_change_password(
            None,
            &json!({ "oldPassword": PASSWORD, "newPassword": "newSecure!1" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(message(response).await["error"].is_string());
}

#[tokio::test]
async fn should_return_400_for_malformed_body() {
    let app = TestApp::new().await;
    let (_, token) = app.signed_in_user().await;

    let test_cases = [
        json!({}),
        json!({ "oldPassword": PASSWORD }),
        json!({ "newPassword": "newSecure!1" }),
        json!({ "old_password": PASSWORD, "new_password": "newSecure!1" }),
        json!({ "oldPassword": "", "newPassword": "newSecure!1" }),
    ];

    for body in test_cases {
        let response = app.post_change_password(Some(&token), &body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {body}"
        );
    }
}
