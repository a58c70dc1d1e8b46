use crate::helpers::TestApp;

#[tokio::test]
async fn should_answer_preflight_on_every_route() {
    let app = TestApp::new().await;

    for path in [
        "/secure_update_password",
        "/user-self-deletion",
        "/user-invalidation",
    ] {
        let response = app.preflight(path).await;

        assert_eq!(response.status().as_u16(), 200, "Failed for path: {path}");
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        assert_eq!(header("access-control-allow-origin").as_deref(), Some("*"));
        assert_eq!(
            header("access-control-allow-headers").as_deref(),
            Some("authorization, x-client-info, apikey, content-type")
        );
        assert!(response.text().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn should_not_authenticate_preflight() {
    let app = TestApp::new().await;
    let (user_id, _) = app.signed_in_user().await;

    let response = app.preflight("/user-self-deletion").await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(app.auth.contains(&user_id).await);
}
