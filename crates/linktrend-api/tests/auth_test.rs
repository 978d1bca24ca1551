mod helpers;

use helpers::{admin_cookie, setup_test_app, signed_in_user, TEST_ADMIN_EMAIL};
use serde_json::{json, Value};

#[tokio::test]
async fn test_admin_login_establishes_session() {
    let app = setup_test_app().await;

    let cookie = admin_cookie(&app).await;
    assert!(cookie.starts_with("linktrend_session="));

    let response = app
        .server
        .get("/api/auth/verify")
        .add_header("Cookie", cookie)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], TEST_ADMIN_EMAIL);
}

#[tokio::test]
async fn test_admin_login_rejects_bad_credentials() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({"username": "admin", "password": "wrong"}))
        .await;
    assert_eq!(response.status_code(), 401);

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({"username": "someone-else", "password": "wrong"}))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_login_requires_some_credential() {
    let app = setup_test_app().await;

    let response = app.server.post("/api/auth/login").json(&json!({})).await;
    assert_eq!(response.status_code(), 400);

    // A federated credential that is not a real provider token is refused
    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({"credential": "not-a-real-token"}))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_verify_without_session_is_null() {
    let app = setup_test_app().await;

    let response = app.server.get("/api/auth/verify").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["user"].is_null());

    // An unknown cookie behaves the same
    let response = app
        .server
        .get("/api/auth/verify")
        .add_header("Cookie", "linktrend_session=unknown-token")
        .await;
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = setup_test_app().await;
    let cookie = admin_cookie(&app).await;

    let response = app
        .server
        .post("/api/auth/logout")
        .add_header("Cookie", cookie.clone())
        .await;
    assert_eq!(response.status_code(), 200);

    let response = app
        .server
        .get("/api/auth/verify")
        .add_header("Cookie", cookie.clone())
        .await;
    let body: Value = response.json();
    assert_eq!(body["success"], false);

    // The dead session no longer opens the admin gate either
    let response = app
        .server
        .get("/api/users")
        .add_header("Cookie", cookie)
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_admin_gate_reports_missing_user() {
    let app = setup_test_app().await;
    let cookie = admin_cookie(&app).await;

    // Remove the user record out from under the live session: the gate
    // reports the missing user, not a generic auth failure
    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(TEST_ADMIN_EMAIL)
        .execute(&app.pool)
        .await
        .unwrap();

    let response = app
        .server
        .get("/api/users")
        .add_header("Cookie", cookie)
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_user_admin_endpoints() {
    let app = setup_test_app().await;

    let (user, user_cookie) = signed_in_user(&app, "a@x.com").await;
    let admin = admin_cookie(&app).await;

    // Listing users is admin-only
    let response = app.server.get("/api/users").await;
    assert_eq!(response.status_code(), 401);
    let response = app
        .server
        .get("/api/users")
        .add_header("Cookie", user_cookie.clone())
        .await;
    assert_eq!(response.status_code(), 403);

    let response = app
        .server
        .get("/api/users")
        .add_header("Cookie", admin.clone())
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let emails: Vec<&str> = body["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert!(emails.contains(&"a@x.com"));
    assert!(emails.contains(&TEST_ADMIN_EMAIL));

    // Deleting the user also invalidates their session
    let response = app
        .server
        .delete(&format!("/api/users/{}", user.id))
        .add_header("Cookie", admin.clone())
        .await;
    assert_eq!(response.status_code(), 200);

    let response = app
        .server
        .get("/api/auth/verify")
        .add_header("Cookie", user_cookie)
        .await;
    let body: Value = response.json();
    assert_eq!(body["success"], false);

    let response = app
        .server
        .delete(&format!("/api/users/{}", user.id))
        .add_header("Cookie", admin)
        .await;
    assert_eq!(response.status_code(), 404);
}
