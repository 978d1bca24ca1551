mod helpers;

use helpers::fixtures::{create_video, transaction_body};
use helpers::{admin_cookie, setup_test_app, signed_in_user};
use serde_json::Value;
use uuid::Uuid;

#[tokio::test]
async fn test_create_and_list_videos_newest_first() {
    let app = setup_test_app().await;

    let free = create_video(&app, "Free clip", 0).await;
    let premium = create_video(&app, "Premium clip", 100).await;

    assert_eq!(free["isPremium"], false);
    assert_eq!(free["views"], 0);
    assert_eq!(premium["isPremium"], true);

    let response = app.server.get("/api/videos").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let videos = body["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0]["title"], "Premium clip");
    assert_eq!(videos[1]["title"], "Free clip");
}

#[tokio::test]
async fn test_get_video() {
    let app = setup_test_app().await;
    let video = create_video(&app, "Clip", 0).await;
    let video_id = video["id"].as_str().unwrap();

    let response = app.server.get(&format!("/api/videos/{}", video_id)).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["video"]["title"], "Clip");

    // Absent and malformed ids both read as not found
    let response = app
        .server
        .get(&format!("/api/videos/{}", Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), 404);

    let response = app.server.get("/api/videos/not-a-uuid").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_list_by_creator() {
    let app = setup_test_app().await;
    create_video(&app, "Clip A", 0).await;
    create_video(&app, "Clip B", 0).await;

    let response = app.server.get("/api/videos/creator/creator@x.com").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["videos"].as_array().unwrap().len(), 2);

    let response = app.server.get("/api/videos/creator/nobody@x.com").await;
    let body: Value = response.json();
    assert_eq!(body["videos"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_view_counter_increments() {
    let app = setup_test_app().await;
    let video = create_video(&app, "Free clip", 0).await;
    let video_id = video["id"].as_str().unwrap();

    // Free videos count views for anonymous callers
    let response = app
        .server
        .post(&format!("/api/videos/{}/view", video_id))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["video"]["views"], 1);

    let response = app
        .server
        .post(&format!("/api/videos/{}/view", video_id))
        .await;
    let body: Value = response.json();
    assert_eq!(body["video"]["views"], 2);
}

#[tokio::test]
async fn test_premium_view_requires_unlock() {
    let app = setup_test_app().await;
    let video = create_video(&app, "Premium clip", 100).await;
    let video_id = video["id"].as_str().unwrap();

    // Anonymous caller cannot play a premium video
    let response = app
        .server
        .post(&format!("/api/videos/{}/view", video_id))
        .await;
    assert_eq!(response.status_code(), 403);

    // A signed-in user without the unlock cannot either
    let (user, cookie) = signed_in_user(&app, "a@x.com").await;
    let response = app
        .server
        .post(&format!("/api/videos/{}/view", video_id))
        .add_header("Cookie", cookie.clone())
        .await;
    assert_eq!(response.status_code(), 403);

    // Approving their payment request unlocks playback
    app.server
        .post("/api/transactions")
        .json(&transaction_body(video_id, user.id, "VIEW01"))
        .await
        .assert_status_ok();
    let admin = admin_cookie(&app).await;
    let response = app
        .server
        .get("/api/transactions/pending")
        .add_header("Cookie", admin.clone())
        .await;
    let body: Value = response.json();
    let transaction_id = body["transactions"][0]["id"].as_str().unwrap().to_string();
    app.server
        .post(&format!("/api/transactions/{}/approve", transaction_id))
        .add_header("Cookie", admin)
        .await
        .assert_status_ok();

    let response = app
        .server
        .post(&format!("/api/videos/{}/view", video_id))
        .add_header("Cookie", cookie)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["video"]["views"], 1);
}

#[tokio::test]
async fn test_delete_requires_admin() {
    let app = setup_test_app().await;
    let video = create_video(&app, "Clip", 0).await;
    let video_id = video["id"].as_str().unwrap();

    let response = app
        .server
        .delete(&format!("/api/videos/{}", video_id))
        .await;
    assert_eq!(response.status_code(), 401);

    let (_, cookie) = signed_in_user(&app, "a@x.com").await;
    let response = app
        .server
        .delete(&format!("/api/videos/{}", video_id))
        .add_header("Cookie", cookie)
        .await;
    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn test_delete_survives_storage_failure() {
    let app = setup_test_app().await;

    // The fixture's media URLs name objects that were never uploaded, so the
    // backing-store deletes fail; catalog cleanup must proceed regardless.
    let video = create_video(&app, "Clip", 0).await;
    let video_id = video["id"].as_str().unwrap();

    let admin = admin_cookie(&app).await;
    let response = app
        .server
        .delete(&format!("/api/videos/{}", video_id))
        .add_header("Cookie", admin.clone())
        .await;
    assert_eq!(response.status_code(), 200);

    let response = app.server.get("/api/videos").await;
    let body: Value = response.json();
    assert_eq!(body["videos"].as_array().unwrap().len(), 0);

    // Deleting again is a 404
    let response = app
        .server
        .delete(&format!("/api/videos/{}", video_id))
        .add_header("Cookie", admin)
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_create_video_validation() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/videos")
        .json(&serde_json::json!({
            "title": "  ",
            "description": "d",
            "price": 0,
            "creatorName": "c",
            "creatorId": "c@x.com",
            "thumbnailUrl": "u",
            "videoUrl": "v",
            "uploadDate": "2026-08-01"
        }))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = app
        .server
        .post("/api/videos")
        .json(&serde_json::json!({
            "title": "t",
            "description": "d",
            "price": -5,
            "creatorName": "c",
            "creatorId": "c@x.com",
            "thumbnailUrl": "u",
            "videoUrl": "v",
            "uploadDate": "2026-08-01"
        }))
        .await;
    assert_eq!(response.status_code(), 400);
}
