//! Shared request fixtures.

use super::TestApp;
use serde_json::{json, Value};
use uuid::Uuid;

/// Create a catalog entry through the API and return the video JSON.
pub async fn create_video(app: &TestApp, title: &str, price: i64) -> Value {
    let response = app
        .server
        .post("/api/videos")
        .json(&json!({
            "title": title,
            "description": "integration fixture",
            "price": price,
            "creatorName": "Creator",
            "creatorId": "creator@x.com",
            "thumbnailUrl": "http://localhost:5000/media/thumbnails/1_cover.jpg",
            "videoUrl": "http://localhost:5000/media/videos/1_clip.mp4",
            "duration": "01:00",
            "uploadDate": "2026-08-01"
        }))
        .await;
    assert_eq!(response.status_code(), 200, "video creation failed");

    let body: Value = response.json();
    body["video"].clone()
}

/// A payment-request body for the given video/user with a distinct reference.
pub fn transaction_body(video_id: &str, user_id: Uuid, trx_ref: &str) -> Value {
    json!({
        "videoId": video_id,
        "userId": user_id,
        "amount": 100,
        "method": "bkash",
        "mobileNumber": "01712345678",
        "trxRef": trx_ref
    })
}
