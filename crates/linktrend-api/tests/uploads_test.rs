mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::setup_test_app;
use serde_json::Value;

#[tokio::test]
async fn test_thumbnail_upload_returns_public_url() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part(
        "thumbnail",
        Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
            .file_name("my cover.jpg")
            .mime_type("image/jpeg"),
    );

    let response = app.server.post("/api/upload/thumbnail").multipart(form).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let url = body["url"].as_str().unwrap();
    let file_name = body["fileName"].as_str().unwrap();
    assert!(url.contains("/thumbnails/"));
    assert!(file_name.starts_with("thumbnails/"));
    assert!(file_name.ends_with("_my_cover.jpg"));
    assert!(body.get("duration").is_none());
}

#[tokio::test]
async fn test_video_upload_falls_back_to_zero_duration() {
    let app = setup_test_app().await;

    // Not a decodable video, so the probe fails and the upload degrades to
    // the zero duration instead of failing.
    let form = MultipartForm::new().add_part(
        "video",
        Part::bytes(b"not really mp4 data".to_vec())
            .file_name("clip.mp4")
            .mime_type("video/mp4"),
    );

    let response = app.server.post("/api/upload/video").multipart(form).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["duration"], "00:00");
    assert!(body["url"].as_str().unwrap().contains("/videos/"));
}

#[tokio::test]
async fn test_upload_requires_named_part() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part(
        "wrong-name",
        Part::bytes(b"data".to_vec())
            .file_name("clip.mp4")
            .mime_type("video/mp4"),
    );

    let response = app.server.post("/api/upload/video").multipart(form).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("No video file"));
}

#[tokio::test]
async fn test_upload_rejects_empty_and_mistyped_files() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part(
        "video",
        Part::bytes(Vec::new())
            .file_name("empty.mp4")
            .mime_type("video/mp4"),
    );
    let response = app.server.post("/api/upload/video").multipart(form).await;
    assert_eq!(response.status_code(), 400);

    let form = MultipartForm::new().add_part(
        "thumbnail",
        Part::bytes(b"plain text".to_vec())
            .file_name("notes.txt")
            .mime_type("text/plain"),
    );
    let response = app
        .server
        .post("/api/upload/thumbnail")
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 400);
}
