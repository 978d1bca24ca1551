//! Media ingestion: multipart uploads proxied to the storage backend.
//!
//! The upload path surfaces storage failures with their category (bad API
//! key, missing zone, backend detail) instead of one opaque error; the
//! duration probe, by contrast, is allowed to fail and degrades to `00:00`.

use axum::{extract::Multipart, extract::State, Json};
use bytes::Bytes;
use chrono::Utc;
use linktrend_core::AppError;
use linktrend_processing::{validate_upload, UploadLimits};
use linktrend_storage::keys::{thumbnail_key, video_key};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{storage_error_to_app, ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadEnvelope {
    pub success: bool,
    pub url: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

struct UploadedFile {
    data: Bytes,
    content_type: String,
    file_name: String,
}

/// Pull the named file part out of a multipart body.
async fn read_file_part(
    multipart: &mut Multipart,
    part_name: &str,
) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(part_name) {
            continue;
        }

        let file_name = field
            .file_name()
            .unwrap_or("upload")
            .to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {}", e)))?;

        return Ok(UploadedFile {
            data,
            content_type,
            file_name,
        });
    }

    Err(AppError::InvalidInput(format!(
        "No {} file provided",
        part_name
    )))
}

#[utoipa::path(
    post,
    path = "/api/upload/video",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video uploaded", body = UploadEnvelope),
        (status = 400, description = "Invalid upload", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadEnvelope>, HttpAppError> {
    let file = read_file_part(&mut multipart, "video").await?;

    let limits = UploadLimits {
        max_size_bytes: state.config.max_video_size_bytes,
        content_type_prefix: "video/",
    };
    validate_upload(&file.data, &file.content_type, &limits)?;

    tracing::debug!(
        file_name = %file.file_name,
        size = file.data.len(),
        content_type = %file.content_type,
        "Video upload received"
    );

    let duration = state.probe.duration_or_fallback(&file.data).await;

    let key = video_key(Utc::now().timestamp_millis(), &file.file_name);
    let url = state
        .storage
        .upload(&key, &file.content_type, file.data)
        .await
        .map_err(storage_error_to_app)?;

    tracing::info!(key = %key, duration = %duration, "Video uploaded");

    Ok(Json(UploadEnvelope {
        success: true,
        url,
        file_name: key,
        duration: Some(duration),
    }))
}

#[utoipa::path(
    post,
    path = "/api/upload/thumbnail",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Thumbnail uploaded", body = UploadEnvelope),
        (status = 400, description = "Invalid upload", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadEnvelope>, HttpAppError> {
    let file = read_file_part(&mut multipart, "thumbnail").await?;

    let limits = UploadLimits {
        max_size_bytes: state.config.max_thumbnail_size_bytes,
        content_type_prefix: "image/",
    };
    validate_upload(&file.data, &file.content_type, &limits)?;

    let key = thumbnail_key(Utc::now().timestamp_millis(), &file.file_name);
    let url = state
        .storage
        .upload(&key, &file.content_type, file.data)
        .await
        .map_err(storage_error_to_app)?;

    tracing::info!(key = %key, "Thumbnail uploaded");

    Ok(Json(UploadEnvelope {
        success: true,
        url,
        file_name: key,
        duration: None,
    }))
}
