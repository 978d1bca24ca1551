//! Video catalog endpoints.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use linktrend_core::models::{NewVideo, Video};
use linktrend_core::{can_view, validation, AppError};
use linktrend_storage::keys::key_from_url;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::middleware::current_user;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::auth::OkEnvelope;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoEnvelope {
    pub success: bool,
    pub video: Video,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VideosEnvelope {
    pub success: bool,
    pub videos: Vec<Video>,
}

/// Parse a catalog id the way the source treated malformed ids: as a lookup
/// that simply finds nothing.
fn parse_video_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound("Video not found".to_string()))
}

#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    request_body = NewVideo,
    responses(
        (status = 200, description = "Catalog entry created", body = VideoEnvelope),
        (status = 400, description = "Invalid metadata", body = ErrorResponse)
    )
)]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    ValidatedJson(new): ValidatedJson<NewVideo>,
) -> Result<Json<VideoEnvelope>, HttpAppError> {
    validation::validate_video(&new)?;

    let video = state.videos.create(new).await?;
    tracing::info!(video_id = %video.id, premium = video.is_premium, "Video created");

    Ok(Json(VideoEnvelope {
        success: true,
        video,
    }))
}

#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "videos",
    responses(
        (status = 200, description = "All videos, newest first", body = VideosEnvelope)
    )
)]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VideosEnvelope>, HttpAppError> {
    let videos = state.videos.list_all().await?;
    Ok(Json(VideosEnvelope {
        success: true,
        videos,
    }))
}

#[utoipa::path(
    get,
    path = "/api/videos/{id}",
    tag = "videos",
    params(("id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video found", body = VideoEnvelope),
        (status = 404, description = "Video not found", body = ErrorResponse)
    )
)]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VideoEnvelope>, HttpAppError> {
    let id = parse_video_id(&id)?;
    let video = state
        .videos
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    Ok(Json(VideoEnvelope {
        success: true,
        video,
    }))
}

#[utoipa::path(
    get,
    path = "/api/videos/creator/{creator_id}",
    tag = "videos",
    params(("creator_id" = String, Path, description = "Creator ID")),
    responses(
        (status = 200, description = "Creator's videos, newest first", body = VideosEnvelope)
    )
)]
pub async fn list_videos_by_creator(
    State(state): State<Arc<AppState>>,
    Path(creator_id): Path<String>,
) -> Result<Json<VideosEnvelope>, HttpAppError> {
    let videos = state.videos.list_by_creator(&creator_id).await?;
    Ok(Json(VideosEnvelope {
        success: true,
        videos,
    }))
}

#[utoipa::path(
    post,
    path = "/api/videos/{id}/view",
    tag = "videos",
    params(("id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "View counted", body = VideoEnvelope),
        (status = 403, description = "Caller may not play this video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    )
)]
pub async fn increment_views(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<VideoEnvelope>, HttpAppError> {
    let id = parse_video_id(&id)?;
    let video = state
        .videos
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    // Only playback-eligible views count: a premium video must be unlocked
    // for the session's user before its counter moves.
    let user = current_user(&state, &headers).await?;
    if !can_view(&video, user.as_ref()) {
        return Err(HttpAppError(AppError::Forbidden(
            "Video is locked".to_string(),
        )));
    }

    let video = state
        .videos
        .increment_views(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    Ok(Json(VideoEnvelope {
        success: true,
        video,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/videos/{id}",
    tag = "videos",
    params(("id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video deleted", body = OkEnvelope),
        (status = 404, description = "Video not found", body = ErrorResponse)
    )
)]
pub async fn delete_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OkEnvelope>, HttpAppError> {
    let id = parse_video_id(&id)?;
    let video = state
        .videos
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    // Best effort: a storage failure must never block catalog cleanup.
    for url in [&video.video_url, &video.thumbnail_url] {
        if let Some(key) = key_from_url(url) {
            if let Err(e) = state.storage.delete(&key).await {
                tracing::warn!(error = %e, key = %key, "Failed to delete backing media");
            }
        }
    }

    state.videos.delete(id).await?;
    tracing::info!(video_id = %id, "Video deleted");

    Ok(Json(OkEnvelope { success: true }))
}
