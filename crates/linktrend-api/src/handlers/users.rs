//! User administration endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use linktrend_core::models::User;
use linktrend_core::AppError;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::auth::OkEnvelope;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersEnvelope {
    pub success: bool,
    pub users: Vec<User>,
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "All users, newest first", body = UsersEnvelope),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UsersEnvelope>, HttpAppError> {
    let users = state.users.list_all().await?;
    Ok(Json(UsersEnvelope {
        success: true,
        users,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = OkEnvelope),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OkEnvelope>, HttpAppError> {
    let id =
        Uuid::parse_str(&id).map_err(|_| AppError::NotFound("User not found".to_string()))?;

    if !state.users.delete(id).await? {
        return Err(HttpAppError(AppError::NotFound(
            "User not found".to_string(),
        )));
    }

    // The sessions table has no FK to users, so invalidate explicitly.
    state.sessions.delete_by_user(id).await?;
    tracing::info!(user_id = %id, "User deleted");

    Ok(Json(OkEnvelope { success: true }))
}
