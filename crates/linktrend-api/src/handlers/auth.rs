//! Login, session verification, and logout.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use chrono::{Duration, Utc};
use linktrend_core::models::User;
use linktrend_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use utoipa::ToSchema;

use crate::auth::middleware::current_user;
use crate::auth::session::{
    clear_session_cookie, generate_token, hash_token, session_cookie, token_from_headers,
};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Login request: either a federated `credential` (a provider-issued ID
/// token) or administrative `username`/`password`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub credential: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub success: bool,
    pub user: Option<User>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OkEnvelope {
    pub success: bool,
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

async fn establish_session(state: &AppState, user: &User) -> Result<String, AppError> {
    let token = generate_token();
    let expires_at = Utc::now() + Duration::hours(state.config.session_ttl_hours);
    state
        .sessions
        .create(user.id, &user.email, &hash_token(&token), expires_at)
        .await?;
    Ok(token)
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established", body = UserEnvelope),
        (status = 400, description = "Missing credential", body = ErrorResponse),
        (status = 401, description = "Verification failed", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let user = match body {
        LoginRequest {
            credential: Some(credential),
            ..
        } => login_with_credential(&state, &credential).await?,
        LoginRequest {
            username: Some(username),
            password: Some(password),
            ..
        } => login_with_admin_credentials(&state, &username, &password).await?,
        _ => {
            return Err(HttpAppError(AppError::InvalidInput(
                "Google credential is required".to_string(),
            )))
        }
    };

    let token = establish_session(&state, &user).await?;
    let max_age = state.config.session_ttl_hours * 3600;

    tracing::info!(user_id = %user.id, "Login successful");

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token, max_age))]),
        Json(UserEnvelope {
            success: true,
            user: Some(user),
        }),
    ))
}

async fn login_with_credential(state: &AppState, credential: &str) -> Result<User, AppError> {
    let claims = state.google.verify(credential).await?;

    let name = claims.name.unwrap_or_else(|| claims.email.clone());
    state
        .users
        .get_or_create(&name, &claims.email, claims.picture.as_deref())
        .await
}

async fn login_with_admin_credentials(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    let (Some(expected_username), Some(expected_password)) = (
        state.config.admin_username.as_deref(),
        state.config.admin_password.as_deref(),
    ) else {
        return Err(AppError::Internal(
            "Admin login not configured".to_string(),
        ));
    };

    if !(secure_compare(username, expected_username) & secure_compare(password, expected_password))
    {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let admin_email = state.config.admin_email.clone();
    state
        .users
        .get_or_create("System Administrator", &admin_email, None)
        .await
}

#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "auth",
    responses(
        (status = 200, description = "Current user, or null when unauthenticated", body = UserEnvelope)
    )
)]
pub async fn verify(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserEnvelope>, HttpAppError> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(UserEnvelope {
        success: user.is_some(),
        user,
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session destroyed", body = OkEnvelope)
    )
)]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HttpAppError> {
    if let Some(token) = token_from_headers(&headers) {
        state
            .sessions
            .delete_by_token_hash(&hash_token(&token))
            .await?;
    }

    Ok((
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(OkEnvelope { success: true }),
    ))
}
