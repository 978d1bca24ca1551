//! Admin gate middleware.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use linktrend_core::models::User;
use linktrend_core::AppError;
use std::sync::Arc;

use crate::auth::session::{hash_token, token_from_headers};
use crate::error::HttpAppError;
use crate::state::AppState;

/// Resolve the request's session cookie to its user, if any.
///
/// `Ok(None)` means "no authenticated identity" (no cookie, or an unknown or
/// expired session). A live session whose user record has been deleted also
/// resolves to `None` here; callers that must distinguish that case use
/// [`resolve_admin`].
pub async fn current_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<User>, AppError> {
    let Some(token) = token_from_headers(headers) else {
        return Ok(None);
    };
    state.sessions.resolve_user(&hash_token(&token)).await
}

/// Resolve the request to the administrative user, or fail the way the gate
/// specifies: 401 without a session, 404 when the session's user is gone,
/// 403 when the user is not the configured admin identity.
async fn resolve_admin(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let Some(token) = token_from_headers(headers) else {
        return Err(AppError::Unauthorized(
            "Authentication required".to_string(),
        ));
    };

    let Some(session) = state.sessions.get_by_token_hash(&hash_token(&token)).await? else {
        return Err(AppError::Unauthorized(
            "Authentication required".to_string(),
        ));
    };

    // Re-fetch the user so a deleted or demoted account cannot ride an old
    // session.
    let Some(user) = state.users.get_by_id(session.user_id).await? else {
        return Err(AppError::NotFound("User not found".to_string()));
    };

    if !state.config.is_admin_email(&user.email) {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(user)
}

/// Middleware protecting administrative routes.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    match resolve_admin(&state, request.headers()).await {
        Ok(_) => next.run(request).await,
        Err(e) => HttpAppError(e).into_response(),
    }
}
