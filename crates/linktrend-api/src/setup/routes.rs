//! Route configuration and setup

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Json, Router,
};
use linktrend_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Public routes (no authentication required)
    let public_routes = public_routes(state.clone());

    // Admin routes (require the configured administrative identity)
    let admin_routes = admin_routes(state.clone());

    // Uploads can be large; both the axum extractor limit and the transport
    // limit must clear the configured video size.
    let body_limit = config
        .max_video_size_bytes
        .max(config.max_thumbnail_size_bytes)
        + 1024 * 1024;

    // Server-level concurrency limit to protect against resource exhaustion
    // under extreme load.
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1024)
        .max(1);

    let rapidoc: Router = utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
        .path("/docs")
        .into();

    let app = public_routes
        .merge(admin_routes)
        .merge(rapidoc)
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// Public routes (no authentication required)
fn public_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            &format!("{}/auth/login", API_PREFIX),
            post(handlers::auth::login),
        )
        .route(
            &format!("{}/auth/verify", API_PREFIX),
            get(handlers::auth::verify),
        )
        .route(
            &format!("{}/auth/logout", API_PREFIX),
            post(handlers::auth::logout),
        )
        .route(
            &format!("{}/upload/video", API_PREFIX),
            post(handlers::uploads::upload_video),
        )
        .route(
            &format!("{}/upload/thumbnail", API_PREFIX),
            post(handlers::uploads::upload_thumbnail),
        )
        .route(
            &format!("{}/videos", API_PREFIX),
            post(handlers::videos::create_video),
        )
        .route(
            &format!("{}/videos", API_PREFIX),
            get(handlers::videos::list_videos),
        )
        .route(
            &format!("{}/videos/creator/{{creator_id}}", API_PREFIX),
            get(handlers::videos::list_videos_by_creator),
        )
        .route(
            &format!("{}/videos/{{id}}", API_PREFIX),
            get(handlers::videos::get_video),
        )
        .route(
            &format!("{}/videos/{{id}}/view", API_PREFIX),
            post(handlers::videos::increment_views),
        )
        .route(
            &format!("{}/transactions", API_PREFIX),
            post(handlers::transactions::create_transaction),
        )
        .route("/health", get(health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::openapi_spec()) }),
        )
        .with_state(state)
}

/// Routes behind the admin gate.
fn admin_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            &format!("{}/videos/{{id}}", API_PREFIX),
            delete(handlers::videos::delete_video),
        )
        .route(
            &format!("{}/transactions", API_PREFIX),
            get(handlers::transactions::list_transactions),
        )
        .route(
            &format!("{}/transactions/pending", API_PREFIX),
            get(handlers::transactions::list_pending_transactions),
        )
        .route(
            &format!("{}/transactions/{{id}}/approve", API_PREFIX),
            post(handlers::transactions::approve_transaction),
        )
        .route(
            &format!("{}/transactions/{{id}}/reject", API_PREFIX),
            post(handlers::transactions::reject_transaction),
        )
        .route(
            &format!("{}/users", API_PREFIX),
            get(handlers::users::list_users),
        )
        .route(
            &format!("{}/users/{{id}}", API_PREFIX),
            delete(handlers::users::delete_user),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::require_admin,
        ))
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();

        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
            .allow_credentials(true)
    };
    Ok(cors)
}
