//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use linktrend_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Linktrend API",
        version = "0.1.0",
        description = "Video-on-demand API with a manually reviewed mobile-payment unlock flow. Premium videos are unlocked per user after an administrator approves the submitted payment reference."
    ),
    paths(
        // Auth
        handlers::auth::login,
        handlers::auth::verify,
        handlers::auth::logout,
        // Uploads
        handlers::uploads::upload_video,
        handlers::uploads::upload_thumbnail,
        // Videos
        handlers::videos::create_video,
        handlers::videos::list_videos,
        handlers::videos::get_video,
        handlers::videos::list_videos_by_creator,
        handlers::videos::increment_views,
        handlers::videos::delete_video,
        // Transactions
        handlers::transactions::create_transaction,
        handlers::transactions::list_transactions,
        handlers::transactions::list_pending_transactions,
        handlers::transactions::approve_transaction,
        handlers::transactions::reject_transaction,
        // Users
        handlers::users::list_users,
        handlers::users::delete_user,
    ),
    components(schemas(
        models::User,
        models::Video,
        models::NewVideo,
        models::Transaction,
        models::NewTransaction,
        models::PaymentMethod,
        models::TransactionStatus,
        handlers::auth::LoginRequest,
        handlers::auth::UserEnvelope,
        handlers::auth::OkEnvelope,
        handlers::uploads::UploadEnvelope,
        handlers::videos::VideoEnvelope,
        handlers::videos::VideosEnvelope,
        handlers::transactions::TransactionEnvelope,
        handlers::transactions::TransactionsEnvelope,
        handlers::users::UsersEnvelope,
        error::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Sessions and identity"),
        (name = "uploads", description = "Media ingestion"),
        (name = "videos", description = "Video catalog"),
        (name = "transactions", description = "Payment-request workflow"),
        (name = "users", description = "User administration")
    )
)]
pub struct ApiDoc;

/// The served OpenAPI spec.
pub fn openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
