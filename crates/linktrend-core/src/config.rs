//! Configuration module
//!
//! Environment-driven configuration for the API and services: server,
//! database, CDN storage, admin identity, and upload limits.

use std::env;

// Common constants
const DEFAULT_PORT: u16 = 5000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const SESSION_TTL_HOURS: i64 = 24 * 7;
const DEFAULT_ADMIN_EMAIL: &str = "admin@system.local";
const DEFAULT_GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
const DEFAULT_GOOGLE_CLIENT_ID: &str =
    "149459573476-lc3gjhm1bd3dqu285cpjgd6d0v6602p3.apps.googleusercontent.com";
const DEFAULT_MAX_VIDEO_SIZE_MB: usize = 500;
const DEFAULT_MAX_THUMBNAIL_SIZE_MB: usize = 10;

/// Which storage backend serves uploaded media.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackendKind {
    /// Bunny Storage zone fronted by a CDN hostname.
    Bunny,
    /// Local filesystem (development and tests).
    Local,
}

/// Application configuration, loaded once at startup and passed to dependents.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Storage configuration
    pub storage_backend: StorageBackendKind,
    pub bunny_storage_zone: Option<String>,
    pub bunny_api_key: Option<String>,
    pub bunny_cdn_hostname: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Identity configuration
    pub admin_email: String,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub google_client_id: String,
    pub google_jwks_url: String,
    pub session_ttl_hours: i64,
    // Media configuration
    pub ffprobe_path: String,
    pub max_video_size_bytes: usize,
    pub max_thumbnail_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "bunny".to_string())
            .to_lowercase()
            .as_str()
        {
            "local" => StorageBackendKind::Local,
            _ => StorageBackendKind::Bunny,
        };

        let max_video_size_mb = env::var("MAX_VIDEO_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_VIDEO_SIZE_MB);
        let max_thumbnail_size_mb = env::var("MAX_THUMBNAIL_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_THUMBNAIL_SIZE_MB);

        Ok(Config {
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            environment,
            cors_origins,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            storage_backend,
            bunny_storage_zone: env::var("BUNNY_STORAGE_ZONE").ok(),
            bunny_api_key: env::var("BUNNY_API_KEY").ok(),
            bunny_cdn_hostname: env::var("BUNNY_CDN_HOSTNAME").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string()),
            admin_username: env::var("ADMIN_USERNAME").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .unwrap_or_else(|_| DEFAULT_GOOGLE_CLIENT_ID.to_string()),
            google_jwks_url: env::var("GOOGLE_JWKS_URL")
                .unwrap_or_else(|_| DEFAULT_GOOGLE_JWKS_URL.to_string()),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(SESSION_TTL_HOURS),
            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
            max_video_size_bytes: max_video_size_mb * 1024 * 1024,
            max_thumbnail_size_bytes: max_thumbnail_size_mb * 1024 * 1024,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// The single reserved administrative identity, as a derived predicate
    /// over configuration rather than a literal at call sites.
    pub fn is_admin_email(&self, email: &str) -> bool {
        email == self.admin_email
    }
}
