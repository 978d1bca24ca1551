//! Session repository
//!
//! Sessions are keyed by the SHA-256 digest of the opaque cookie token; the
//! raw token is never stored.

use chrono::{DateTime, Utc};
use linktrend_core::models::{Session, User};
use linktrend_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        user_email: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, user_id, user_email, token_hash, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(user_email)
        .bind(token_hash)
        .bind(Utc::now())
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    /// Look up a live (non-expired) session by its token digest.
    pub async fn get_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE token_hash = $1 AND expires_at > now()",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Resolve a token digest to the current user, ignoring expired sessions.
    /// A live session whose user has since been deleted resolves to `None`.
    pub async fn resolve_user(&self, token_hash: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.* FROM users u
            JOIN sessions s ON s.user_id = u.id
            WHERE s.token_hash = $1 AND s.expires_at > now()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Invalidate the session for a token digest. Returns whether one existed.
    pub async fn delete_by_token_hash(&self, token_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Invalidate all sessions belonging to a user (used on user deletion).
    pub async fn delete_by_user(&self, user_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Drop expired sessions. Returns how many were removed.
    pub async fn delete_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
