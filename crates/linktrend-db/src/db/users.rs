//! User repository

use chrono::Utc;
use linktrend_core::models::User;
use linktrend_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        email: &str,
        avatar_url: Option<&str>,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, avatar_url, unlocked_videos, created_at)
            VALUES ($1, $2, $3, $4, '{}', $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(avatar_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find the user for a verified email, creating the record on first login.
    pub async fn get_or_create(
        &self,
        name: &str,
        email: &str,
        avatar_url: Option<&str>,
    ) -> Result<User, AppError> {
        if let Some(user) = self.get_by_email(email).await? {
            return Ok(user);
        }
        match self.create(name, email, avatar_url).await {
            Ok(user) => Ok(user),
            // Lost a first-login race on the email unique index; the row
            // exists now, so read it back.
            Err(AppError::Database(e)) if is_unique_violation(&e) => self
                .get_by_email(email)
                .await?
                .ok_or_else(|| AppError::Internal(format!("User {} vanished after insert race", email))),
            Err(e) => Err(e),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// Delete a user. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
