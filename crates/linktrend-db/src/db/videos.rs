//! Video catalog repository

use chrono::Utc;
use linktrend_core::models::{NewVideo, Video};
use linktrend_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a catalog entry. The premium flag is computed from the price
    /// here, once, and never recomputed afterwards.
    pub async fn create(&self, new: NewVideo) -> Result<Video, AppError> {
        let is_premium = new.is_premium();
        let video = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (
                id, title, description, price, is_premium,
                creator_name, creator_id, thumbnail_url, video_url,
                views, duration, upload_date, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.price)
        .bind(is_premium)
        .bind(&new.creator_name)
        .bind(&new.creator_id)
        .bind(&new.thumbnail_url)
        .bind(&new.video_url)
        .bind(&new.duration)
        .bind(&new.upload_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(video)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    pub async fn list_all(&self) -> Result<Vec<Video>, AppError> {
        let videos = sqlx::query_as::<_, Video>("SELECT * FROM videos ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(videos)
    }

    pub async fn list_by_creator(&self, creator_id: &str) -> Result<Vec<Video>, AppError> {
        let videos = sqlx::query_as::<_, Video>(
            "SELECT * FROM videos WHERE creator_id = $1 ORDER BY created_at DESC",
        )
        .bind(creator_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    /// Atomically bump the view counter, returning the updated record.
    pub async fn increment_views(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<_, Video>(
            "UPDATE videos SET views = views + 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    /// Delete a catalog entry. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
