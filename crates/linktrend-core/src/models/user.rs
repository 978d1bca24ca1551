use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A viewer account, created on first successful login for a given email.
///
/// `unlocked_videos` is the set of premium videos this user may play; it only
/// grows, and only as a side effect of an approved payment request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub unlocked_videos: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_unlocked(&self, video_id: Uuid) -> bool {
        self.unlocked_videos.contains(&video_id)
    }
}
