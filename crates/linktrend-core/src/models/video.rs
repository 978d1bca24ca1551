use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A catalog entry. The media itself lives in external storage; this record
/// only carries the public URLs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Currency-agnostic integer units.
    pub price: i64,
    /// Fixed from `price > 0` at creation time; never recomputed.
    pub is_premium: bool,
    pub creator_name: String,
    /// User id or email of the uploader.
    pub creator_id: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub views: i64,
    /// Playback duration as `MM:SS`.
    pub duration: String,
    /// Human-readable upload date label.
    pub upload_date: String,
    pub created_at: DateTime<Utc>,
}

/// Metadata for a new catalog entry. `is_premium` is not accepted from the
/// caller; it is derived from `price` exactly once.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub price: i64,
    pub creator_name: String,
    pub creator_id: String,
    pub thumbnail_url: String,
    pub video_url: String,
    #[serde(default = "default_duration")]
    pub duration: String,
    pub upload_date: String,
}

fn default_duration() -> String {
    "00:00".to_string()
}

impl NewVideo {
    pub fn is_premium(&self) -> bool {
        self.price > 0
    }
}
