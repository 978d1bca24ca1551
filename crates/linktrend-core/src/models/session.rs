use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A server-side session binding an opaque cookie to a user identity.
///
/// Only the SHA-256 digest of the cookie token is stored; the raw token lives
/// exclusively in the client's cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_email: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_is_expired() {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_email: "a@x.com".to_string(),
            token_hash: "ab".repeat(32),
            created_at: now - Duration::hours(1),
            expires_at: now + Duration::hours(1),
        };
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::hours(2)));
        assert!(session.is_expired(session.expires_at));
    }
}
