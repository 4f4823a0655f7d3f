use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// A login session. Only the sha-256 digest of the bearer token is stored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: String, token_hash: String, ttl_hours: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            token_hash,
            expires_at: now + Duration::hours(i64::from(ttl_hours)),
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
