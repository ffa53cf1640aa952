use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted wall as the views see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub id: i64,
    pub created_by: String,
    pub title: String,
    pub description: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

/// An unsaved wall. Backs the creation form: blank for `GET /walls/new`,
/// carrying the entered values when a rejected submission is redisplayed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WallDraft {
    pub created_by: String,
    pub title: String,
    pub description: String,
    pub likes: i64,
}
