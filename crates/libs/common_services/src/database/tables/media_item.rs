use crate::database::{Record, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded photo or video. Only its identity matters to the sharing engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaItem {
    pub id: Uuid,
    pub owner_id: String,
    pub file_name: String,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}

impl Record for MediaItem {
    const TABLE: Table = Table::MediaItem;
}
