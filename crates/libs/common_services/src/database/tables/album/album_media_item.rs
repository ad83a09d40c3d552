use crate::database::{Record, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the link between a media item and an album.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlbumMediaItem {
    pub album_id: Uuid,
    pub media_item_id: Uuid,
    pub added_by_user: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl Record for AlbumMediaItem {
    const TABLE: Table = Table::AlbumMediaItem;
}
