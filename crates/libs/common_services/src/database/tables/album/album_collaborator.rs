use crate::database::album::AlbumRole;
use crate::database::{Record, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A durable per-album grant. Unique on `(album_id, user_id)`; never holds the album owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlbumCollaborator {
    pub id: Uuid,
    pub album_id: Uuid,
    pub user_id: String,
    pub role: AlbumRole,
    pub created_at: DateTime<Utc>,
}

impl Record for AlbumCollaborator {
    const TABLE: Table = Table::AlbumCollaborator;
}
