use crate::database::album::{Album, AlbumRole, Visibility};
use crate::database::media_item::MediaItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Request Payloads ---

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    pub name: String,
    pub description: Option<String>,
    pub folder_id: Option<Uuid>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlbumRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub folder_id: Option<Uuid>,
    pub cover_media_id: Option<Uuid>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddMediaToAlbumRequest {
    pub media_item_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListAlbumsParams {
    pub folder_id: Option<Uuid>,
    #[serde(default)]
    pub sort_by: AlbumSortField,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum AlbumSortField {
    Name,
    #[default]
    Date,
}

// --- Response Payloads ---

/// An album as seen by one caller.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResponse {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub folder_id: Option<Uuid>,
    pub cover_media_id: Option<Uuid>,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub media_count: usize,
    pub my_role: AlbumRole,
}

impl AlbumResponse {
    #[must_use]
    pub fn new(album: Album, media_count: usize, my_role: AlbumRole) -> Self {
        Self {
            id: album.id,
            owner_id: album.owner_id,
            name: album.name,
            description: album.description,
            folder_id: album.folder_id,
            cover_media_id: album.cover_media_id,
            visibility: album.visibility,
            created_at: album.created_at,
            updated_at: album.updated_at,
            media_count,
            my_role,
        }
    }
}

/// A media item within an album.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumMediaItemSummary {
    pub media_item: MediaItem,
    pub added_at: DateTime<Utc>,
}
