use crate::database::album::{AlbumCollaborator, AlbumRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddCollaboratorRequest {
    pub user_id: String,
    pub role: AlbumRole,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollaboratorRequest {
    pub role: AlbumRole,
}

/// A collaborator, annotated with their email when the directory knows it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorResponse {
    pub id: Uuid,
    pub album_id: Uuid,
    pub user_id: String,
    pub role: AlbumRole,
    pub created_at: DateTime<Utc>,
    pub email: Option<String>,
}

impl CollaboratorResponse {
    #[must_use]
    pub fn new(collaborator: AlbumCollaborator, email: Option<String>) -> Self {
        Self {
            id: collaborator.id,
            album_id: collaborator.album_id,
            user_id: collaborator.user_id,
            role: collaborator.role,
            created_at: collaborator.created_at,
            email,
        }
    }
}
