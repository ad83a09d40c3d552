use crate::database::album::{AlbumInvite, AlbumRole, InviteStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequest {
    pub email: String,
    pub role: AlbumRole,
}

/// An invite as shown to the album owner.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InviteResponse {
    pub id: Uuid,
    pub album_id: Uuid,
    pub invited_email: String,
    pub role: AlbumRole,
    pub token: String,
    pub status: InviteStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub invite_link: String,
}

impl InviteResponse {
    #[must_use]
    pub fn new(invite: AlbumInvite, invite_link: String) -> Self {
        Self {
            id: invite.id,
            album_id: invite.album_id,
            invited_email: invite.invited_email,
            role: invite.role,
            token: invite.token,
            status: invite.status,
            expires_at: invite.expires_at,
            created_at: invite.created_at,
            invite_link,
        }
    }
}

/// Public landing-page view of an invite. Never contains the invited email.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InvitePreview {
    pub album_id: Uuid,
    /// Empty when the invite has expired.
    pub album_name: String,
    pub role: AlbumRole,
    pub status: InviteStatus,
    pub expires_at: DateTime<Utc>,
}
