use crate::database::album::AlbumRole;
use crate::database::{Record, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Expired,
    Revoked,
}

impl InviteStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
        }
    }
}

/// A single-album, single-email invitation, redeemable by whoever holds the token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlbumInvite {
    pub id: Uuid,
    pub album_id: Uuid,
    pub invited_email: String,
    pub role: AlbumRole,
    pub token: String,
    pub status: InviteStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Record for AlbumInvite {
    const TABLE: Table = Table::AlbumInvite;
}

impl AlbumInvite {
    /// The deadline is inclusive: an invite is still valid at exactly `expires_at`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
