use crate::database::album::AlbumRole;
use crate::database::{Record, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FamilyStatus {
    Pending,
    Accepted,
    Revoked,
}

impl FamilyStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Revoked => "revoked",
        }
    }
}

/// A standing grant over every album of `owner_id`, present and future.
/// `member_id` is set once the invite is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FamilyMember {
    pub id: Uuid,
    pub owner_id: String,
    pub invited_email: String,
    pub member_id: Option<String>,
    pub role: AlbumRole,
    pub status: FamilyStatus,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl Record for FamilyMember {
    const TABLE: Table = Table::FamilyMember;
}
