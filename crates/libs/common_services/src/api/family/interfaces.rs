use crate::database::album::AlbumRole;
use crate::database::family_member::{FamilyMember, FamilyStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FamilyInviteRequest {
    pub email: String,
    pub role: AlbumRole,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberUpdateRequest {
    pub role: AlbumRole,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberResponse {
    pub id: Uuid,
    pub owner_id: String,
    pub invited_email: String,
    pub member_id: Option<String>,
    pub role: AlbumRole,
    pub status: FamilyStatus,
    pub created_at: DateTime<Utc>,
    /// Email of the accepted member, if resolvable.
    pub email: Option<String>,
    pub invite_link: String,
}

impl FamilyMemberResponse {
    #[must_use]
    pub fn new(member: FamilyMember, email: Option<String>, invite_link: String) -> Self {
        Self {
            id: member.id,
            owner_id: member.owner_id,
            invited_email: member.invited_email,
            member_id: member.member_id,
            role: member.role,
            status: member.status,
            created_at: member.created_at,
            email,
            invite_link,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyInvitePreview {
    pub owner_name: String,
    pub role: AlbumRole,
    pub status: FamilyStatus,
}
