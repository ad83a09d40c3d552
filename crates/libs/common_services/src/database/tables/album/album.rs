use crate::api::album::error::AlbumError;
use crate::database::{Record, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Effective permission level of a user on an album.
///
/// Only `Contributor` and `Viewer` are ever stored on grant rows; `Owner` follows from
/// `Album::owner_id`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlbumRole {
    Owner,
    Contributor,
    Viewer,
}

impl AlbumRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Contributor => "contributor",
            Self::Viewer => "viewer",
        }
    }

    /// Rejects roles that cannot be granted through a collaborator or family row.
    pub fn ensure_grantable(self) -> Result<Self, AlbumError> {
        match self {
            Self::Contributor | Self::Viewer => Ok(self),
            Self::Owner => Err(AlbumError::InvalidArgument(
                "role must be 'viewer' or 'contributor'".to_owned(),
            )),
        }
    }
}

impl Display for AlbumRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlbumRole {
    type Err = AlbumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "contributor" => Ok(Self::Contributor),
            "viewer" => Ok(Self::Viewer),
            other => Err(AlbumError::InvalidArgument(format!(
                "role must be 'viewer' or 'contributor', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

impl Visibility {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

impl FromStr for Visibility {
    type Err = AlbumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Self::Private),
            "public" => Ok(Self::Public),
            other => Err(AlbumError::InvalidArgument(format!(
                "visibility must be 'public' or 'private', got '{other}'"
            ))),
        }
    }
}

/// Represents a single album in the database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Album {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub folder_id: Option<Uuid>,
    pub cover_media_id: Option<Uuid>,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Album {
    const TABLE: Table = Table::Album;
}

impl Album {
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}
