use crate::api::album::error::AlbumError;
use crate::context::SharingContext;
use crate::database::album::{Album, AlbumRole};
use crate::database::{AlbumStore, CollaboratorStore, FamilyStore};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Minimum role an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Reading the album and its media.
    Read,
    /// Adding or removing album media.
    ModifyContent,
    /// Changing the album itself, its visibility, collaborators or invites.
    Owner,
}

impl AccessPolicy {
    #[must_use]
    pub const fn permits(self, role: AlbumRole) -> bool {
        match self {
            Self::Read => true,
            Self::ModifyContent => matches!(role, AlbumRole::Owner | AlbumRole::Contributor),
            Self::Owner => matches!(role, AlbumRole::Owner),
        }
    }
}

/// Outcome of a role check, for callers that want it as a value rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessCheck {
    Owner,
    Contributor,
    Viewer,
    Denied,
    NotFound,
}

impl From<Option<AlbumRole>> for AccessCheck {
    fn from(role: Option<AlbumRole>) -> Self {
        match role {
            Some(AlbumRole::Owner) => Self::Owner,
            Some(AlbumRole::Contributor) => Self::Contributor,
            Some(AlbumRole::Viewer) => Self::Viewer,
            None => Self::Denied,
        }
    }
}

/// Computes the caller's effective role on an album, first match wins:
/// ownership, then a collaborator row, then an accepted family membership of the album's
/// owner, then public visibility. `None` means denied.
///
/// Nothing is cached; every call re-reads the grants.
#[instrument(skip(context, album), fields(album_id = %album.id))]
pub async fn resolve_role(
    context: &SharingContext,
    caller: Option<&str>,
    album: &Album,
) -> Result<Option<AlbumRole>, AlbumError> {
    let db = context.db();

    if let Some(user_id) = caller {
        if album.owner_id == user_id {
            return Ok(Some(AlbumRole::Owner));
        }
        if let Some(collaborator) = CollaboratorStore::find(db, album.id, user_id).await? {
            return Ok(Some(collaborator.role));
        }
        if let Some(member) = FamilyStore::find_accepted(db, &album.owner_id, user_id).await? {
            return Ok(Some(member.role));
        }
    }

    if album.is_public() {
        return Ok(Some(AlbumRole::Viewer));
    }

    debug!("No grant for {:?}", caller);
    Ok(None)
}

/// Like [`resolve_role`], but starting from an album id and folding a missing album into
/// [`AccessCheck::NotFound`].
pub async fn check_access(
    context: &SharingContext,
    caller: Option<&str>,
    album_id: Uuid,
) -> Result<AccessCheck, AlbumError> {
    let Some(album) = AlbumStore::find_by_id(context.db(), album_id).await? else {
        return Ok(AccessCheck::NotFound);
    };
    Ok(resolve_role(context, caller, &album).await?.into())
}

/// Loads an album and verifies the caller's role satisfies `policy`.
///
/// A missing album is reported as `NotFound` before any access check; an existing album the
/// caller may not use this way is `AccessDenied`.
pub async fn require_access(
    context: &SharingContext,
    caller: Option<&str>,
    album_id: Uuid,
    policy: AccessPolicy,
) -> Result<(Album, AlbumRole), AlbumError> {
    let album = AlbumStore::find_by_id(context.db(), album_id)
        .await?
        .ok_or_else(|| AlbumError::NotFound(format!("Album {album_id} not found")))?;

    match resolve_role(context, caller, &album).await? {
        Some(role) if policy.permits(role) => Ok((album, role)),
        Some(role) => Err(AlbumError::AccessDenied(format!(
            "role '{role}' cannot perform this action on album {album_id}"
        ))),
        None => Err(AlbumError::AccessDenied(format!(
            "no access to album {album_id}"
        ))),
    }
}

/// Shorthand for owner-only operations.
pub async fn require_owner(
    context: &SharingContext,
    user_id: &str,
    album_id: Uuid,
) -> Result<Album, AlbumError> {
    let (album, _) = require_access(context, Some(user_id), album_id, AccessPolicy::Owner).await?;
    Ok(album)
}
