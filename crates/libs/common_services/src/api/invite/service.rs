use super::interfaces::{CreateInviteRequest, InvitePreview, InviteResponse};
use crate::api::album::access::require_owner;
use crate::api::album::error::AlbumError;
use crate::context::SharingContext;
use crate::database::album::{AlbumCollaborator, AlbumInvite, InviteStatus};
use crate::database::{AlbumStore, CollaboratorStore, DbError, InviteStore};
use crate::notifications::{InviteKind, InviteNotification};
use crate::utils::nice_id;
use chrono::Duration;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Upserts the grant an invite describes, then marks the invite accepted.
///
/// Returns `None` without granting anything when `user_id` owns the album.
/// Safe to repeat: a second run updates the same collaborator row.
pub(crate) async fn grant_from_invite(
    context: &SharingContext,
    invite: &AlbumInvite,
    owner_id: &str,
    user_id: &str,
) -> Result<Option<AlbumCollaborator>, AlbumError> {
    let db = context.db();
    let collaborator = if owner_id == user_id {
        debug!("{} owns album {}, no grant needed", user_id, invite.album_id);
        None
    } else {
        Some(
            CollaboratorStore::upsert(db, invite.album_id, user_id, invite.role, context.now())
                .await?,
        )
    };
    InviteStore::set_status(db, invite.id, InviteStatus::Accepted).await?;
    Ok(collaborator)
}

fn invite_response(context: &SharingContext, invite: AlbumInvite) -> InviteResponse {
    let link = context.settings.album_invite_link(&invite.token);
    InviteResponse::new(invite, link)
}

/// Invites of an album, newest first. Owner only.
#[instrument(skip(context))]
pub async fn list_invites(
    context: &SharingContext,
    user_id: &str,
    album_id: Uuid,
) -> Result<Vec<InviteResponse>, AlbumError> {
    require_owner(context, user_id, album_id).await?;
    let invites = InviteStore::list_by_album(context.db(), album_id).await?;
    Ok(invites
        .into_iter()
        .map(|invite| invite_response(context, invite))
        .collect())
}

/// Creates a pending invite and queues the invitation email.
///
/// The email is sent after the row is stored; a delivery failure never reaches the caller.
#[instrument(skip(context))]
pub async fn create_invite(
    context: &SharingContext,
    user_id: &str,
    album_id: Uuid,
    request: CreateInviteRequest,
) -> Result<InviteResponse, AlbumError> {
    let role = request.role.ensure_grantable()?;
    let email = context.settings.normalize_email(&request.email);
    if email.trim().is_empty() {
        return Err(AlbumError::InvalidArgument("email is empty".to_owned()));
    }
    let album = require_owner(context, user_id, album_id).await?;

    let now = context.now();
    let invite = InviteStore::create(
        context.db(),
        &AlbumInvite {
            id: Uuid::new_v4(),
            album_id,
            invited_email: email,
            role,
            token: nice_id(context.settings.invite_token_length),
            status: InviteStatus::Pending,
            expires_at: now + Duration::days(context.settings.invite_expiry_days),
            created_at: now,
        },
    )
    .await?;
    info!("Created invite {} to album {} as '{}'", invite.id, album_id, role);

    let response = invite_response(context, invite);
    context.notifier.enqueue(InviteNotification {
        kind: InviteKind::Album,
        to: response.invited_email.clone(),
        subject_name: album.name,
        invite_link: response.invite_link.clone(),
        role,
    });
    Ok(response)
}

/// Revokes a pending invite. Revoking twice is allowed; accepted or expired invites are
/// returned unchanged.
#[instrument(skip(context))]
pub async fn revoke_invite(
    context: &SharingContext,
    user_id: &str,
    album_id: Uuid,
    invite_id: Uuid,
) -> Result<InviteResponse, AlbumError> {
    require_owner(context, user_id, album_id).await?;

    let invite = InviteStore::find_in_album(context.db(), invite_id, album_id)
        .await?
        .ok_or_else(|| {
            AlbumError::NotFound(format!("Invite {invite_id} not found in album {album_id}"))
        })?;
    if invite.status != InviteStatus::Pending {
        debug!("Invite {} is already {}", invite_id, invite.status.as_str());
        return Ok(invite_response(context, invite));
    }

    let revoked = InviteStore::set_status(context.db(), invite_id, InviteStatus::Revoked)
        .await?
        .ok_or_else(|| AlbumError::NotFound(format!("Invite {invite_id} not found")))?;
    info!("Revoked invite {} on album {}", invite_id, album_id);
    Ok(invite_response(context, revoked))
}

/// Landing-page view of an invite. A pending invite past its deadline shows as `expired`
/// without touching the stored row.
#[instrument(skip(context, token))]
pub async fn preview_invite(
    context: &SharingContext,
    token: &str,
) -> Result<InvitePreview, AlbumError> {
    let invite = InviteStore::find_by_token(context.db(), token)
        .await?
        .ok_or_else(|| AlbumError::NotFound("Invite not found".to_owned()))?;

    if invite.status == InviteStatus::Pending && invite.is_expired_at(context.now()) {
        return Ok(InvitePreview {
            album_id: invite.album_id,
            album_name: String::new(),
            role: invite.role,
            status: InviteStatus::Expired,
            expires_at: invite.expires_at,
        });
    }

    let album_name = AlbumStore::find_by_id(context.db(), invite.album_id)
        .await?
        .map_or_else(|| "Album".to_owned(), |album| album.name);
    Ok(InvitePreview {
        album_id: invite.album_id,
        album_name,
        role: invite.role,
        status: invite.status,
        expires_at: invite.expires_at,
    })
}

/// Redeems an invite token for the caller. Holding the token is the only proof required.
///
/// Accepting an already accepted invite returns the caller's existing grant. Without one, the
/// grant is restored only while the invite is still within its expiry.
#[instrument(skip(context, token))]
pub async fn accept_invite(
    context: &SharingContext,
    user_id: &str,
    token: &str,
) -> Result<AlbumCollaborator, AlbumError> {
    let db = context.db();
    let invite = InviteStore::find_by_token(db, token)
        .await?
        .ok_or_else(|| AlbumError::NotFound("Invite not found".to_owned()))?;

    match invite.status {
        InviteStatus::Revoked => {
            return Err(AlbumError::Revoked(format!("invite {}", invite.id)));
        }
        InviteStatus::Expired => {
            return Err(AlbumError::Expired(format!("invite {}", invite.id)));
        }
        InviteStatus::Accepted => {
            if let Some(existing) = CollaboratorStore::find(db, invite.album_id, user_id).await? {
                return Ok(existing);
            }
            if invite.is_expired_at(context.now()) {
                return Err(AlbumError::Expired(format!("invite {}", invite.id)));
            }
            debug!("Invite {} is accepted but has no grant for {}, restoring it", invite.id, user_id);
        }
        InviteStatus::Pending => {
            if invite.is_expired_at(context.now()) {
                return Err(AlbumError::Expired(format!("invite {}", invite.id)));
            }
        }
    }

    let album = AlbumStore::find_by_id(db, invite.album_id)
        .await?
        .ok_or_else(|| AlbumError::NotFound(format!("Album {} not found", invite.album_id)))?;
    if album.owner_id == user_id {
        return Err(AlbumError::InvalidArgument(
            "the album owner cannot accept an invite to their own album".to_owned(),
        ));
    }

    let collaborator = grant_from_invite(context, &invite, &album.owner_id, user_id)
        .await?
        .ok_or(DbError::MissingRow("album_collaborator"))?;
    info!("{} accepted invite {} to album {}", user_id, invite.id, album.id);
    Ok(collaborator)
}
