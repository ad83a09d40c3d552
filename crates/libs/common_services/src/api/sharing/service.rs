use super::interfaces::ReconcileSummary;
use crate::api::album::error::AlbumError;
use crate::api::album::interfaces::AlbumResponse;
use crate::api::album::service::album_response;
use crate::api::invite::service::grant_from_invite;
use crate::context::SharingContext;
use crate::database::album::InviteStatus;
use crate::database::{AlbumStore, CollaboratorStore, FamilyStore, InviteStore, Order};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Turns the pending invites addressed to the user's email into grants.
///
/// Album invites past their deadline become `expired` instead. When the directory cannot
/// resolve the user's email nothing happens. Running it twice changes nothing the second time.
#[instrument(skip(context))]
pub async fn reconcile(
    context: &SharingContext,
    user_id: &str,
) -> Result<ReconcileSummary, AlbumError> {
    let mut summary = ReconcileSummary::default();
    let Some(email) = context.directory.email_of(user_id).await else {
        debug!("No email known for {}, skipping reconciliation", user_id);
        return Ok(summary);
    };
    let email = context.settings.normalize_email(&email);
    let db = context.db();
    let now = context.now();

    for invite in InviteStore::list_pending_by_email(db, &email).await? {
        if invite.is_expired_at(now) {
            InviteStore::set_status(db, invite.id, InviteStatus::Expired).await?;
            summary.expired_invites += 1;
            continue;
        }
        let Some(album) = AlbumStore::find_by_id(db, invite.album_id).await? else {
            debug!("Invite {} points at a missing album", invite.id);
            continue;
        };
        grant_from_invite(context, &invite, &album.owner_id, user_id).await?;
        summary.accepted_invites += 1;
    }

    for member in FamilyStore::list_pending_by_email(db, &email).await? {
        if member.owner_id == user_id {
            continue;
        }
        FamilyStore::accept(db, member.id, user_id).await?;
        summary.accepted_family += 1;
    }

    if summary != ReconcileSummary::default() {
        info!(
            "Reconciled {}: {} invites accepted, {} expired, {} family memberships",
            user_id, summary.accepted_invites, summary.expired_invites, summary.accepted_family
        );
    }
    Ok(summary)
}

/// Albums other people share with the user: direct grants first, then every album of each
/// family the user belongs to. Each album appears once, with the role of its first grant.
#[instrument(skip(context))]
pub async fn list_shared_albums(
    context: &SharingContext,
    user_id: &str,
) -> Result<Vec<AlbumResponse>, AlbumError> {
    reconcile(context, user_id).await?;
    let db = context.db();

    let mut seen = HashSet::new();
    let mut shared = Vec::new();

    for collaborator in CollaboratorStore::list_by_user(db, user_id).await? {
        let Some(album) = AlbumStore::find_by_id(db, collaborator.album_id).await? else {
            continue;
        };
        if album.owner_id == user_id || !seen.insert(album.id) {
            continue;
        }
        shared.push(album_response(context, album, collaborator.role).await?);
    }

    for member in FamilyStore::list_accepted_for_member(db, user_id).await? {
        let albums =
            AlbumStore::list_by_owner(db, &member.owner_id, None, Order::desc("created_at"))
                .await?;
        for album in albums {
            if seen.insert(album.id) {
                shared.push(album_response(context, album, member.role).await?);
            }
        }
    }

    Ok(shared)
}

/// Marks every pending album invite past its deadline as `expired`. Returns how many changed.
#[instrument(skip(context))]
pub async fn expire_stale_invites(context: &SharingContext) -> Result<usize, AlbumError> {
    let db = context.db();
    let now = context.now();
    let mut expired = 0;
    for invite in InviteStore::list_pending(db).await? {
        if invite.is_expired_at(now) {
            InviteStore::set_status(db, invite.id, InviteStatus::Expired).await?;
            expired += 1;
        }
    }
    info!("Expired {} stale invites", expired);
    Ok(expired)
}
