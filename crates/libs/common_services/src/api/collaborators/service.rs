use super::interfaces::CollaboratorResponse;
use crate::api::album::access::require_owner;
use crate::api::album::error::AlbumError;
use crate::context::SharingContext;
use crate::database::CollaboratorStore;
use crate::database::album::AlbumRole;
use tracing::{info, instrument};
use uuid::Uuid;

/// Lists the collaborators of an album with their email, if the directory knows it.
/// Owner only, whatever role the caller holds otherwise.
#[instrument(skip(context))]
pub async fn list_collaborators(
    context: &SharingContext,
    user_id: &str,
    album_id: Uuid,
) -> Result<Vec<CollaboratorResponse>, AlbumError> {
    require_owner(context, user_id, album_id).await?;

    let collaborators = CollaboratorStore::list_by_album(context.db(), album_id).await?;
    let mut responses = Vec::with_capacity(collaborators.len());
    for collaborator in collaborators {
        let email = context.directory.email_of(&collaborator.user_id).await;
        responses.push(CollaboratorResponse::new(collaborator, email));
    }
    Ok(responses)
}

/// Grants a user direct access to an album, or changes the role of an existing grant.
#[instrument(skip(context))]
pub async fn add_collaborator(
    context: &SharingContext,
    user_id: &str,
    album_id: Uuid,
    collaborator_id: &str,
    role: AlbumRole,
) -> Result<CollaboratorResponse, AlbumError> {
    let role = role.ensure_grantable()?;
    let album = require_owner(context, user_id, album_id).await?;
    if album.owner_id == collaborator_id {
        return Err(AlbumError::InvalidArgument(
            "the album owner cannot be added as a collaborator".to_owned(),
        ));
    }

    let collaborator =
        CollaboratorStore::upsert(context.db(), album_id, collaborator_id, role, context.now())
            .await?;
    info!("Granted {} '{}' on album {}", collaborator_id, role, album_id);

    let email = context.directory.email_of(collaborator_id).await;
    Ok(CollaboratorResponse::new(collaborator, email))
}

#[instrument(skip(context))]
pub async fn update_collaborator_role(
    context: &SharingContext,
    user_id: &str,
    album_id: Uuid,
    collaborator_id: &str,
    role: AlbumRole,
) -> Result<CollaboratorResponse, AlbumError> {
    let role = role.ensure_grantable()?;
    require_owner(context, user_id, album_id).await?;

    let collaborator = CollaboratorStore::update_role(context.db(), album_id, collaborator_id, role)
        .await?
        .ok_or_else(|| {
            AlbumError::NotFound(format!(
                "Collaborator {collaborator_id} not found on album {album_id}"
            ))
        })?;
    info!("Changed role of {} on album {} to '{}'", collaborator_id, album_id, role);

    let email = context.directory.email_of(collaborator_id).await;
    Ok(CollaboratorResponse::new(collaborator, email))
}

/// Removes a grant. Removing someone who has no grant is not an error.
#[instrument(skip(context))]
pub async fn remove_collaborator(
    context: &SharingContext,
    user_id: &str,
    album_id: Uuid,
    collaborator_id: &str,
) -> Result<(), AlbumError> {
    require_owner(context, user_id, album_id).await?;

    let removed = CollaboratorStore::remove(context.db(), album_id, collaborator_id).await?;
    if removed > 0 {
        info!("Removed {} from album {}", collaborator_id, album_id);
    }
    Ok(())
}
