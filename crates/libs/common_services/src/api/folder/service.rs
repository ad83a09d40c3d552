use super::interfaces::CreateFolderRequest;
use crate::api::album::error::AlbumError;
use crate::context::SharingContext;
use crate::database::folder::Folder;
use crate::database::{AlbumStore, FolderStore};
use tracing::{info, instrument};
use uuid::Uuid;

fn folder_not_found(folder_id: Uuid) -> AlbumError {
    AlbumError::NotFound(format!("Folder {folder_id} not found"))
}

#[instrument(skip(context))]
pub async fn create_folder(
    context: &SharingContext,
    user_id: &str,
    request: CreateFolderRequest,
) -> Result<Folder, AlbumError> {
    if request.name.trim().is_empty() {
        return Err(AlbumError::InvalidArgument("folder name is empty".to_owned()));
    }
    if let Some(parent_id) = request.parent_folder_id {
        FolderStore::find_owned(context.db(), parent_id, user_id)
            .await?
            .ok_or_else(|| folder_not_found(parent_id))?;
    }

    let folder = FolderStore::create(
        context.db(),
        &Folder {
            id: Uuid::new_v4(),
            owner_id: user_id.to_owned(),
            name: request.name,
            parent_folder_id: request.parent_folder_id,
            created_at: context.now(),
        },
    )
    .await?;
    info!("Created folder {} for {}", folder.id, user_id);
    Ok(folder)
}

/// Folders directly under `parent_folder_id`, or the top-level ones when `None`, by name.
#[instrument(skip(context))]
pub async fn list_folders(
    context: &SharingContext,
    user_id: &str,
    parent_folder_id: Option<Uuid>,
) -> Result<Vec<Folder>, AlbumError> {
    Ok(FolderStore::list(context.db(), user_id, parent_folder_id).await?)
}

/// Deletes a folder. Its albums and sub-folders move to the top level.
#[instrument(skip(context))]
pub async fn delete_folder(
    context: &SharingContext,
    user_id: &str,
    folder_id: Uuid,
) -> Result<(), AlbumError> {
    let db = context.db();
    FolderStore::find_owned(db, folder_id, user_id)
        .await?
        .ok_or_else(|| folder_not_found(folder_id))?;

    AlbumStore::clear_folder(db, user_id, folder_id).await?;
    FolderStore::detach_children(db, user_id, folder_id).await?;
    FolderStore::delete(db, folder_id).await?;
    info!("Deleted folder {}", folder_id);
    Ok(())
}
