use super::access::{AccessPolicy, require_access, require_owner};
use super::interfaces::{
    AlbumMediaItemSummary, AlbumResponse, AlbumSortField, CreateAlbumRequest, ListAlbumsParams,
    UpdateAlbumRequest,
};
use crate::api::album::error::AlbumError;
use crate::context::SharingContext;
use crate::database::album::{Album, AlbumRole, Visibility};
use crate::database::{AlbumStore, CollaboratorStore, FolderStore, InviteStore, MediaStore, Order};
use serde_json::{Map, Value, json};
use tracing::{debug, info, instrument};
use uuid::Uuid;

pub(crate) async fn album_response(
    context: &SharingContext,
    album: Album,
    role: AlbumRole,
) -> Result<AlbumResponse, AlbumError> {
    let media_count = AlbumStore::count_media_items(context.db(), album.id).await?;
    Ok(AlbumResponse::new(album, media_count, role))
}

async fn ensure_folder_owned(
    context: &SharingContext,
    user_id: &str,
    folder_id: Uuid,
) -> Result<(), AlbumError> {
    FolderStore::find_owned(context.db(), folder_id, user_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AlbumError::NotFound(format!("Folder {folder_id} not found")))
}

/// Creates a private album owned by `user_id`.
#[instrument(skip(context))]
pub async fn create_album(
    context: &SharingContext,
    user_id: &str,
    request: CreateAlbumRequest,
) -> Result<AlbumResponse, AlbumError> {
    if request.name.trim().is_empty() {
        return Err(AlbumError::InvalidArgument("album name is empty".to_owned()));
    }
    if let Some(folder_id) = request.folder_id {
        ensure_folder_owned(context, user_id, folder_id).await?;
    }

    let now = context.now();
    let album = AlbumStore::create(
        context.db(),
        &Album {
            id: Uuid::new_v4(),
            owner_id: user_id.to_owned(),
            name: request.name,
            description: request.description,
            folder_id: request.folder_id,
            cover_media_id: None,
            visibility: Visibility::Private,
            created_at: now,
            updated_at: now,
        },
    )
    .await?;
    info!("Created album {} for {}", album.id, user_id);

    Ok(AlbumResponse::new(album, 0, AlbumRole::Owner))
}

/// Lists the albums owned by the user.
#[instrument(skip(context))]
pub async fn list_albums(
    context: &SharingContext,
    user_id: &str,
    params: ListAlbumsParams,
) -> Result<Vec<AlbumResponse>, AlbumError> {
    let order = match params.sort_by {
        AlbumSortField::Name => Order::asc("name"),
        AlbumSortField::Date => Order::desc("created_at"),
    };
    let albums = AlbumStore::list_by_owner(context.db(), user_id, params.folder_id, order).await?;

    let mut responses = Vec::with_capacity(albums.len());
    for album in albums {
        responses.push(album_response(context, album, AlbumRole::Owner).await?);
    }
    Ok(responses)
}

/// Fetches an album the caller can see, annotated with the caller's role.
#[instrument(skip(context))]
pub async fn get_album(
    context: &SharingContext,
    caller: Option<&str>,
    album_id: Uuid,
) -> Result<AlbumResponse, AlbumError> {
    let (album, role) = require_access(context, caller, album_id, AccessPolicy::Read).await?;
    album_response(context, album, role).await
}

/// Updates name, description, folder or cover. Owner only.
#[instrument(skip(context))]
pub async fn update_album(
    context: &SharingContext,
    user_id: &str,
    album_id: Uuid,
    request: UpdateAlbumRequest,
) -> Result<AlbumResponse, AlbumError> {
    let album = require_owner(context, user_id, album_id).await?;

    let mut values = Map::new();
    if let Some(name) = request.name {
        if name.trim().is_empty() {
            return Err(AlbumError::InvalidArgument("album name is empty".to_owned()));
        }
        values.insert("name".to_owned(), Value::String(name));
    }
    if let Some(description) = request.description {
        values.insert("description".to_owned(), Value::String(description));
    }
    if let Some(folder_id) = request.folder_id {
        ensure_folder_owned(context, user_id, folder_id).await?;
        values.insert("folder_id".to_owned(), json!(folder_id));
    }
    if let Some(cover_media_id) = request.cover_media_id {
        values.insert("cover_media_id".to_owned(), json!(cover_media_id));
    }
    if values.is_empty() {
        return album_response(context, album, AlbumRole::Owner).await;
    }
    values.insert("updated_at".to_owned(), json!(context.now()));

    let updated = AlbumStore::update(context.db(), album_id, Value::Object(values))
        .await?
        .ok_or_else(|| AlbumError::NotFound(format!("Album {album_id} not found")))?;
    album_response(context, updated, AlbumRole::Owner).await
}

/// Deletes an album with its media links, collaborators and invites. Owner only.
#[instrument(skip(context))]
pub async fn delete_album(
    context: &SharingContext,
    user_id: &str,
    album_id: Uuid,
) -> Result<(), AlbumError> {
    require_owner(context, user_id, album_id).await?;
    let db = context.db();

    AlbumStore::remove_all_media_items(db, album_id).await?;
    CollaboratorStore::remove_all(db, album_id).await?;
    InviteStore::remove_all(db, album_id).await?;
    AlbumStore::delete(db, album_id).await?;
    info!("Deleted album {}", album_id);
    Ok(())
}

/// Switches an album between `public` and `private`. Owner only.
#[instrument(skip(context))]
pub async fn set_album_visibility(
    context: &SharingContext,
    user_id: &str,
    album_id: Uuid,
    visibility: &str,
) -> Result<AlbumResponse, AlbumError> {
    let visibility: Visibility = visibility.parse()?;
    require_owner(context, user_id, album_id).await?;

    let updated = AlbumStore::update(
        context.db(),
        album_id,
        json!({ "visibility": visibility, "updated_at": context.now() }),
    )
    .await?
    .ok_or_else(|| AlbumError::NotFound(format!("Album {album_id} not found")))?;
    info!("Album {} is now {}", album_id, visibility.as_str());

    album_response(context, updated, AlbumRole::Owner).await
}

/// Adds media items to an album. The caller must be the owner or a contributor.
/// Unknown items and items already in the album are skipped; returns how many were added.
#[instrument(skip(context))]
pub async fn add_media_to_album(
    context: &SharingContext,
    user_id: &str,
    album_id: Uuid,
    media_item_ids: &[Uuid],
) -> Result<usize, AlbumError> {
    require_access(context, Some(user_id), album_id, AccessPolicy::ModifyContent).await?;

    let db = context.db();
    let now = context.now();
    let mut added = 0;
    for media_item_id in media_item_ids {
        if MediaStore::find_by_id(db, *media_item_id).await?.is_none() {
            debug!("Skipping unknown media item {}", media_item_id);
            continue;
        }
        if AlbumStore::add_media_item(db, album_id, *media_item_id, user_id, now).await? {
            added += 1;
        }
    }
    Ok(added)
}

/// Removes a media item from an album. The caller must be the owner or a contributor.
#[instrument(skip(context))]
pub async fn remove_media_from_album(
    context: &SharingContext,
    user_id: &str,
    album_id: Uuid,
    media_item_id: Uuid,
) -> Result<(), AlbumError> {
    require_access(context, Some(user_id), album_id, AccessPolicy::ModifyContent).await?;

    let removed = AlbumStore::remove_media_item(context.db(), album_id, media_item_id).await?;
    if removed == 0 {
        return Err(AlbumError::NotFound(format!(
            "Media item {media_item_id} not found in album {album_id}"
        )));
    }
    Ok(())
}

async fn media_summaries(
    context: &SharingContext,
    album_id: Uuid,
) -> Result<Vec<AlbumMediaItemSummary>, AlbumError> {
    let links = AlbumStore::list_media_items(context.db(), album_id).await?;
    let mut summaries = Vec::with_capacity(links.len());
    for link in links {
        if let Some(media_item) = MediaStore::find_by_id(context.db(), link.media_item_id).await? {
            summaries.push(AlbumMediaItemSummary {
                media_item,
                added_at: link.added_at,
            });
        }
    }
    Ok(summaries)
}

/// Media of an album the caller can see, most recently added first.
#[instrument(skip(context))]
pub async fn list_album_media(
    context: &SharingContext,
    caller: Option<&str>,
    album_id: Uuid,
) -> Result<Vec<AlbumMediaItemSummary>, AlbumError> {
    require_access(context, caller, album_id, AccessPolicy::Read).await?;
    media_summaries(context, album_id).await
}

async fn find_public_album(context: &SharingContext, album_id: Uuid) -> Result<Album, AlbumError> {
    AlbumStore::find_by_id(context.db(), album_id)
        .await?
        .filter(Album::is_public)
        .ok_or_else(|| AlbumError::NotFound(format!("Album {album_id} not found")))
}

/// Unauthenticated read of a public album. Private albums are reported as not found.
#[instrument(skip(context))]
pub async fn get_public_album(
    context: &SharingContext,
    album_id: Uuid,
) -> Result<AlbumResponse, AlbumError> {
    let album = find_public_album(context, album_id).await?;
    album_response(context, album, AlbumRole::Viewer).await
}

#[instrument(skip(context))]
pub async fn list_public_album_media(
    context: &SharingContext,
    album_id: Uuid,
) -> Result<Vec<AlbumMediaItemSummary>, AlbumError> {
    find_public_album(context, album_id).await?;
    media_summaries(context, album_id).await
}
