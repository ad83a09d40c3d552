mod common;

use chrono::Duration;
use color_eyre::Result;
use common::*;
use common_services::api::album::error::AlbumError;
use common_services::api::album::interfaces::{
    AlbumResponse, AlbumSortField, CreateAlbumRequest, ListAlbumsParams, UpdateAlbumRequest,
};
use common_services::api::album::service::{
    add_media_to_album, create_album, delete_album, get_album, get_public_album, list_album_media,
    list_albums, list_public_album_media, remove_media_from_album, set_album_visibility,
    update_album,
};
use common_services::api::collaborators::service::add_collaborator;
use common_services::api::folder::interfaces::CreateFolderRequest;
use common_services::api::folder::service::{create_folder, delete_folder, list_folders};
use common_services::api::invite::interfaces::CreateInviteRequest;
use common_services::api::invite::service::{accept_invite, create_invite};
use common_services::database::album::{AlbumRole, Visibility};
use common_services::database::{CollaboratorStore, InviteStore};
use uuid::Uuid;

fn names(albums: &[AlbumResponse]) -> Vec<&str> {
    albums.iter().map(|a| a.name.as_str()).collect()
}

#[tokio::test]
async fn test_create_and_list_albums() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    ctx.album(OWNER, "Zoo").await?;
    ctx.clock.advance(Duration::minutes(1));
    ctx.album(OWNER, "Alps").await?;
    ctx.album(ALICE, "Not mine").await?;

    // ACT
    let by_date = list_albums(&ctx.sharing, OWNER, ListAlbumsParams::default()).await?;
    let by_name = list_albums(
        &ctx.sharing,
        OWNER,
        ListAlbumsParams {
            sort_by: AlbumSortField::Name,
            ..Default::default()
        },
    )
    .await?;
    let blank = create_album(&ctx.sharing, OWNER, CreateAlbumRequest::default()).await;

    // ASSERT
    assert_eq!(names(&by_date), vec!["Alps", "Zoo"]);
    assert_eq!(names(&by_name), vec!["Alps", "Zoo"]);
    assert!(by_date.iter().all(|a| a.my_role == AlbumRole::Owner));
    assert!(by_date.iter().all(|a| a.visibility == Visibility::Private));
    assert!(matches!(blank, Err(AlbumError::InvalidArgument(_))));
    Ok(())
}

#[tokio::test]
async fn test_update_album_fields() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let album_id = ctx.album(OWNER, "Trip").await?;
    let cover = ctx.media(OWNER, "cover.jpg").await?;
    ctx.clock.advance(Duration::hours(1));

    // ACT
    let updated = update_album(
        &ctx.sharing,
        OWNER,
        album_id,
        UpdateAlbumRequest {
            name: Some("Road trip".to_owned()),
            description: Some("Summer 2025".to_owned()),
            cover_media_id: Some(cover),
            ..Default::default()
        },
    )
    .await?;
    let foreign_folder = create_folder(
        &ctx.sharing,
        ALICE,
        CreateFolderRequest {
            name: "Alice's".to_owned(),
            parent_folder_id: None,
        },
    )
    .await?;
    let into_foreign = update_album(
        &ctx.sharing,
        OWNER,
        album_id,
        UpdateAlbumRequest {
            folder_id: Some(foreign_folder.id),
            ..Default::default()
        },
    )
    .await;

    // ASSERT
    assert_eq!(updated.name, "Road trip");
    assert_eq!(updated.description.as_deref(), Some("Summer 2025"));
    assert_eq!(updated.cover_media_id, Some(cover));
    assert_eq!(updated.updated_at, start_time() + Duration::hours(1));
    assert!(matches!(into_foreign, Err(AlbumError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_visibility_values_are_validated() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let album_id = ctx.album(OWNER, "Trip").await?;

    // ACT
    let invalid = set_album_visibility(&ctx.sharing, OWNER, album_id, "friends").await;
    let public = set_album_visibility(&ctx.sharing, OWNER, album_id, "public").await?;
    let missing = set_album_visibility(&ctx.sharing, OWNER, Uuid::new_v4(), "public").await;

    // ASSERT
    assert!(matches!(invalid, Err(AlbumError::InvalidArgument(_))));
    assert_eq!(public.visibility, Visibility::Public);
    assert!(matches!(missing, Err(AlbumError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_media_membership() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let album_id = ctx.album(OWNER, "Trip").await?;
    let first = ctx.media(OWNER, "1.jpg").await?;
    let second = ctx.media(OWNER, "2.jpg").await?;

    // ACT
    let added = add_media_to_album(&ctx.sharing, OWNER, album_id, &[first]).await?;
    ctx.clock.advance(Duration::seconds(5));
    let added_again =
        add_media_to_album(&ctx.sharing, OWNER, album_id, &[first, second, Uuid::new_v4()]).await?;
    let listed = list_album_media(&ctx.sharing, Some(OWNER), album_id).await?;
    remove_media_from_album(&ctx.sharing, OWNER, album_id, first).await?;
    let removed_twice = remove_media_from_album(&ctx.sharing, OWNER, album_id, first).await;
    let album = get_album(&ctx.sharing, Some(OWNER), album_id).await?;

    // ASSERT
    assert_eq!(added, 1);
    assert_eq!(added_again, 1);
    let ids: Vec<Uuid> = listed.iter().map(|m| m.media_item.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert!(matches!(removed_twice, Err(AlbumError::NotFound(_))));
    assert_eq!(album.media_count, 1);
    Ok(())
}

#[tokio::test]
async fn test_public_endpoints_hide_private_albums() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let album_id = ctx.album(OWNER, "Trip").await?;
    let media_id = ctx.media(OWNER, "1.jpg").await?;
    add_media_to_album(&ctx.sharing, OWNER, album_id, &[media_id]).await?;

    // ACT
    let private = get_public_album(&ctx.sharing, album_id).await;
    let private_media = list_public_album_media(&ctx.sharing, album_id).await;
    let missing = get_public_album(&ctx.sharing, Uuid::new_v4()).await;
    set_album_visibility(&ctx.sharing, OWNER, album_id, "public").await?;
    let public = get_public_album(&ctx.sharing, album_id).await?;
    let public_media = list_public_album_media(&ctx.sharing, album_id).await?;

    // ASSERT
    assert!(matches!(private, Err(AlbumError::NotFound(_))));
    assert!(matches!(private_media, Err(AlbumError::NotFound(_))));
    assert!(matches!(missing, Err(AlbumError::NotFound(_))));
    assert_eq!(public.media_count, 1);
    assert_eq!(public.my_role, AlbumRole::Viewer);
    assert_eq!(public_media.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_delete_album_removes_its_grants_and_invites() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let album_id = ctx.album(OWNER, "Trip").await?;
    add_collaborator(&ctx.sharing, OWNER, album_id, ALICE, AlbumRole::Viewer).await?;
    let invite = create_invite(
        &ctx.sharing,
        OWNER,
        album_id,
        CreateInviteRequest {
            email: BOB_EMAIL.to_owned(),
            role: AlbumRole::Viewer,
        },
    )
    .await?;

    // ACT
    let by_collaborator = delete_album(&ctx.sharing, ALICE, album_id).await;
    delete_album(&ctx.sharing, OWNER, album_id).await?;
    let read = get_album(&ctx.sharing, Some(OWNER), album_id).await;
    let accept = accept_invite(&ctx.sharing, BOB, &invite.token).await;

    // ASSERT
    assert!(matches!(by_collaborator, Err(AlbumError::AccessDenied(_))));
    assert!(matches!(read, Err(AlbumError::NotFound(_))));
    assert!(matches!(accept, Err(AlbumError::NotFound(_))));
    let db = ctx.sharing.db();
    assert!(CollaboratorStore::list_by_album(db, album_id).await?.is_empty());
    assert!(InviteStore::list_by_album(db, album_id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_folders() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let folder = |name: &str, parent: Option<Uuid>| CreateFolderRequest {
        name: name.to_owned(),
        parent_folder_id: parent,
    };
    let trips = create_folder(&ctx.sharing, OWNER, folder("Trips", None)).await?;
    let family = create_folder(&ctx.sharing, OWNER, folder("Family", None)).await?;
    let italy = create_folder(&ctx.sharing, OWNER, folder("Italy", Some(trips.id))).await?;
    let album = create_album(
        &ctx.sharing,
        OWNER,
        CreateAlbumRequest {
            name: "Rome".to_owned(),
            folder_id: Some(trips.id),
            ..Default::default()
        },
    )
    .await?;

    // ACT
    let roots = list_folders(&ctx.sharing, OWNER, None).await?;
    let children = list_folders(&ctx.sharing, OWNER, Some(trips.id)).await?;
    let in_folder = list_albums(
        &ctx.sharing,
        OWNER,
        ListAlbumsParams {
            folder_id: Some(trips.id),
            ..Default::default()
        },
    )
    .await?;
    let foreign_parent = create_folder(&ctx.sharing, ALICE, folder("x", Some(trips.id))).await;
    let foreign_delete = delete_folder(&ctx.sharing, ALICE, trips.id).await;
    delete_folder(&ctx.sharing, OWNER, trips.id).await?;
    let roots_after = list_folders(&ctx.sharing, OWNER, None).await?;
    let moved = get_album(&ctx.sharing, Some(OWNER), album.id).await?;

    // ASSERT
    let names: Vec<&str> = roots.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Family", "Trips"]);
    assert_eq!(children, vec![italy.clone()]);
    assert_eq!(in_folder.len(), 1);
    assert!(matches!(foreign_parent, Err(AlbumError::NotFound(_))));
    assert!(matches!(foreign_delete, Err(AlbumError::NotFound(_))));
    let ids: Vec<Uuid> = roots_after.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![family.id, italy.id]);
    assert_eq!(moved.folder_id, None);
    Ok(())
}
