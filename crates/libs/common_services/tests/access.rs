mod common;

use color_eyre::Result;
use common::*;
use common_services::api::album::access::{AccessCheck, check_access};
use common_services::api::album::error::AlbumError;
use common_services::api::album::service::{
    add_media_to_album, get_album, list_album_media, remove_media_from_album,
    set_album_visibility, update_album,
};
use common_services::api::album::interfaces::UpdateAlbumRequest;
use common_services::api::collaborators::service::{
    add_collaborator, list_collaborators, remove_collaborator, update_collaborator_role,
};
use common_services::api::family::service::remove_family_member;
use common_services::database::album::AlbumRole;
use uuid::Uuid;

#[tokio::test]
async fn test_owner_dominates_other_grants() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let album_id = ctx.album(OWNER, "Trip").await?;

    // ACT
    let access = check_access(&ctx.sharing, Some(OWNER), album_id).await?;
    let album = get_album(&ctx.sharing, Some(OWNER), album_id).await?;

    // ASSERT
    assert_eq!(access, AccessCheck::Owner);
    assert_eq!(album.my_role, AlbumRole::Owner);
    Ok(())
}

#[tokio::test]
async fn test_collaborator_row_beats_family_grant() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let album_id = ctx.album(OWNER, "Trip").await?;
    join_family(&ctx, OWNER, ALICE, ALICE_EMAIL, AlbumRole::Contributor).await?;
    add_collaborator(&ctx.sharing, OWNER, album_id, ALICE, AlbumRole::Viewer).await?;

    // ACT
    let access = check_access(&ctx.sharing, Some(ALICE), album_id).await?;

    // ASSERT
    assert_eq!(access, AccessCheck::Viewer);
    Ok(())
}

#[tokio::test]
async fn test_family_grant_covers_future_albums_until_removed() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let member_id = join_family(&ctx, OWNER, ALICE, ALICE_EMAIL, AlbumRole::Contributor).await?;

    // ACT
    let later_album = ctx.album(OWNER, "Created after joining").await?;
    let before_removal = check_access(&ctx.sharing, Some(ALICE), later_album).await?;
    remove_family_member(&ctx.sharing, OWNER, member_id).await?;
    let after_removal = check_access(&ctx.sharing, Some(ALICE), later_album).await?;

    // ASSERT
    assert_eq!(before_removal, AccessCheck::Contributor);
    assert_eq!(after_removal, AccessCheck::Denied);
    Ok(())
}

#[tokio::test]
async fn test_missing_album_is_not_found_and_private_album_is_denied() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let album_id = ctx.album(OWNER, "Private").await?;

    // ACT
    let missing = check_access(&ctx.sharing, Some(STRANGER), Uuid::new_v4()).await?;
    let private = check_access(&ctx.sharing, Some(STRANGER), album_id).await?;
    let anonymous = check_access(&ctx.sharing, None, album_id).await?;
    let read = get_album(&ctx.sharing, Some(STRANGER), album_id).await;
    let read_missing = get_album(&ctx.sharing, Some(STRANGER), Uuid::new_v4()).await;

    // ASSERT
    assert_eq!(missing, AccessCheck::NotFound);
    assert_eq!(private, AccessCheck::Denied);
    assert_eq!(anonymous, AccessCheck::Denied);
    assert!(matches!(read, Err(AlbumError::AccessDenied(_))));
    assert!(matches!(read_missing, Err(AlbumError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_viewer_cannot_add_media_but_contributor_can() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let album_id = ctx.album(OWNER, "Trip").await?;
    let media_id = ctx.media(BOB, "beach.jpg").await?;
    add_collaborator(&ctx.sharing, OWNER, album_id, ALICE, AlbumRole::Viewer).await?;
    add_collaborator(&ctx.sharing, OWNER, album_id, BOB, AlbumRole::Contributor).await?;

    // ACT
    let as_viewer = add_media_to_album(&ctx.sharing, ALICE, album_id, &[media_id]).await;
    let as_contributor = add_media_to_album(&ctx.sharing, BOB, album_id, &[media_id]).await?;
    let viewer_remove = remove_media_from_album(&ctx.sharing, ALICE, album_id, media_id).await;

    // ASSERT
    assert!(matches!(as_viewer, Err(AlbumError::AccessDenied(_))));
    assert_eq!(as_contributor, 1);
    assert!(matches!(viewer_remove, Err(AlbumError::AccessDenied(_))));
    let media = list_album_media(&ctx.sharing, Some(ALICE), album_id).await?;
    assert_eq!(media.len(), 1);
    assert_eq!(media[0].media_item.id, media_id);
    Ok(())
}

#[tokio::test]
async fn test_contributor_cannot_manage_the_album() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let album_id = ctx.album(OWNER, "Trip").await?;
    add_collaborator(&ctx.sharing, OWNER, album_id, BOB, AlbumRole::Contributor).await?;

    // ACT
    let rename = update_album(
        &ctx.sharing,
        BOB,
        album_id,
        UpdateAlbumRequest {
            name: Some("Mine now".to_owned()),
            ..Default::default()
        },
    )
    .await;
    let publish = set_album_visibility(&ctx.sharing, BOB, album_id, "public").await;
    let listing = list_collaborators(&ctx.sharing, BOB, album_id).await;
    let grant = add_collaborator(&ctx.sharing, BOB, album_id, ALICE, AlbumRole::Viewer).await;

    // ASSERT
    assert!(matches!(rename, Err(AlbumError::AccessDenied(_))));
    assert!(matches!(publish, Err(AlbumError::AccessDenied(_))));
    assert!(matches!(listing, Err(AlbumError::AccessDenied(_))));
    assert!(matches!(grant, Err(AlbumError::AccessDenied(_))));
    Ok(())
}

#[tokio::test]
async fn test_public_album_is_readable_but_not_writable() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let album_id = ctx.album(OWNER, "Trip").await?;
    let media_id = ctx.media(OWNER, "sunset.jpg").await?;
    add_media_to_album(&ctx.sharing, OWNER, album_id, &[media_id]).await?;
    set_album_visibility(&ctx.sharing, OWNER, album_id, "public").await?;

    // ACT
    let anonymous = check_access(&ctx.sharing, None, album_id).await?;
    let album = get_album(&ctx.sharing, None, album_id).await?;
    let media = list_album_media(&ctx.sharing, None, album_id).await?;
    let write = add_media_to_album(&ctx.sharing, STRANGER, album_id, &[media_id]).await;

    // ASSERT
    assert_eq!(anonymous, AccessCheck::Viewer);
    assert_eq!(album.my_role, AlbumRole::Viewer);
    assert_eq!(album.media_count, 1);
    assert_eq!(media.len(), 1);
    assert!(matches!(write, Err(AlbumError::AccessDenied(_))));
    Ok(())
}

#[tokio::test]
async fn test_collaborator_registry_lifecycle() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let album_id = ctx.album(OWNER, "Trip").await?;

    // ACT
    add_collaborator(&ctx.sharing, OWNER, album_id, ALICE, AlbumRole::Viewer).await?;
    let repeated = add_collaborator(&ctx.sharing, OWNER, album_id, ALICE, AlbumRole::Viewer).await?;
    let promoted =
        update_collaborator_role(&ctx.sharing, OWNER, album_id, ALICE, AlbumRole::Contributor)
            .await?;
    let listed = list_collaborators(&ctx.sharing, OWNER, album_id).await?;
    remove_collaborator(&ctx.sharing, OWNER, album_id, ALICE).await?;
    remove_collaborator(&ctx.sharing, OWNER, album_id, ALICE).await?;
    let after = list_collaborators(&ctx.sharing, OWNER, album_id).await?;

    // ASSERT
    assert_eq!(promoted.id, repeated.id);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].role, AlbumRole::Contributor);
    assert_eq!(listed[0].email.as_deref(), Some(ALICE_EMAIL));
    assert!(after.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_registry_rejects_owner_role_and_owner_as_collaborator() -> Result<()> {
    // ARRANGE
    let ctx = TestContext::new();
    let album_id = ctx.album(OWNER, "Trip").await?;

    // ACT
    let owner_role = add_collaborator(&ctx.sharing, OWNER, album_id, ALICE, AlbumRole::Owner).await;
    let owner_row = add_collaborator(&ctx.sharing, OWNER, album_id, OWNER, AlbumRole::Viewer).await;
    let missing =
        update_collaborator_role(&ctx.sharing, OWNER, album_id, BOB, AlbumRole::Viewer).await;

    // ASSERT
    assert!(matches!(owner_role, Err(AlbumError::InvalidArgument(_))));
    assert!(matches!(owner_row, Err(AlbumError::InvalidArgument(_))));
    assert!(matches!(missing, Err(AlbumError::NotFound(_))));
    Ok(())
}
