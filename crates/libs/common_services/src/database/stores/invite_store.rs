use crate::database::album::{AlbumInvite, InviteStatus};
use crate::database::{
    DbError, Filters, Order, RecordStore, delete_records, insert_record, select_record,
    select_records, update_record,
};
use serde_json::json;
use uuid::Uuid;

pub struct InviteStore;

impl InviteStore {
    pub async fn create(
        store: &dyn RecordStore,
        invite: &AlbumInvite,
    ) -> Result<AlbumInvite, DbError> {
        insert_record(store, invite).await
    }

    pub async fn find_by_token(
        store: &dyn RecordStore,
        token: &str,
    ) -> Result<Option<AlbumInvite>, DbError> {
        select_record(store, Filters::new().eq("token", token)).await
    }

    pub async fn find_in_album(
        store: &dyn RecordStore,
        invite_id: Uuid,
        album_id: Uuid,
    ) -> Result<Option<AlbumInvite>, DbError> {
        select_record(
            store,
            Filters::new()
                .eq("id", invite_id.to_string())
                .eq("album_id", album_id.to_string()),
        )
        .await
    }

    /// Invites of an album, newest first.
    pub async fn list_by_album(
        store: &dyn RecordStore,
        album_id: Uuid,
    ) -> Result<Vec<AlbumInvite>, DbError> {
        select_records(
            store,
            Filters::new().eq("album_id", album_id.to_string()),
            Some(Order::desc("created_at")),
        )
        .await
    }

    pub async fn list_pending_by_email(
        store: &dyn RecordStore,
        email: &str,
    ) -> Result<Vec<AlbumInvite>, DbError> {
        select_records(
            store,
            Filters::new()
                .eq("invited_email", email)
                .eq("status", InviteStatus::Pending.as_str()),
            Some(Order::asc("created_at")),
        )
        .await
    }

    pub async fn list_pending(store: &dyn RecordStore) -> Result<Vec<AlbumInvite>, DbError> {
        select_records(
            store,
            Filters::new().eq("status", InviteStatus::Pending.as_str()),
            None,
        )
        .await
    }

    pub async fn set_status(
        store: &dyn RecordStore,
        invite_id: Uuid,
        status: InviteStatus,
    ) -> Result<Option<AlbumInvite>, DbError> {
        update_record(
            store,
            json!({ "status": status }),
            Filters::new().eq("id", invite_id.to_string()),
        )
        .await
    }

    pub async fn remove_all(store: &dyn RecordStore, album_id: Uuid) -> Result<u64, DbError> {
        delete_records::<AlbumInvite>(store, Filters::new().eq("album_id", album_id.to_string()))
            .await
    }
}
