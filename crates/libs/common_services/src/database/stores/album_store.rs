use crate::database::album::{Album, AlbumMediaItem};
use crate::database::{
    DbError, Filters, Order, RecordStore, delete_records, insert_record, select_record,
    select_records, update_record, update_records,
};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

pub struct AlbumStore;

impl AlbumStore {
    //================================================================================
    // Core Album Management
    //================================================================================

    pub async fn create(store: &dyn RecordStore, album: &Album) -> Result<Album, DbError> {
        insert_record(store, album).await
    }

    /// Applies a partial update. `values` must already contain `updated_at`.
    pub async fn update(
        store: &dyn RecordStore,
        album_id: Uuid,
        values: Value,
    ) -> Result<Option<Album>, DbError> {
        update_record(store, values, Filters::new().eq("id", album_id.to_string())).await
    }

    /// Retrieves a single album by its ID.
    pub async fn find_by_id(
        store: &dyn RecordStore,
        album_id: Uuid,
    ) -> Result<Option<Album>, DbError> {
        select_record(store, Filters::new().eq("id", album_id.to_string())).await
    }

    /// Retrieves the albums owned by a user, optionally limited to one folder.
    pub async fn list_by_owner(
        store: &dyn RecordStore,
        owner_id: &str,
        folder_id: Option<Uuid>,
        order: Order,
    ) -> Result<Vec<Album>, DbError> {
        let mut filters = Filters::new().eq("owner_id", owner_id);
        if let Some(folder_id) = folder_id {
            filters = filters.eq("folder_id", folder_id.to_string());
        }
        select_records(store, filters, Some(order)).await
    }

    /// Moves every album of the owner out of `folder_id`, back to the top level.
    pub async fn clear_folder(
        store: &dyn RecordStore,
        owner_id: &str,
        folder_id: Uuid,
    ) -> Result<u64, DbError> {
        let moved: Vec<Album> = update_records(
            store,
            json!({ "folder_id": Value::Null }),
            Filters::new()
                .eq("owner_id", owner_id)
                .eq("folder_id", folder_id.to_string()),
        )
        .await?;
        Ok(moved.len() as u64)
    }

    pub async fn delete(store: &dyn RecordStore, album_id: Uuid) -> Result<u64, DbError> {
        delete_records::<Album>(store, Filters::new().eq("id", album_id.to_string())).await
    }

    //================================================================================
    // Album Media Item Management
    //================================================================================

    /// Links a media item to an album. Returns `false` if it was already linked.
    pub async fn add_media_item(
        store: &dyn RecordStore,
        album_id: Uuid,
        media_item_id: Uuid,
        added_by_user: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DbError> {
        let link = AlbumMediaItem {
            album_id,
            media_item_id,
            added_by_user: Some(added_by_user.to_owned()),
            added_at: now,
        };
        match insert_record(store, &link).await {
            Ok(_) => Ok(true),
            Err(DbError::UniqueViolation(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn remove_media_item(
        store: &dyn RecordStore,
        album_id: Uuid,
        media_item_id: Uuid,
    ) -> Result<u64, DbError> {
        delete_records::<AlbumMediaItem>(
            store,
            Filters::new()
                .eq("album_id", album_id.to_string())
                .eq("media_item_id", media_item_id.to_string()),
        )
        .await
    }

    /// Media links of an album, most recently added first.
    pub async fn list_media_items(
        store: &dyn RecordStore,
        album_id: Uuid,
    ) -> Result<Vec<AlbumMediaItem>, DbError> {
        select_records(
            store,
            Filters::new().eq("album_id", album_id.to_string()),
            Some(Order::desc("added_at")),
        )
        .await
    }

    pub async fn count_media_items(
        store: &dyn RecordStore,
        album_id: Uuid,
    ) -> Result<usize, DbError> {
        Ok(Self::list_media_items(store, album_id).await?.len())
    }

    pub async fn remove_all_media_items(
        store: &dyn RecordStore,
        album_id: Uuid,
    ) -> Result<u64, DbError> {
        delete_records::<AlbumMediaItem>(store, Filters::new().eq("album_id", album_id.to_string()))
            .await
    }
}
