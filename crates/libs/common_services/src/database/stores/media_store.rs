use crate::database::media_item::MediaItem;
use crate::database::{DbError, Filters, RecordStore, insert_record, select_record};
use uuid::Uuid;

pub struct MediaStore;

impl MediaStore {
    pub async fn create(store: &dyn RecordStore, item: &MediaItem) -> Result<MediaItem, DbError> {
        insert_record(store, item).await
    }

    pub async fn find_by_id(
        store: &dyn RecordStore,
        media_item_id: Uuid,
    ) -> Result<Option<MediaItem>, DbError> {
        select_record(store, Filters::new().eq("id", media_item_id.to_string())).await
    }
}
