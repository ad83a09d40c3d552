use crate::database::folder::Folder;
use crate::database::{
    DbError, Filters, Order, RecordStore, delete_records, insert_record, select_record,
    select_records, update_records,
};
use serde_json::{Value, json};
use uuid::Uuid;

pub struct FolderStore;

impl FolderStore {
    pub async fn create(store: &dyn RecordStore, folder: &Folder) -> Result<Folder, DbError> {
        insert_record(store, folder).await
    }

    /// Finds a folder only if it belongs to `owner_id`.
    pub async fn find_owned(
        store: &dyn RecordStore,
        folder_id: Uuid,
        owner_id: &str,
    ) -> Result<Option<Folder>, DbError> {
        select_record(
            store,
            Filters::new()
                .eq("id", folder_id.to_string())
                .eq("owner_id", owner_id),
        )
        .await
    }

    /// Lists the direct children of `parent_folder_id`, or the root folders when `None`.
    pub async fn list(
        store: &dyn RecordStore,
        owner_id: &str,
        parent_folder_id: Option<Uuid>,
    ) -> Result<Vec<Folder>, DbError> {
        let parent = parent_folder_id.map_or(Value::Null, |id| Value::String(id.to_string()));
        select_records(
            store,
            Filters::new()
                .eq("owner_id", owner_id)
                .eq("parent_folder_id", parent),
            Some(Order::asc("name")),
        )
        .await
    }

    /// Moves the children of `folder_id` to the top level.
    pub async fn detach_children(
        store: &dyn RecordStore,
        owner_id: &str,
        folder_id: Uuid,
    ) -> Result<u64, DbError> {
        let moved: Vec<Folder> = update_records(
            store,
            json!({ "parent_folder_id": Value::Null }),
            Filters::new()
                .eq("owner_id", owner_id)
                .eq("parent_folder_id", folder_id.to_string()),
        )
        .await?;
        Ok(moved.len() as u64)
    }

    pub async fn delete(store: &dyn RecordStore, folder_id: Uuid) -> Result<u64, DbError> {
        delete_records::<Folder>(store, Filters::new().eq("id", folder_id.to_string())).await
    }
}
