use crate::database::album::{AlbumCollaborator, AlbumRole};
use crate::database::{
    DbError, Filters, Order, RecordStore, delete_records, insert_record, select_record,
    select_records, update_record,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

pub struct CollaboratorStore;

fn pair(album_id: Uuid, user_id: &str) -> Filters {
    Filters::new()
        .eq("album_id", album_id.to_string())
        .eq("user_id", user_id)
}

impl CollaboratorStore {
    pub async fn find(
        store: &dyn RecordStore,
        album_id: Uuid,
        user_id: &str,
    ) -> Result<Option<AlbumCollaborator>, DbError> {
        select_record(store, pair(album_id, user_id)).await
    }

    /// Collaborators of an album, oldest grant first.
    pub async fn list_by_album(
        store: &dyn RecordStore,
        album_id: Uuid,
    ) -> Result<Vec<AlbumCollaborator>, DbError> {
        select_records(
            store,
            Filters::new().eq("album_id", album_id.to_string()),
            Some(Order::asc("created_at")),
        )
        .await
    }

    pub async fn list_by_user(
        store: &dyn RecordStore,
        user_id: &str,
    ) -> Result<Vec<AlbumCollaborator>, DbError> {
        select_records(
            store,
            Filters::new().eq("user_id", user_id),
            Some(Order::asc("created_at")),
        )
        .await
    }

    /// Adds a collaborator to an album or updates their role if they already exist.
    ///
    /// Safe to repeat: a concurrent insert of the same pair turns into a role update.
    pub async fn upsert(
        store: &dyn RecordStore,
        album_id: Uuid,
        user_id: &str,
        role: AlbumRole,
        now: DateTime<Utc>,
    ) -> Result<AlbumCollaborator, DbError> {
        if let Some(updated) = Self::update_role(store, album_id, user_id, role).await? {
            return Ok(updated);
        }

        let collaborator = AlbumCollaborator {
            id: Uuid::new_v4(),
            album_id,
            user_id: user_id.to_owned(),
            role,
            created_at: now,
        };
        match insert_record(store, &collaborator).await {
            Ok(inserted) => Ok(inserted),
            Err(DbError::UniqueViolation(_)) => {
                debug!("Collaborator {user_id} on {album_id} was inserted concurrently, updating instead.");
                Self::update_role(store, album_id, user_id, role)
                    .await?
                    .ok_or(DbError::MissingRow("album_collaborator"))
            }
            Err(e) => Err(e),
        }
    }

    /// Returns `None` when the user is not a collaborator.
    pub async fn update_role(
        store: &dyn RecordStore,
        album_id: Uuid,
        user_id: &str,
        role: AlbumRole,
    ) -> Result<Option<AlbumCollaborator>, DbError> {
        update_record(store, json!({ "role": role }), pair(album_id, user_id)).await
    }

    pub async fn remove(
        store: &dyn RecordStore,
        album_id: Uuid,
        user_id: &str,
    ) -> Result<u64, DbError> {
        delete_records::<AlbumCollaborator>(store, pair(album_id, user_id)).await
    }

    pub async fn remove_all(store: &dyn RecordStore, album_id: Uuid) -> Result<u64, DbError> {
        delete_records::<AlbumCollaborator>(
            store,
            Filters::new().eq("album_id", album_id.to_string()),
        )
        .await
    }
}
