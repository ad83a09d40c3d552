use crate::database::album::AlbumRole;
use crate::database::family_member::{FamilyMember, FamilyStatus};
use crate::database::{
    DbError, Filters, Order, RecordStore, delete_records, insert_record, select_record,
    select_records, update_record,
};
use serde_json::json;
use uuid::Uuid;

pub struct FamilyStore;

impl FamilyStore {
    pub async fn create(
        store: &dyn RecordStore,
        member: &FamilyMember,
    ) -> Result<FamilyMember, DbError> {
        insert_record(store, member).await
    }

    pub async fn find_by_token(
        store: &dyn RecordStore,
        token: &str,
    ) -> Result<Option<FamilyMember>, DbError> {
        select_record(store, Filters::new().eq("token", token)).await
    }

    /// Finds a family record only if it was issued by `owner_id`.
    pub async fn find_owned(
        store: &dyn RecordStore,
        record_id: Uuid,
        owner_id: &str,
    ) -> Result<Option<FamilyMember>, DbError> {
        select_record(
            store,
            Filters::new()
                .eq("id", record_id.to_string())
                .eq("owner_id", owner_id),
        )
        .await
    }

    /// Every family record issued by an owner, newest first.
    pub async fn list_by_owner(
        store: &dyn RecordStore,
        owner_id: &str,
    ) -> Result<Vec<FamilyMember>, DbError> {
        select_records(
            store,
            Filters::new().eq("owner_id", owner_id),
            Some(Order::desc("created_at")),
        )
        .await
    }

    /// The accepted membership of `member_id` in the family of `owner_id`, if any.
    pub async fn find_accepted(
        store: &dyn RecordStore,
        owner_id: &str,
        member_id: &str,
    ) -> Result<Option<FamilyMember>, DbError> {
        select_record(
            store,
            Filters::new()
                .eq("owner_id", owner_id)
                .eq("member_id", member_id)
                .eq("status", FamilyStatus::Accepted.as_str()),
        )
        .await
    }

    pub async fn list_accepted_for_member(
        store: &dyn RecordStore,
        member_id: &str,
    ) -> Result<Vec<FamilyMember>, DbError> {
        select_records(
            store,
            Filters::new()
                .eq("member_id", member_id)
                .eq("status", FamilyStatus::Accepted.as_str()),
            Some(Order::asc("created_at")),
        )
        .await
    }

    pub async fn list_pending_by_email(
        store: &dyn RecordStore,
        email: &str,
    ) -> Result<Vec<FamilyMember>, DbError> {
        select_records(
            store,
            Filters::new()
                .eq("invited_email", email)
                .eq("status", FamilyStatus::Pending.as_str()),
            Some(Order::asc("created_at")),
        )
        .await
    }

    pub async fn accept(
        store: &dyn RecordStore,
        record_id: Uuid,
        member_id: &str,
    ) -> Result<Option<FamilyMember>, DbError> {
        update_record(
            store,
            json!({ "member_id": member_id, "status": FamilyStatus::Accepted }),
            Filters::new().eq("id", record_id.to_string()),
        )
        .await
    }

    pub async fn update_role(
        store: &dyn RecordStore,
        record_id: Uuid,
        role: AlbumRole,
    ) -> Result<Option<FamilyMember>, DbError> {
        update_record(
            store,
            json!({ "role": role }),
            Filters::new().eq("id", record_id.to_string()),
        )
        .await
    }

    pub async fn delete(store: &dyn RecordStore, record_id: Uuid) -> Result<u64, DbError> {
        delete_records::<FamilyMember>(store, Filters::new().eq("id", record_id.to_string()))
            .await
    }
}
