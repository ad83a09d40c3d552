use crate::database::DbError;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// The kinds of rows the sharing engine reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Album,
    Folder,
    MediaItem,
    AlbumMediaItem,
    AlbumCollaborator,
    AlbumInvite,
    FamilyMember,
}

impl Table {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::Folder => "folder",
            Self::MediaItem => "media_item",
            Self::AlbumMediaItem => "album_media_item",
            Self::AlbumCollaborator => "album_collaborator",
            Self::AlbumInvite => "album_invite",
            Self::FamilyMember => "family_member",
        }
    }

    /// Field combinations that must be unique within the table.
    #[must_use]
    pub const fn unique_keys(&self) -> &'static [&'static [&'static str]] {
        match self {
            Self::Album | Self::Folder | Self::MediaItem => &[&["id"]],
            Self::AlbumMediaItem => &[&["album_id", "media_item_id"]],
            Self::AlbumCollaborator => &[&["id"], &["album_id", "user_id"]],
            Self::AlbumInvite | Self::FamilyMember => &[&["id"], &["token"]],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact-equality filters on named fields. A JSON `null` matches a missing or NULL field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters(Vec<(&'static str, Value)>);

impl Filters {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn eq(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.0.push((field, value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, Value)> {
        self.0.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a JSON row satisfies every filter.
    #[must_use]
    pub fn matches(&self, row: &Value) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| row.get(*field).unwrap_or(&Value::Null) == expected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl Order {
    #[must_use]
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Generic row storage with equality filters and ordering.
///
/// Rows travel as JSON objects keyed by column name. No match is an empty result, never an error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn select(
        &self,
        table: Table,
        filters: &Filters,
        order: Option<Order>,
    ) -> Result<Vec<Value>, DbError>;

    async fn insert(&self, table: Table, row: Value) -> Result<Value, DbError>;

    /// Merges `values` into every matching row and returns the updated rows.
    async fn update(
        &self,
        table: Table,
        values: Value,
        filters: &Filters,
    ) -> Result<Vec<Value>, DbError>;

    /// Returns the number of deleted rows.
    async fn delete(&self, table: Table, filters: &Filters) -> Result<u64, DbError>;
}

/// A typed row of one [`Table`].
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const TABLE: Table;
}

pub async fn select_records<R: Record>(
    store: &dyn RecordStore,
    filters: Filters,
    order: Option<Order>,
) -> Result<Vec<R>, DbError> {
    store
        .select(R::TABLE, &filters, order)
        .await?
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(DbError::from))
        .collect()
}

pub async fn select_record<R: Record>(
    store: &dyn RecordStore,
    filters: Filters,
) -> Result<Option<R>, DbError> {
    Ok(select_records(store, filters, None).await?.into_iter().next())
}

pub async fn insert_record<R: Record>(store: &dyn RecordStore, record: &R) -> Result<R, DbError> {
    let row = store.insert(R::TABLE, serde_json::to_value(record)?).await?;
    Ok(serde_json::from_value(row)?)
}

pub async fn update_records<R: Record>(
    store: &dyn RecordStore,
    values: Value,
    filters: Filters,
) -> Result<Vec<R>, DbError> {
    store
        .update(R::TABLE, values, &filters)
        .await?
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(DbError::from))
        .collect()
}

pub async fn update_record<R: Record>(
    store: &dyn RecordStore,
    values: Value,
    filters: Filters,
) -> Result<Option<R>, DbError> {
    Ok(update_records(store, values, filters).await?.into_iter().next())
}

pub async fn delete_records<R: Record>(
    store: &dyn RecordStore,
    filters: Filters,
) -> Result<u64, DbError> {
    store.delete(R::TABLE, &filters).await
}

/// Field names end up in SQL, so only plain identifiers are accepted.
pub(crate) fn check_field(field: &str) -> Result<(), DbError> {
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidField(field.to_owned()))
    }
}
