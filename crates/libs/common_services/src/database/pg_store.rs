use crate::database::{DbError, Filters, Order, RecordStore, Table, check_field};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

/// Postgres-backed [`RecordStore`]. Rows are exchanged as `jsonb`, so the typed stores
/// above it stay independent of the column types. Filters still compare typed columns.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Compares real columns so the table's indexes apply. The bound value is cast to the
/// column's own type by `jsonb_populate_record`, which is evaluated once per statement.
fn push_filters(
    qb: &mut QueryBuilder<'_, Postgres>,
    table: Table,
    filters: &Filters,
) -> Result<(), DbError> {
    for (i, (field, value)) in filters.iter().enumerate() {
        check_field(field)?;
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        if value.is_null() {
            qb.push(format!("t.\"{field}\" IS NULL"));
            continue;
        }
        let mut typed = Map::new();
        typed.insert((*field).to_owned(), value.clone());
        qb.push(format!(
            "t.\"{field}\" = (jsonb_populate_record(NULL::{table}, "
        ))
        .push_bind(Json(Value::Object(typed)))
        .push(format!("::jsonb)).\"{field}\""));
    }
    Ok(())
}

fn object_keys(table: Table, values: &Value) -> Result<Vec<String>, DbError> {
    let Value::Object(map) = values else {
        return Err(DbError::InvalidField(format!("{table} row is not an object")));
    };
    let keys: Vec<String> = map.keys().cloned().collect();
    for key in &keys {
        check_field(key)?;
    }
    Ok(keys)
}

#[async_trait]
impl RecordStore for PgStore {
    async fn select(
        &self,
        table: Table,
        filters: &Filters,
        order: Option<Order>,
    ) -> Result<Vec<Value>, DbError> {
        let mut qb = QueryBuilder::new(format!("SELECT to_jsonb(t) FROM {table} t"));
        push_filters(&mut qb, table, filters)?;
        if let Some(order) = order {
            check_field(order.field)?;
            qb.push(format!(
                " ORDER BY t.\"{}\" {}",
                order.field,
                order.direction.as_sql()
            ));
        }

        let rows: Vec<Json<Value>> = qb.build_query_scalar().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|Json(row)| row).collect())
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Value, DbError> {
        let columns = object_keys(table, &row)?
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let mut qb = QueryBuilder::new(format!(
            "INSERT INTO {table} AS t ({columns}) SELECT {columns} FROM jsonb_populate_record(NULL::{table}, "
        ));
        qb.push_bind(Json(row)).push(") RETURNING to_jsonb(t)");

        let Json(inserted): Json<Value> = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(inserted)
    }

    async fn update(
        &self,
        table: Table,
        values: Value,
        filters: &Filters,
    ) -> Result<Vec<Value>, DbError> {
        let keys = object_keys(table, &values)?;
        if keys.is_empty() {
            return self.select(table, filters, None).await;
        }
        let assignments = keys
            .iter()
            .map(|c| format!("\"{c}\" = r.\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");

        let mut qb = QueryBuilder::new(format!("UPDATE {table} AS t SET {assignments} FROM jsonb_populate_record(NULL::{table}, "));
        qb.push_bind(Json(values)).push(") AS r");
        push_filters(&mut qb, table, filters)?;
        qb.push(" RETURNING to_jsonb(t)");

        let rows: Vec<Json<Value>> = qb.build_query_scalar().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|Json(row)| row).collect())
    }

    async fn delete(&self, table: Table, filters: &Filters) -> Result<u64, DbError> {
        let mut qb = QueryBuilder::new(format!("DELETE FROM {table} AS t"));
        push_filters(&mut qb, table, filters)?;
        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_compare_typed_columns() -> Result<(), DbError> {
        let mut qb = QueryBuilder::new("SELECT to_jsonb(t) FROM album_invite t");
        push_filters(
            &mut qb,
            Table::AlbumInvite,
            &Filters::new()
                .eq("invited_email", "a@x.com")
                .eq("status", "pending"),
        )?;

        assert_eq!(
            qb.sql(),
            "SELECT to_jsonb(t) FROM album_invite t \
             WHERE t.\"invited_email\" = (jsonb_populate_record(NULL::album_invite, $1::jsonb)).\"invited_email\" \
             AND t.\"status\" = (jsonb_populate_record(NULL::album_invite, $2::jsonb)).\"status\""
        );
        Ok(())
    }

    #[test]
    fn test_null_filter_is_is_null() -> Result<(), DbError> {
        let mut qb = QueryBuilder::new("SELECT to_jsonb(t) FROM folder t");
        push_filters(
            &mut qb,
            Table::Folder,
            &Filters::new().eq("parent_folder_id", Value::Null),
        )?;

        assert_eq!(
            qb.sql(),
            "SELECT to_jsonb(t) FROM folder t WHERE t.\"parent_folder_id\" IS NULL"
        );
        Ok(())
    }

    #[test]
    fn test_filter_rejects_unsafe_field_names() {
        let mut qb = QueryBuilder::new("DELETE FROM album AS t");
        let result = push_filters(
            &mut qb,
            Table::Album,
            &Filters::new().eq("id\" OR 1=1 --", "x"),
        );
        assert!(matches!(result, Err(DbError::InvalidField(_))));
    }
}
