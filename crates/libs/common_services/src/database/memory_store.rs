use crate::database::{DbError, Filters, Order, RecordStore, SortDirection, Table, check_field};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process [`RecordStore`], enforcing each table's unique keys.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Table, Vec<Value>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn field<'a>(row: &'a Value, name: &str) -> &'a Value {
    row.get(name).unwrap_or(&Value::Null)
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::String(a), Value::String(b)) => {
            // Timestamps serialize with a variable number of fractional digits.
            match (a.parse::<DateTime<Utc>>(), b.parse::<DateTime<Utc>>()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            }
        }
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn violates_unique(table: Table, rows: &[Value], candidate: &Value, skip: Option<usize>) -> bool {
    table.unique_keys().iter().any(|key| {
        rows.iter().enumerate().any(|(i, row)| {
            Some(i) != skip
                && key
                    .iter()
                    .all(|f| !field(candidate, f).is_null() && field(row, f) == field(candidate, f))
        })
    })
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select(
        &self,
        table: Table,
        filters: &Filters,
        order: Option<Order>,
    ) -> Result<Vec<Value>, DbError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Value> = tables
            .get(&table)
            .map(|rows| rows.iter().filter(|r| filters.matches(r)).cloned().collect())
            .unwrap_or_default();

        if let Some(order) = order {
            check_field(order.field)?;
            rows.sort_by(|a, b| {
                let ordering = compare_values(field(a, order.field), field(b, order.field));
                match order.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }
        Ok(rows)
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Value, DbError> {
        if !row.is_object() {
            return Err(DbError::InvalidField(format!("{table} row is not an object")));
        }
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table).or_default();
        if violates_unique(table, rows, &row, None) {
            return Err(DbError::UniqueViolation(table.to_string()));
        }
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        table: Table,
        values: Value,
        filters: &Filters,
    ) -> Result<Vec<Value>, DbError> {
        let Value::Object(values) = values else {
            return Err(DbError::InvalidField(format!("{table} update is not an object")));
        };
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(&table) else {
            return Ok(vec![]);
        };

        let matching: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| filters.matches(row))
            .map(|(i, _)| i)
            .collect();

        let mut updated = Vec::with_capacity(matching.len());
        for i in matching {
            let mut row = rows[i].clone();
            if let Value::Object(map) = &mut row {
                for (key, value) in &values {
                    map.insert(key.clone(), value.clone());
                }
            }
            if violates_unique(table, rows, &row, Some(i)) {
                return Err(DbError::UniqueViolation(table.to_string()));
            }
            rows[i] = row.clone();
            updated.push(row);
        }
        Ok(updated)
    }

    async fn delete(&self, table: Table, filters: &Filters) -> Result<u64, DbError> {
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(&table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|row| !filters.matches(row));
        Ok((before - rows.len()) as u64)
    }
}
