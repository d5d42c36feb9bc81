//! Record store en memoria
//!
//! Implementación local del contrato `RecordStore`: tablas con ids
//! autoincrementales, filtros `EqualTo` y orden por campo. Se usa cuando no
//! hay URL de record store configurada y en los tests.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::clients::record_store::{FetchQuery, RecordStore, SortType, WhereCondition};
use crate::utils::errors::{not_found_error, AppError, AppResult};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: Vec<Map<String, Value>>,
}

#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de registros de una tabla
    pub async fn count(&self, table: &str) -> usize {
        let tables = self.tables.read().await;
        tables.get(table).map(|t| t.rows.len()).unwrap_or(0)
    }
}

fn row_id(row: &Map<String, Value>) -> Option<i64> {
    row.get("Id").and_then(Value::as_i64)
}

/// Comparación de un campo contra un valor de filtro; las referencias
/// lookup se comparan por su `Id`
fn field_matches(field: Option<&Value>, expected: &Value) -> bool {
    match field {
        Some(Value::Object(lookup)) => lookup.get("Id") == Some(expected),
        Some(value) => value == expected,
        None => expected.is_null(),
    }
}

fn matches_conditions(row: &Map<String, Value>, conditions: &[WhereCondition]) -> bool {
    conditions.iter().all(|condition| {
        let field = row.get(&condition.field_name);
        condition.values.iter().any(|expected| field_matches(field, expected))
    })
}

/// Orden de valores JSON; los ausentes van al final
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Null) | None, Some(Value::Null) | None) => Ordering::Equal,
        (Some(Value::Null) | None, _) => Ordering::Greater,
        (_, Some(Value::Null) | None) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch_records(&self, table: &str, query: &FetchQuery) -> AppResult<Vec<Value>> {
        let tables = self.tables.read().await;
        let Some(table_data) = tables.get(table) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<&Map<String, Value>> = table_data
            .rows
            .iter()
            .filter(|row| matches_conditions(row, &query.conditions))
            .collect();

        if let Some(order) = query.order_by.first() {
            rows.sort_by(|a, b| {
                let ordering = compare_values(a.get(&order.field_name), b.get(&order.field_name));
                match order.sort_type {
                    SortType::Asc => ordering,
                    SortType::Desc => ordering.reverse(),
                }
            });
        }

        Ok(rows.into_iter().cloned().map(Value::Object).collect())
    }

    async fn create_record(&self, table: &str, record: Value) -> AppResult<Value> {
        let Value::Object(mut row) = record else {
            return Err(AppError::BadRequest(format!("El registro para {} debe ser un objeto", table)));
        };

        let mut tables = self.tables.write().await;
        let table_data = tables.entry(table.to_string()).or_default();
        table_data.next_id += 1;
        row.insert("Id".to_string(), json!(table_data.next_id));
        row.entry("CreatedOn".to_string())
            .or_insert_with(|| json!(Utc::now().to_rfc3339()));
        table_data.rows.push(row.clone());

        Ok(Value::Object(row))
    }

    async fn update_record(&self, table: &str, id: i64, fields: Value) -> AppResult<Value> {
        let Value::Object(fields) = fields else {
            return Err(AppError::BadRequest(format!("La actualización para {} debe ser un objeto", table)));
        };

        let mut tables = self.tables.write().await;
        let row = tables
            .get_mut(table)
            .and_then(|t| t.rows.iter_mut().find(|row| row_id(row) == Some(id)))
            .ok_or_else(|| not_found_error(table, &id.to_string()))?;

        for (key, value) in fields {
            if key != "Id" {
                row.insert(key, value);
            }
        }

        Ok(Value::Object(row.clone()))
    }

    async fn delete_record(&self, table: &str, id: i64) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let table_data = tables
            .get_mut(table)
            .ok_or_else(|| not_found_error(table, &id.to_string()))?;

        let before = table_data.rows.len();
        table_data.rows.retain(|row| row_id(row) != Some(id));
        if table_data.rows.len() == before {
            return Err(not_found_error(table, &id.to_string()));
        }
        Ok(())
    }
}
