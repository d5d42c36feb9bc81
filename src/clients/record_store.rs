//! Contrato del record store externo
//!
//! El record store es un CRUD opaco: la aplicación solo conoce tablas,
//! registros JSON y una consulta simple (campos, filtros de igualdad y
//! orden). Todas las operaciones devuelven `AppResult`, sin toasts ni
//! reintentos; la capa de presentación decide cómo mostrar el fallo.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::errors::AppResult;

/// Campo solicitado en una consulta
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSelector {
    pub field: FieldName,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

/// Condición de filtro; el único operador usado es `EqualTo`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WhereCondition {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Operator")]
    pub operator: String,
    #[serde(rename = "Values")]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortType {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "sorttype")]
    pub sort_type: SortType,
}

/// Consulta de lectura enviada al store
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FetchQuery {
    #[serde(default)]
    pub fields: Vec<FieldSelector>,
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<WhereCondition>,
    #[serde(rename = "orderBy", default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
}

impl FetchQuery {
    pub fn with_fields(fields: &[&str]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|name| FieldSelector {
                    field: FieldName { name: name.to_string() },
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn where_equals(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(WhereCondition {
            field_name: field.to_string(),
            operator: "EqualTo".to_string(),
            values: vec![value.into()],
        });
        self
    }

    pub fn order_by(mut self, field: &str, sort_type: SortType) -> Self {
        self.order_by.push(OrderBy {
            field_name: field.to_string(),
            sort_type,
        });
        self
    }
}

/// Operaciones CRUD sobre el record store
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_records(&self, table: &str, query: &FetchQuery) -> AppResult<Vec<Value>>;

    async fn create_record(&self, table: &str, record: Value) -> AppResult<Value>;

    /// Actualización parcial: solo se envían los campos presentes
    async fn update_record(&self, table: &str, id: i64, fields: Value) -> AppResult<Value>;

    async fn delete_record(&self, table: &str, id: i64) -> AppResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_query_wire_shape() {
        let query = FetchQuery::with_fields(&["Name", "customer_name_c"])
            .where_equals("customer_name_c", "Ramesh Patel")
            .order_by("start_date_c", SortType::Desc);

        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            json!({
                "fields": [{"field": {"Name": "Name"}}, {"field": {"Name": "customer_name_c"}}],
                "where": [{"FieldName": "customer_name_c", "Operator": "EqualTo", "Values": ["Ramesh Patel"]}],
                "orderBy": [{"fieldName": "start_date_c", "sorttype": "DESC"}]
            })
        );
    }

    #[test]
    fn test_empty_clauses_are_omitted() {
        let value = serde_json::to_value(FetchQuery::with_fields(&["Name"])).unwrap();
        assert!(value.get("where").is_none());
        assert!(value.get("orderBy").is_none());
    }
}
