//! Cliente HTTP para el record store
//!
//! Un único `reqwest::Client` (con timeout) se construye al arrancar y se
//! comparte a través de `AppState`; nada reinstancia el cliente por llamada.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::clients::record_store::{FetchQuery, RecordStore};
use crate::config::record_store::RecordStoreConfig;
use crate::utils::errors::{AppError, AppResult};

/// Envelope de respuesta del record store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub results: Option<Vec<StoreResult>>,
}

/// Resultado individual de una mutación
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreResult {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

pub struct HttpRecordStore {
    client: Client,
    base_url: String,
    project_id: String,
    public_key: String,
}

impl HttpRecordStore {
    /// Crear el cliente HTTP del record store
    pub fn new(base_url: String, config: &RecordStoreConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            public_key: config.public_key.clone(),
        })
    }

    fn records_url(&self, table: &str) -> String {
        format!("{}/api/v1/tables/{}/records", self.base_url, table)
    }

    async fn send(&self, request: RequestBuilder, context: &str) -> AppResult<StoreResponse> {
        let response = request
            .header("X-Project-Id", &self.project_id)
            .bearer_auth(&self.public_key)
            .header("User-Agent", "TractorRental/1.0")
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error de red ({}): {}", context, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error leyendo respuesta ({}): {}", context, e)))?;

        log::debug!("📡 Record store {} -> {}", context, status);

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("{}: {}", context, body)));
        }
        if !status.is_success() {
            return Err(AppError::ExternalApi(format!("Record store error {} ({}): {}", status, context, body)));
        }

        let parsed: StoreResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::ExternalApi(format!("Respuesta inválida ({}): {}", context, e)))?;

        if !parsed.success {
            let message = parsed.message.unwrap_or_else(|| format!("Operación fallida: {}", context));
            return Err(AppError::ExternalApi(message));
        }

        Ok(parsed)
    }

    /// Primer resultado de una mutación de un solo registro
    fn single_result(response: StoreResponse, context: &str) -> AppResult<Value> {
        let result = response
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| AppError::ExternalApi(format!("Respuesta sin resultados ({})", context)))?;

        if !result.success {
            let message = result.message.unwrap_or_else(|| format!("Operación fallida: {}", context));
            return Err(AppError::ExternalApi(message));
        }

        Ok(result.data.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn fetch_records(&self, table: &str, query: &FetchQuery) -> AppResult<Vec<Value>> {
        let context = format!("fetch {}", table);
        let url = format!("{}/query", self.records_url(table));
        let response = self.send(self.client.post(&url).json(query), &context).await?;

        match response.data {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(records)) => {
                log::info!("📋 {} registros recibidos de {}", records.len(), table);
                Ok(records)
            }
            Some(other) => Err(AppError::ExternalApi(format!(
                "Se esperaba una lista de registros en {}, llegó: {}",
                table, other
            ))),
        }
    }

    async fn create_record(&self, table: &str, record: Value) -> AppResult<Value> {
        let context = format!("create {}", table);
        let body = json!({ "records": [record] });
        let response = self
            .send(self.client.post(self.records_url(table)).json(&body), &context)
            .await?;
        Self::single_result(response, &context)
    }

    async fn update_record(&self, table: &str, id: i64, fields: Value) -> AppResult<Value> {
        let context = format!("update {} {}", table, id);
        let mut record = match fields {
            Value::Object(map) => map,
            _ => return Err(AppError::Internal(format!("Actualización no es un objeto ({})", context))),
        };
        record.insert("Id".to_string(), json!(id));

        let body = json!({ "records": [record] });
        let response = self
            .send(self.client.patch(self.records_url(table)).json(&body), &context)
            .await?;
        Self::single_result(response, &context)
    }

    async fn delete_record(&self, table: &str, id: i64) -> AppResult<()> {
        let context = format!("delete {} {}", table, id);
        let body = json!({ "RecordIds": [id] });
        let response = self
            .send(self.client.delete(self.records_url(table)).json(&body), &context)
            .await?;
        Self::single_result(response, &context).map(|_| ())
    }
}
