//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El handle del record store se crea una sola
//! vez al arrancar y se comparte por referencia.

use anyhow::Result;
use std::sync::Arc;

use crate::clients::{HttpRecordStore, InMemoryRecordStore, RecordStore};
use crate::config::environment::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: Arc<dyn RecordStore>) -> Self {
        Self { config, store }
    }

    /// Construir el estado eligiendo el record store según la configuración
    pub fn from_config(config: EnvironmentConfig) -> Result<Self> {
        let store: Arc<dyn RecordStore> = match &config.record_store.base_url {
            Some(base_url) => {
                log::info!("🔗 Record store remoto: {}", base_url);
                Arc::new(HttpRecordStore::new(base_url.clone(), &config.record_store)?)
            }
            None => {
                log::warn!("⚠️ RECORD_STORE_URL no configurada, usando record store en memoria");
                Arc::new(InMemoryRecordStore::new())
            }
        };

        Ok(Self::new(config, store))
    }
}
