//! Configuración del record store

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Configuración de acceso al record store
#[derive(Debug, Clone)]
pub struct RecordStoreConfig {
    /// Sin URL se usa el store en memoria
    pub base_url: Option<String>,
    pub project_id: String,
    pub public_key: String,
    pub timeout: Duration,
}

impl Default for RecordStoreConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            project_id: String::new(),
            public_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RecordStoreConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("RECORD_STORE_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let timeout = match env::var("RECORD_STORE_TIMEOUT_SECS") {
            Ok(value) => Duration::from_secs(
                value
                    .parse()
                    .with_context(|| format!("RECORD_STORE_TIMEOUT_SECS must be a number, got '{}'", value))?,
            ),
            Err(_) => Duration::from_secs(30),
        };

        let (project_id, public_key) = match &base_url {
            Some(_) => (
                env::var("RECORD_STORE_PROJECT_ID")
                    .context("RECORD_STORE_PROJECT_ID must be set when RECORD_STORE_URL is set")?,
                env::var("RECORD_STORE_PUBLIC_KEY")
                    .context("RECORD_STORE_PUBLIC_KEY must be set when RECORD_STORE_URL is set")?,
            ),
            None => (String::new(), String::new()),
        };

        Ok(Self {
            base_url,
            project_id,
            public_key,
            timeout,
        })
    }
}
