//! Clients - record store
//!
//! Este módulo contiene el contrato del record store externo y sus
//! implementaciones (HTTP y en memoria).

pub mod http_record_store;
pub mod memory_store;
pub mod record_store;

// Re-export main types for convenience
pub use http_record_store::{HttpRecordStore, StoreResponse, StoreResult};
pub use memory_store::InMemoryRecordStore;
pub use record_store::{FetchQuery, RecordStore, SortType};
