//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del entorno y del record store.

pub mod environment;
pub mod record_store;

pub use environment::*;
