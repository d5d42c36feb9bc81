//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, importes y validación.

pub mod errors;
pub mod money;
pub mod validation;

pub use errors::{AppError, AppResult};
