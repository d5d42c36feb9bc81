//! Repositorios
//!
//! CRUD tipado por entidad sobre el `RecordStore`. La normalización de los
//! registros crudos ocurre aquí, inmediatamente después de cada lectura.

pub mod payment_repository;
pub mod rental_repository;
pub mod tractor_repository;

pub use payment_repository::PaymentRepository;
pub use rental_repository::RentalRepository;
pub use tractor_repository::TractorRepository;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::utils::errors::{AppError, AppResult};

/// Serializar un registro crudo para enviarlo al store
pub(crate) fn to_store_value<R: Serialize>(record: &R) -> AppResult<Value> {
    serde_json::to_value(record).map_err(|e| AppError::Internal(format!("Error serializando registro: {}", e)))
}

/// Convertir la respuesta de una mutación en entidad del dominio
pub(crate) fn from_store_value<R, T>(table: &str, value: Value) -> AppResult<T>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = AppError>,
{
    let record: R = serde_json::from_value(value)
        .map_err(|e| AppError::ExternalApi(format!("Registro de {} con formato inesperado: {}", table, e)))?;
    T::try_from(record)
}
