//! Registros crudos del record store
//!
//! Este módulo describe la forma exacta en que el record store devuelve
//! tractores, alquileres y pagos (campos con sufijo `_c`, referencias como
//! id o como objeto `{Id, Name}`) y los convierte una sola vez en las
//! entidades del dominio, justo después del fetch.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::payment::{Payment, TransactionStatus};
use crate::models::rental::{PaymentStatus, Rental, RentalType};
use crate::models::tractor::{Tractor, TractorStatus};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::parse_store_datetime;

pub const TRACTOR_TABLE: &str = "tractor_c";
pub const RENTAL_TABLE: &str = "rental_c";
pub const PAYMENT_TABLE: &str = "payment_c";

/// Referencia a otro registro: id plano, objeto lookup o id como texto
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LookupField {
    Id(i64),
    Reference {
        #[serde(rename = "Id")]
        id: i64,
        #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Text(String),
}

impl LookupField {
    pub fn id(&self) -> Option<i64> {
        match self {
            LookupField::Id(id) => Some(*id),
            LookupField::Reference { id, .. } => Some(*id),
            LookupField::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TractorRecord {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_rate_c: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RentalRecord {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tractor_id_c: Option<LookupField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name_c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_location_c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date_c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_type_c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status_c: Option<String>,
    /// Lo asigna el store; nunca se envía
    #[serde(rename = "CreatedOn", default, skip_serializing)]
    pub created_on: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_id_c: Option<LookupField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date_c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_c: Option<String>,
}

/// Convertir un importe del store a Decimal (ausente = 0)
pub fn decimal_from_store(value: Option<f64>, field: &str) -> AppResult<Decimal> {
    let Some(raw) = value else {
        return Ok(Decimal::ZERO);
    };
    let amount = Decimal::from_f64(raw)
        .ok_or_else(|| AppError::ExternalApi(format!("Valor no numérico en {}: {}", field, raw)))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AppError::ExternalApi(format!("Valor negativo en {}: {}", field, amount)));
    }
    Ok(amount)
}

/// Convertir un importe Decimal al formato numérico del store
pub fn decimal_to_store(value: Decimal) -> Option<f64> {
    value.to_f64()
}

/// Fecha para enviar al store
pub fn datetime_to_store(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

fn required_id(id: Option<i64>, table: &str) -> AppResult<i64> {
    id.ok_or_else(|| AppError::ExternalApi(format!("Registro de {} sin Id", table)))
}

fn required_datetime(value: Option<&str>, field: &str, id: i64) -> AppResult<DateTime<Utc>> {
    value
        .and_then(parse_store_datetime)
        .ok_or_else(|| AppError::ExternalApi(format!("Registro {}: fecha inválida en {}", id, field)))
}

impl TryFrom<TractorRecord> for Tractor {
    type Error = AppError;

    fn try_from(record: TractorRecord) -> AppResult<Self> {
        let id = required_id(record.id, TRACTOR_TABLE)?;
        let status = match record.status_c.as_deref() {
            Some(value) => value
                .parse::<TractorStatus>()
                .map_err(|e| AppError::ExternalApi(format!("Tractor {}: {}", id, e)))?,
            None => TractorStatus::Available,
        };

        Ok(Tractor {
            id,
            name: record.name.unwrap_or_default(),
            number: record.number_c.unwrap_or_default(),
            status,
            hourly_rate: decimal_from_store(record.hourly_rate_c, "hourly_rate_c")?,
            daily_rate: decimal_from_store(record.daily_rate_c, "daily_rate_c")?,
        })
    }
}

impl TryFrom<RentalRecord> for Rental {
    type Error = AppError;

    fn try_from(record: RentalRecord) -> AppResult<Self> {
        let id = required_id(record.id, RENTAL_TABLE)?;
        let start_time = required_datetime(record.start_date_c.as_deref(), "start_date_c", id)?;
        let end_time = required_datetime(record.end_date_c.as_deref(), "end_date_c", id)?;
        if end_time <= start_time {
            return Err(AppError::ExternalApi(format!(
                "Alquiler {}: la fecha de fin no es posterior a la de inicio",
                id
            )));
        }

        let rental_type = match record.rental_type_c.as_deref() {
            Some(value) => value
                .parse::<RentalType>()
                .map_err(|e| AppError::ExternalApi(format!("Alquiler {}: {}", id, e)))?,
            None => RentalType::Daily,
        };
        let payment_status = match record.payment_status_c.as_deref() {
            Some(value) => value
                .parse::<PaymentStatus>()
                .map_err(|e| AppError::ExternalApi(format!("Alquiler {}: {}", id, e)))?,
            None => PaymentStatus::Pending,
        };

        Ok(Rental {
            id,
            tractor_id: record.tractor_id_c.as_ref().and_then(LookupField::id),
            customer_name: record.customer_name_c.unwrap_or_default(),
            farm_location: record.farm_location_c.unwrap_or_default(),
            start_time,
            end_time,
            rental_type,
            total_amount: decimal_from_store(record.total_amount_c, "total_amount_c")?,
            payment_status,
            created_at: record.created_on.as_deref().and_then(parse_store_datetime),
        })
    }
}

impl TryFrom<PaymentRecord> for Payment {
    type Error = AppError;

    fn try_from(record: PaymentRecord) -> AppResult<Self> {
        let id = required_id(record.id, PAYMENT_TABLE)?;
        let status = match record.status_c.as_deref() {
            Some(value) => value
                .parse::<TransactionStatus>()
                .map_err(|e| AppError::ExternalApi(format!("Pago {}: {}", id, e)))?,
            None => TransactionStatus::Pending,
        };

        Ok(Payment {
            id,
            rental_id: record.rental_id_c.as_ref().and_then(LookupField::id),
            amount: decimal_from_store(record.amount_c, "amount_c")?,
            paid_date: record.paid_date_c.as_deref().and_then(parse_store_datetime),
            method: record.method_c.unwrap_or_default(),
            status,
        })
    }
}

/// Normalizar una lista de valores JSON del store.
///
/// Los registros que no se pueden convertir se descartan con un warning.
pub fn normalize_records<R, T>(table: &str, values: Vec<serde_json::Value>) -> Vec<T>
where
    R: serde::de::DeserializeOwned,
    T: TryFrom<R, Error = AppError>,
{
    values
        .into_iter()
        .filter_map(|value| {
            let record: R = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("⚠️ Registro de {} con formato inesperado: {}", table, e);
                    return None;
                }
            };
            match T::try_from(record) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    log::warn!("⚠️ Registro de {} descartado: {}", table, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_field_shapes() {
        let bare: LookupField = serde_json::from_value(json!(3)).unwrap();
        let object: LookupField = serde_json::from_value(json!({"Id": 4, "Name": "Mahindra 575"})).unwrap();
        let text: LookupField = serde_json::from_value(json!("5")).unwrap();
        assert_eq!(bare.id(), Some(3));
        assert_eq!(object.id(), Some(4));
        assert_eq!(text.id(), Some(5));
    }

    #[test]
    fn test_tractor_normalization() {
        let values = vec![
            json!({"Id": 1, "Name": "John Deere 5050", "number_c": "TR-001", "status_c": "On Rent",
                   "hourly_rate_c": 450, "daily_rate_c": 3200.5}),
            json!({"Name": "sin id"}),
        ];
        let tractors: Vec<Tractor> = normalize_records::<TractorRecord, Tractor>(TRACTOR_TABLE, values);
        assert_eq!(tractors.len(), 1);
        assert_eq!(tractors[0].status, TractorStatus::OnRent);
        assert_eq!(tractors[0].hourly_rate, Decimal::new(450, 0));
        assert_eq!(tractors[0].daily_rate, Decimal::new(32005, 1));
    }

    #[test]
    fn test_tractor_missing_rates_default_to_zero() {
        let record = TractorRecord { id: Some(9), name: Some("Swaraj".into()), ..Default::default() };
        let tractor = Tractor::try_from(record).unwrap();
        assert_eq!(tractor.hourly_rate, Decimal::ZERO);
        assert_eq!(tractor.daily_rate, Decimal::ZERO);
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let record = TractorRecord { id: Some(9), hourly_rate_c: Some(-10.0), ..Default::default() };
        assert!(Tractor::try_from(record).is_err());
    }

    #[test]
    fn test_rental_normalization_with_lookup_reference() {
        let values = vec![json!({
            "Id": 10,
            "tractor_id_c": {"Id": 2, "Name": "Mahindra 575"},
            "customer_name_c": "Ramesh Patel",
            "farm_location_c": "Anand",
            "start_date_c": "2024-01-01T00:00",
            "end_date_c": "2024-01-02T06:00",
            "rental_type_c": "daily",
            "total_amount_c": 6400,
            "payment_status_c": "Overdue",
            "CreatedOn": "2024-01-01T09:15:00Z"
        })];
        let rentals: Vec<Rental> = normalize_records::<RentalRecord, Rental>(RENTAL_TABLE, values);
        assert_eq!(rentals.len(), 1);
        let rental = &rentals[0];
        assert_eq!(rental.tractor_id, Some(2));
        assert_eq!(rental.payment_status, PaymentStatus::Overdue);
        assert_eq!(rental.rental_type, RentalType::Daily);
        assert!(rental.created_at.is_some());
    }

    #[test]
    fn test_rental_with_inverted_window_is_dropped() {
        let values = vec![json!({
            "Id": 11,
            "tractor_id_c": 1,
            "customer_name_c": "Ramesh Patel",
            "start_date_c": "2024-01-02T00:00",
            "end_date_c": "2024-01-01T00:00"
        })];
        let rentals: Vec<Rental> = normalize_records::<RentalRecord, Rental>(RENTAL_TABLE, values);
        assert!(rentals.is_empty());
    }

    #[test]
    fn test_payment_normalization() {
        let record: PaymentRecord = serde_json::from_value(json!({
            "Id": 5, "rental_id_c": {"Id": 10}, "amount_c": 1500,
            "paid_date_c": "2024-01-05", "method_c": "UPI", "status_c": "Completed"
        }))
        .unwrap();
        let payment = Payment::try_from(record).unwrap();
        assert_eq!(payment.rental_id, Some(10));
        assert_eq!(payment.status, TransactionStatus::Completed);
        assert_eq!(payment.amount, Decimal::new(1500, 0));
    }

    #[test]
    fn test_created_on_is_never_sent() {
        let record = RentalRecord {
            customer_name_c: Some("Ramesh Patel".into()),
            created_on: Some("2024-01-01T00:00:00Z".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("CreatedOn").is_none());
        assert!(value.get("Id").is_none());
    }
}
