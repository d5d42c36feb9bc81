//! Modelo de Rental
//!
//! Un alquiler de tractor por una ventana de tiempo acotada.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Modo de facturación
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RentalType {
    #[default]
    #[serde(alias = "Daily")]
    Daily,
    #[serde(alias = "Hourly")]
    Hourly,
}

impl RentalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalType::Daily => "daily",
            RentalType::Hourly => "hourly",
        }
    }
}

impl FromStr for RentalType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "daily" => Ok(RentalType::Daily),
            "hourly" => Ok(RentalType::Hourly),
            other => Err(format!("Tipo de alquiler desconocido: '{}'", other)),
        }
    }
}

/// Estado de pago del alquiler
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Overdue,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Partial,
        PaymentStatus::Paid,
        PaymentStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Overdue => "Overdue",
        }
    }

    /// Pagos que siguen abiertos (cuentan como pendientes del cliente)
    pub fn is_outstanding(&self) -> bool {
        matches!(self, PaymentStatus::Pending | PaymentStatus::Overdue)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "partial" => Ok(PaymentStatus::Partial),
            "paid" => Ok(PaymentStatus::Paid),
            "overdue" => Ok(PaymentStatus::Overdue),
            other => Err(format!("Estado de pago desconocido: '{}'", other)),
        }
    }
}

/// Rental normalizado
///
/// Invariante: `end_time > start_time`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rental {
    pub id: i64,
    pub tractor_id: Option<i64>,
    pub customer_name: String,
    pub farm_location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub rental_type: RentalType,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
    /// Fecha de creación del registro en el store
    pub created_at: Option<DateTime<Utc>>,
}
