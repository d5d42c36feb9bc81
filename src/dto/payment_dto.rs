use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::models::payment::{Payment, TransactionStatus};
use crate::models::record::{datetime_to_store, decimal_to_store, LookupField, PaymentRecord};
use crate::utils::validation::{deserialize_optional_datetime, validate_non_negative_amount};

/// Request para registrar un pago
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePaymentRequest {
    pub rental_id: i64,

    #[validate(custom = "validate_non_negative_amount")]
    pub amount: Decimal,

    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub paid_date: Option<DateTime<Utc>>,

    #[validate(length(min = 2, max = 50))]
    pub method: String,

    pub status: Option<TransactionStatus>,
}

impl From<CreatePaymentRequest> for PaymentRecord {
    fn from(request: CreatePaymentRequest) -> Self {
        PaymentRecord {
            id: None,
            name: Some(format!("Pago alquiler {}", request.rental_id)),
            rental_id_c: Some(LookupField::Id(request.rental_id)),
            amount_c: decimal_to_store(request.amount),
            paid_date_c: request.paid_date.map(datetime_to_store),
            method_c: Some(request.method.trim().to_string()),
            status_c: Some(request.status.unwrap_or(TransactionStatus::Pending).as_str().to_string()),
        }
    }
}

/// Request para actualizar un pago
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePaymentRequest {
    #[validate(custom = "validate_non_negative_amount")]
    pub amount: Option<Decimal>,

    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub paid_date: Option<DateTime<Utc>>,

    #[validate(length(min = 2, max = 50))]
    pub method: Option<String>,

    pub status: Option<TransactionStatus>,
}

impl From<UpdatePaymentRequest> for PaymentRecord {
    fn from(request: UpdatePaymentRequest) -> Self {
        PaymentRecord {
            amount_c: request.amount.and_then(decimal_to_store),
            paid_date_c: request.paid_date.map(datetime_to_store),
            method_c: request.method.map(|method| method.trim().to_string()),
            status_c: request.status.map(|status| status.as_str().to_string()),
            ..Default::default()
        }
    }
}

/// Filtros del listado de pagos
#[derive(Debug, Default, Deserialize)]
pub struct PaymentFilters {
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Pago con el cliente del alquiler al que pertenece
#[derive(Debug, Clone, Serialize)]
pub struct PaymentListItem {
    #[serde(flatten)]
    pub payment: Payment,
    pub customer_name: Option<String>,
    pub farm_location: Option<String>,
}

/// Totales de la pantalla de pagos
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PaymentStats {
    pub total_amount: Decimal,
    pub pending_amount: Decimal,
    pub completed_payments: usize,
    pub pending_payments: usize,
}

#[derive(Debug, Serialize)]
pub struct PaymentListResponse {
    pub payments: Vec<PaymentListItem>,
    pub counts: BTreeMap<String, usize>,
    pub stats: PaymentStats,
}
