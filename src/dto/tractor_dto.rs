use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::models::record::{decimal_to_store, TractorRecord};
use crate::models::rental::RentalType;
use crate::models::tractor::{Tractor, TractorStatus};
use crate::services::pricing_service::RentalQuote;
use crate::utils::validation::{deserialize_datetime, validate_non_negative_amount, validate_not_empty};

/// Request para dar de alta un tractor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTractorRequest {
    #[validate(length(min = 2, max = 100), custom = "validate_not_empty")]
    pub name: String,

    #[validate(length(min = 1, max = 30))]
    pub number: String,

    pub status: Option<TractorStatus>,

    #[validate(custom = "validate_non_negative_amount")]
    pub hourly_rate: Decimal,

    #[validate(custom = "validate_non_negative_amount")]
    pub daily_rate: Decimal,
}

/// Request para actualizar un tractor existente
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTractorRequest {
    #[validate(length(min = 2, max = 100), custom = "validate_not_empty")]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 30))]
    pub number: Option<String>,

    pub status: Option<TractorStatus>,

    #[validate(custom = "validate_non_negative_amount")]
    pub hourly_rate: Option<Decimal>,

    #[validate(custom = "validate_non_negative_amount")]
    pub daily_rate: Option<Decimal>,
}

impl From<CreateTractorRequest> for TractorRecord {
    fn from(request: CreateTractorRequest) -> Self {
        TractorRecord {
            id: None,
            name: Some(request.name.trim().to_string()),
            number_c: Some(request.number.trim().to_string()),
            status_c: Some(request.status.unwrap_or(TractorStatus::Available).as_str().to_string()),
            hourly_rate_c: decimal_to_store(request.hourly_rate),
            daily_rate_c: decimal_to_store(request.daily_rate),
        }
    }
}

impl From<UpdateTractorRequest> for TractorRecord {
    fn from(request: UpdateTractorRequest) -> Self {
        TractorRecord {
            id: None,
            name: request.name.map(|name| name.trim().to_string()),
            number_c: request.number.map(|number| number.trim().to_string()),
            status_c: request.status.map(|status| status.as_str().to_string()),
            hourly_rate_c: request.hourly_rate.and_then(decimal_to_store),
            daily_rate_c: request.daily_rate.and_then(decimal_to_store),
        }
    }
}

/// Filtros del listado de tractores
#[derive(Debug, Default, Deserialize)]
pub struct TractorFilters {
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Response del listado de tractores
#[derive(Debug, Serialize)]
pub struct TractorListResponse {
    pub tractors: Vec<Tractor>,
    pub counts: BTreeMap<String, usize>,
}

/// Request de cotización (la misma ventana que usa la reserva)
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(deserialize_with = "deserialize_datetime")]
    pub start_date: DateTime<Utc>,

    #[serde(deserialize_with = "deserialize_datetime")]
    pub end_date: DateTime<Utc>,

    #[serde(default)]
    pub rental_type: RentalType,
}

/// Response de cotización
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub tractor_id: i64,
    pub tractor_name: String,
    #[serde(flatten)]
    pub quote: RentalQuote,
    pub billable: bool,
}

impl QuoteResponse {
    pub fn new(tractor: &Tractor, quote: RentalQuote) -> Self {
        Self {
            tractor_id: tractor.id,
            tractor_name: tractor.name.clone(),
            billable: quote.is_billable(),
            quote,
        }
    }
}
