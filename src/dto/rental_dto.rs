use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::models::record::{datetime_to_store, decimal_to_store, LookupField, RentalRecord};
use crate::models::rental::{PaymentStatus, Rental, RentalType};
use crate::utils::validation::{
    deserialize_datetime, deserialize_optional_datetime, validate_non_negative_amount, validate_not_empty,
};

/// Request del formulario de reserva
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(length(max = 120), custom = "validate_not_empty")]
    pub customer_name: String,

    #[validate(length(max = 200), custom = "validate_not_empty")]
    pub farm_location: String,

    #[serde(deserialize_with = "deserialize_datetime")]
    pub start_date: DateTime<Utc>,

    #[serde(deserialize_with = "deserialize_datetime")]
    pub end_date: DateTime<Utc>,

    #[serde(default)]
    pub rental_type: RentalType,
}

/// Request para corregir un alquiler existente
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRentalRequest {
    pub tractor_id: Option<i64>,

    #[validate(length(max = 120), custom = "validate_not_empty")]
    pub customer_name: Option<String>,

    #[validate(length(max = 200), custom = "validate_not_empty")]
    pub farm_location: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub end_date: Option<DateTime<Utc>>,

    pub rental_type: Option<RentalType>,

    #[validate(custom = "validate_non_negative_amount")]
    pub total_amount: Option<Decimal>,

    pub payment_status: Option<PaymentStatus>,
}

impl From<UpdateRentalRequest> for RentalRecord {
    fn from(request: UpdateRentalRequest) -> Self {
        let customer_name = request.customer_name.map(|name| name.trim().to_string());
        RentalRecord {
            name: customer_name.clone(),
            tractor_id_c: request.tractor_id.map(LookupField::Id),
            customer_name_c: customer_name,
            farm_location_c: request.farm_location.map(|location| location.trim().to_string()),
            start_date_c: request.start_date.map(datetime_to_store),
            end_date_c: request.end_date.map(datetime_to_store),
            rental_type_c: request.rental_type.map(|rental_type| rental_type.as_str().to_string()),
            total_amount_c: request.total_amount.and_then(decimal_to_store),
            payment_status_c: request.payment_status.map(|status| status.as_str().to_string()),
            ..Default::default()
        }
    }
}

/// Filtros del listado de alquileres
#[derive(Debug, Default, Deserialize)]
pub struct RentalFilters {
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Alquiler con los datos del tractor para la tabla de registros
#[derive(Debug, Clone, Serialize)]
pub struct RentalListItem {
    #[serde(flatten)]
    pub rental: Rental,
    pub tractor_name: Option<String>,
    pub tractor_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RentalListResponse {
    pub rentals: Vec<RentalListItem>,
    pub counts: BTreeMap<String, usize>,
}
