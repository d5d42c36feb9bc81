use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::rental::Rental;

/// Historial de un cliente
#[derive(Debug, Serialize)]
pub struct CustomerRentalsResponse {
    pub customer_name: String,
    pub rentals: Vec<Rental>,
    pub total_amount: Decimal,
    pub outstanding_amount: Decimal,
}
