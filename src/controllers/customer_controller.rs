use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::clients::record_store::RecordStore;
use crate::dto::customer_dto::CustomerRentalsResponse;
use crate::models::customer::CustomerOverview;
use crate::repositories::RentalRepository;
use crate::services::customer_aggregator::aggregate_customers;
use crate::services::listing_service::outstanding_amount;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::money::sum_amounts;

pub struct CustomerController {
    rentals: RentalRepository,
}

impl CustomerController {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            rentals: RentalRepository::new(store),
        }
    }

    pub async fn overview(&self, reference_now: DateTime<Utc>) -> AppResult<CustomerOverview> {
        let rentals = self.rentals.find_all().await?;
        let overview = aggregate_customers(&rentals, reference_now);
        log::debug!(
            "👥 {} clientes agregados de {} alquileres",
            overview.stats.total,
            rentals.len()
        );
        Ok(overview)
    }

    /// Historial de un cliente (nombre exacto)
    pub async fn rentals_for(&self, customer_name: &str) -> AppResult<CustomerRentalsResponse> {
        let mut rentals = self.rentals.find_by_customer(customer_name).await?;
        if rentals.is_empty() {
            return Err(not_found_error("Cliente", customer_name));
        }

        rentals.sort_by(|a, b| b.start_time.cmp(&a.start_time));

        Ok(CustomerRentalsResponse {
            customer_name: customer_name.to_string(),
            total_amount: sum_amounts(rentals.iter().map(|r| r.total_amount)),
            outstanding_amount: outstanding_amount(&rentals),
            rentals,
        })
    }
}
