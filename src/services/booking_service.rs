//! Servicio de reservas
//!
//! Valida el formulario, comprueba el tractor, cotiza con la calculadora y
//! crea el alquiler en estado `Pending`.

use std::sync::Arc;
use validator::Validate;

use crate::clients::record_store::RecordStore;
use crate::dto::rental_dto::CreateBookingRequest;
use crate::dto::tractor_dto::{QuoteRequest, QuoteResponse};
use crate::models::record::{datetime_to_store, decimal_to_store, LookupField, RentalRecord};
use crate::models::rental::{PaymentStatus, Rental};
use crate::models::tractor::Tractor;
use crate::repositories::{RentalRepository, TractorRepository};
use crate::services::pricing_service::compute_quote;
use crate::utils::errors::{not_found_error, AppError, AppResult};

#[derive(Clone)]
pub struct BookingService {
    tractors: TractorRepository,
    rentals: RentalRepository,
}

impl BookingService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            tractors: TractorRepository::new(store.clone()),
            rentals: RentalRepository::new(store),
        }
    }

    async fn load_tractor(&self, tractor_id: i64) -> AppResult<Tractor> {
        self.tractors
            .find_by_id(tractor_id)
            .await?
            .ok_or_else(|| not_found_error("Tractor", &tractor_id.to_string()))
    }

    /// Cotizar sin reservar (resumen del formulario)
    pub async fn quote(&self, tractor_id: i64, request: &QuoteRequest) -> AppResult<QuoteResponse> {
        let tractor = self.load_tractor(tractor_id).await?;
        let quote = compute_quote(&tractor, request.start_date, request.end_date, request.rental_type);
        Ok(QuoteResponse::new(&tractor, quote))
    }

    pub async fn book(&self, tractor_id: i64, request: CreateBookingRequest) -> AppResult<Rental> {
        request.validate()?;

        if request.end_date <= request.start_date {
            return Err(AppError::BadRequest(
                "La fecha de fin debe ser posterior a la fecha de inicio".to_string(),
            ));
        }

        let tractor = self.load_tractor(tractor_id).await?;
        if !tractor.is_available() {
            return Err(AppError::Conflict(format!(
                "El tractor {} no está disponible (estado: {})",
                tractor.name, tractor.status
            )));
        }

        let quote = compute_quote(&tractor, request.start_date, request.end_date, request.rental_type);
        if !quote.is_billable() {
            return Err(AppError::BadRequest(format!(
                "La reserva no tiene importe facturable ({} horas a {} por {})",
                quote.elapsed_hours,
                quote.rate,
                request.rental_type.as_str()
            )));
        }

        let customer_name = request.customer_name.trim().to_string();
        let record = RentalRecord {
            name: Some(customer_name.clone()),
            tractor_id_c: Some(LookupField::Id(tractor.id)),
            customer_name_c: Some(customer_name),
            farm_location_c: Some(request.farm_location.trim().to_string()),
            start_date_c: Some(datetime_to_store(request.start_date)),
            end_date_c: Some(datetime_to_store(request.end_date)),
            rental_type_c: Some(request.rental_type.as_str().to_string()),
            total_amount_c: decimal_to_store(quote.total_amount),
            payment_status_c: Some(PaymentStatus::Pending.as_str().to_string()),
            ..Default::default()
        };

        let rental = self.rentals.create(record).await?;
        log::info!(
            "🚜 Reserva {} creada: {} / {} por {}",
            rental.id,
            tractor.name,
            rental.customer_name,
            rental.total_amount
        );
        Ok(rental)
    }
}
