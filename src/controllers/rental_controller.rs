use std::sync::Arc;
use validator::Validate;

use crate::clients::record_store::RecordStore;
use crate::dto::api_response::ApiResponse;
use crate::dto::rental_dto::{RentalFilters, RentalListResponse, UpdateRentalRequest};
use crate::models::record::RentalRecord;
use crate::models::rental::Rental;
use crate::repositories::{RentalRepository, TractorRepository};
use crate::services::listing_service::list_rentals;
use crate::utils::errors::{bad_request_error, not_found_error, AppResult};

pub struct RentalController {
    rentals: RentalRepository,
    tractors: TractorRepository,
}

impl RentalController {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            rentals: RentalRepository::new(store.clone()),
            tractors: TractorRepository::new(store),
        }
    }

    pub async fn list(&self, filters: RentalFilters) -> AppResult<RentalListResponse> {
        let (rentals, tractors) = futures::try_join!(self.rentals.find_all(), self.tractors.find_all())?;
        list_rentals(rentals, &tractors, &filters)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Rental> {
        self.rentals
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Alquiler", &id.to_string()))
    }

    pub async fn update(&self, id: i64, request: UpdateRentalRequest) -> AppResult<ApiResponse<Rental>> {
        request.validate()?;

        // La ventana resultante debe seguir siendo válida
        if request.start_date.is_some() || request.end_date.is_some() {
            let current = self.get_by_id(id).await?;
            let start = request.start_date.unwrap_or(current.start_time);
            let end = request.end_date.unwrap_or(current.end_time);
            if end <= start {
                return Err(bad_request_error(
                    "La fecha de fin debe ser posterior a la fecha de inicio",
                ));
            }
        }

        if let Some(tractor_id) = request.tractor_id {
            if self.tractors.find_by_id(tractor_id).await?.is_none() {
                return Err(not_found_error("Tractor", &tractor_id.to_string()));
            }
        }

        let rental = self.rentals.update(id, RentalRecord::from(request)).await?;
        Ok(ApiResponse::success_with_message(rental, "Alquiler actualizado exitosamente"))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.rentals.delete(id).await?;
        log::info!("🗑️ Alquiler {} eliminado", id);
        Ok(())
    }
}
