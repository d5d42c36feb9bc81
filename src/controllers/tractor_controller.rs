use std::sync::Arc;
use validator::Validate;

use crate::clients::record_store::RecordStore;
use crate::dto::api_response::ApiResponse;
use crate::dto::rental_dto::CreateBookingRequest;
use crate::dto::tractor_dto::{
    CreateTractorRequest, QuoteRequest, QuoteResponse, TractorFilters, TractorListResponse, UpdateTractorRequest,
};
use crate::models::record::TractorRecord;
use crate::models::rental::Rental;
use crate::models::tractor::Tractor;
use crate::repositories::TractorRepository;
use crate::services::booking_service::BookingService;
use crate::services::listing_service::list_tractors;
use crate::utils::errors::{not_found_error, AppResult};

pub struct TractorController {
    repository: TractorRepository,
    booking: BookingService,
}

impl TractorController {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            repository: TractorRepository::new(store.clone()),
            booking: BookingService::new(store),
        }
    }

    pub async fn list(&self, filters: TractorFilters) -> AppResult<TractorListResponse> {
        let tractors = self.repository.find_all().await?;
        list_tractors(tractors, &filters)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Tractor> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Tractor", &id.to_string()))
    }

    pub async fn create(&self, request: CreateTractorRequest) -> AppResult<ApiResponse<Tractor>> {
        request.validate()?;

        let tractor = self.repository.create(TractorRecord::from(request)).await?;
        log::info!("🚜 Tractor {} creado ({})", tractor.id, tractor.name);

        Ok(ApiResponse::success_with_message(tractor, "Tractor creado exitosamente"))
    }

    pub async fn update(&self, id: i64, request: UpdateTractorRequest) -> AppResult<ApiResponse<Tractor>> {
        request.validate()?;

        let tractor = self.repository.update(id, TractorRecord::from(request)).await?;
        Ok(ApiResponse::success_with_message(tractor, "Tractor actualizado exitosamente"))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.delete(id).await?;
        log::info!("🗑️ Tractor {} eliminado", id);
        Ok(())
    }

    pub async fn quote(&self, id: i64, request: QuoteRequest) -> AppResult<QuoteResponse> {
        self.booking.quote(id, &request).await
    }

    pub async fn book(&self, id: i64, request: CreateBookingRequest) -> AppResult<ApiResponse<Rental>> {
        let rental = self.booking.book(id, request).await?;
        Ok(ApiResponse::success_with_message(rental, "Reserva creada exitosamente"))
    }
}
