use std::sync::Arc;
use validator::Validate;

use crate::clients::record_store::RecordStore;
use crate::dto::api_response::ApiResponse;
use crate::dto::payment_dto::{CreatePaymentRequest, PaymentFilters, PaymentListResponse, UpdatePaymentRequest};
use crate::models::payment::Payment;
use crate::models::record::PaymentRecord;
use crate::repositories::{PaymentRepository, RentalRepository};
use crate::services::listing_service::list_payments;
use crate::utils::errors::{not_found_error, AppResult};

pub struct PaymentController {
    payments: PaymentRepository,
    rentals: RentalRepository,
}

impl PaymentController {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            payments: PaymentRepository::new(store.clone()),
            rentals: RentalRepository::new(store),
        }
    }

    pub async fn list(&self, filters: PaymentFilters) -> AppResult<PaymentListResponse> {
        let (payments, rentals) = futures::try_join!(self.payments.find_all(), self.rentals.find_all())?;
        list_payments(payments, &rentals, &filters)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Payment> {
        self.payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Pago", &id.to_string()))
    }

    pub async fn create(&self, request: CreatePaymentRequest) -> AppResult<ApiResponse<Payment>> {
        request.validate()?;

        // El pago debe referenciar un alquiler existente
        if self.rentals.find_by_id(request.rental_id).await?.is_none() {
            return Err(not_found_error("Alquiler", &request.rental_id.to_string()));
        }

        let payment = self.payments.create(PaymentRecord::from(request)).await?;
        log::info!("💰 Pago {} registrado por {}", payment.id, payment.amount);

        Ok(ApiResponse::success_with_message(payment, "Pago registrado exitosamente"))
    }

    pub async fn update(&self, id: i64, request: UpdatePaymentRequest) -> AppResult<ApiResponse<Payment>> {
        request.validate()?;

        let payment = self.payments.update(id, PaymentRecord::from(request)).await?;
        Ok(ApiResponse::success_with_message(payment, "Pago actualizado exitosamente"))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.payments.delete(id).await?;
        log::info!("🗑️ Pago {} eliminado", id);
        Ok(())
    }
}
