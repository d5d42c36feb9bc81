use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::payment_controller::PaymentController;
use crate::dto::api_response::ApiResponse;
use crate::dto::payment_dto::{CreatePaymentRequest, PaymentFilters, PaymentListResponse, UpdatePaymentRequest};
use crate::models::payment::Payment;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_payment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/:id", get(get_payment).put(update_payment).delete(delete_payment))
}

async fn list_payments(
    State(state): State<AppState>,
    Query(filters): Query<PaymentFilters>,
) -> Result<Json<PaymentListResponse>, AppError> {
    let controller = PaymentController::new(state.store.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<ApiResponse<Payment>>, AppError> {
    let controller = PaymentController::new(state.store.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Payment>, AppError> {
    let controller = PaymentController::new(state.store.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<Json<ApiResponse<Payment>>, AppError> {
    let controller = PaymentController::new(state.store.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = PaymentController::new(state.store.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Pago eliminado exitosamente")))
}
