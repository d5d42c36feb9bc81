use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::tractor_controller::TractorController;
use crate::dto::api_response::ApiResponse;
use crate::dto::rental_dto::CreateBookingRequest;
use crate::dto::tractor_dto::{
    CreateTractorRequest, QuoteRequest, QuoteResponse, TractorFilters, TractorListResponse, UpdateTractorRequest,
};
use crate::models::rental::Rental;
use crate::models::tractor::Tractor;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_tractor_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tractors).post(create_tractor))
        .route("/:id", get(get_tractor).put(update_tractor).delete(delete_tractor))
        .route("/:id/quote", post(quote_rental))
        .route("/:id/bookings", post(book_tractor))
}

async fn list_tractors(
    State(state): State<AppState>,
    Query(filters): Query<TractorFilters>,
) -> Result<Json<TractorListResponse>, AppError> {
    let controller = TractorController::new(state.store.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn create_tractor(
    State(state): State<AppState>,
    Json(request): Json<CreateTractorRequest>,
) -> Result<Json<ApiResponse<Tractor>>, AppError> {
    let controller = TractorController::new(state.store.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_tractor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Tractor>, AppError> {
    let controller = TractorController::new(state.store.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_tractor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTractorRequest>,
) -> Result<Json<ApiResponse<Tractor>>, AppError> {
    let controller = TractorController::new(state.store.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_tractor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TractorController::new(state.store.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Tractor eliminado exitosamente")))
}

async fn quote_rental(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let controller = TractorController::new(state.store.clone());
    let response = controller.quote(id, request).await?;
    Ok(Json(response))
}

async fn book_tractor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<ApiResponse<Rental>>, AppError> {
    let controller = TractorController::new(state.store.clone());
    let response = controller.book(id, request).await?;
    Ok(Json(response))
}
