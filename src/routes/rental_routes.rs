use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::rental_controller::RentalController;
use crate::dto::api_response::ApiResponse;
use crate::dto::rental_dto::{RentalFilters, RentalListResponse, UpdateRentalRequest};
use crate::models::rental::Rental;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_rental_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rentals))
        .route("/:id", get(get_rental).put(update_rental).delete(delete_rental))
}

async fn list_rentals(
    State(state): State<AppState>,
    Query(filters): Query<RentalFilters>,
) -> Result<Json<RentalListResponse>, AppError> {
    let controller = RentalController::new(state.store.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_rental(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Rental>, AppError> {
    let controller = RentalController::new(state.store.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_rental(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRentalRequest>,
) -> Result<Json<ApiResponse<Rental>>, AppError> {
    let controller = RentalController::new(state.store.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_rental(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = RentalController::new(state.store.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Alquiler eliminado exitosamente")))
}
