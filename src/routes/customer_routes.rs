use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;

use crate::controllers::customer_controller::CustomerController;
use crate::dto::customer_dto::CustomerRentalsResponse;
use crate::models::customer::CustomerOverview;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_customer_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers))
        .route("/:name/rentals", get(customer_rentals))
}

async fn list_customers(State(state): State<AppState>) -> Result<Json<CustomerOverview>, AppError> {
    let controller = CustomerController::new(state.store.clone());
    let response = controller.overview(Utc::now()).await?;
    Ok(Json(response))
}

async fn customer_rentals(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CustomerRentalsResponse>, AppError> {
    let controller = CustomerController::new(state.store.clone());
    let response = controller.rentals_for(&name).await?;
    Ok(Json(response))
}
