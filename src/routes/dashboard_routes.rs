use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;

use crate::controllers::dashboard_controller::DashboardController;
use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::ReportQuery;
use crate::services::dashboard_service::DashboardOverview;
use crate::services::report_service::Report;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/reports", get(get_report))
}

async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardOverview>, AppError> {
    let controller = DashboardController::new(state.store.clone());
    let response = controller.overview(Utc::now()).await?;
    Ok(Json(response))
}

async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Report>, AppError> {
    let controller = ReportController::new(state.store.clone());
    let response = controller.report(query.range, Utc::now()).await?;
    Ok(Json(response))
}
