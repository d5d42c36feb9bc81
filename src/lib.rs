//! Backend del dashboard de alquiler de tractores
//!
//! Inventario de la flota, reservas con cotización, pagos, clientes
//! derivados de los alquileres y reportes, sobre un record store remoto.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use middleware::cors::cors_for;
use state::AppState;

/// Construir el router completo de la API
pub fn create_app(state: AppState) -> Router {
    let cors = cors_for(&state.config);

    Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/tractors", routes::tractor_routes::create_tractor_router())
        .nest("/api/rentals", routes::rental_routes::create_rental_router())
        .nest("/api/payments", routes::payment_routes::create_payment_router())
        .nest("/api/customers", routes::customer_routes::create_customer_router())
        .nest("/api", routes::dashboard_routes::create_dashboard_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "¡API de alquiler de tractores funcionando correctamente!",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
