//! Services module
//! 
//! Este módulo contiene la lógica de negocio de la aplicación: la
//! calculadora de precios y el agregador de clientes (funciones puras),
//! la reserva sobre el record store, y los listados, panel y reportes.

pub mod booking_service;
pub mod customer_aggregator;
pub mod dashboard_service;
pub mod listing_service;
pub mod pricing_service;
pub mod report_service;

pub use booking_service::BookingService;
pub use customer_aggregator::aggregate_customers;
pub use pricing_service::{compute_quote, RentalQuote};
