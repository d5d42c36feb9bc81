pub mod customer_routes;
pub mod dashboard_routes;
pub mod payment_routes;
pub mod rental_routes;
pub mod tractor_routes;
