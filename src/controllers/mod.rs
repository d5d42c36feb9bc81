//! Controladores
//!
//! Orquestan repositorios y servicios para cada recurso de la API.

pub mod customer_controller;
pub mod dashboard_controller;
pub mod payment_controller;
pub mod rental_controller;
pub mod report_controller;
pub mod tractor_controller;
