//! DTOs de la API
//!
//! Requests validados con `validator` y respuestas de los listados.

pub mod api_response;
pub mod customer_dto;
pub mod payment_dto;
pub mod rental_dto;
pub mod report_dto;
pub mod tractor_dto;

pub use api_response::ApiResponse;
