//! Middleware de la aplicación

pub mod cors;

pub use cors::cors_for;
