//! Modelos del sistema
//!
//! Entidades del dominio (tractores, alquileres, pagos, resúmenes de
//! clientes) y la forma cruda de los registros del record store.

pub mod customer;
pub mod payment;
pub mod record;
pub mod rental;
pub mod tractor;

pub use customer::{CustomerOverview, CustomerStats, CustomerSummary};
pub use payment::{Payment, TransactionStatus};
pub use rental::{PaymentStatus, Rental, RentalType};
pub use tractor::{Tractor, TractorStatus};
