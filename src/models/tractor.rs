//! Modelo de Tractor
//!
//! Este módulo contiene el struct Tractor (flota) y su estado.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::rental::RentalType;

/// Estado del tractor en la flota
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TractorStatus {
    Available,
    #[serde(rename = "On Rent", alias = "OnRent")]
    OnRent,
    Maintenance,
}

impl TractorStatus {
    pub const ALL: [TractorStatus; 3] = [
        TractorStatus::Available,
        TractorStatus::OnRent,
        TractorStatus::Maintenance,
    ];

    /// Valor tal como se guarda en el record store
    pub fn as_str(&self) -> &'static str {
        match self {
            TractorStatus::Available => "Available",
            TractorStatus::OnRent => "On Rent",
            TractorStatus::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for TractorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TractorStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().replace(['_', ' '], "").as_str() {
            "available" => Ok(TractorStatus::Available),
            "onrent" => Ok(TractorStatus::OnRent),
            "maintenance" => Ok(TractorStatus::Maintenance),
            other => Err(format!("Estado de tractor desconocido: '{}'", other)),
        }
    }
}

/// Tractor de la flota con su tarifa
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tractor {
    pub id: i64,
    pub name: String,
    /// Número de activo (placa interna)
    pub number: String,
    pub status: TractorStatus,
    pub hourly_rate: Decimal,
    pub daily_rate: Decimal,
}

impl Tractor {
    /// Tarifa aplicable según el tipo de alquiler
    pub fn rate_for(&self, rental_type: RentalType) -> Decimal {
        match rental_type {
            RentalType::Daily => self.daily_rate,
            RentalType::Hourly => self.hourly_rate,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == TractorStatus::Available
    }
}
