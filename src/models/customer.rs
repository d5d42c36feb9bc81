//! Modelos derivados de clientes
//!
//! No se persisten: se calculan a partir de la lista de alquileres.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Resumen por cliente
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerSummary {
    pub name: String,
    pub total_rentals: u32,
    pub total_amount: Decimal,
    pub locations: BTreeSet<String>,
    pub last_rental: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub is_new_this_month: bool,
    pub pending_payments: u32,
}

impl CustomerSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_rentals: 0,
            total_amount: Decimal::ZERO,
            locations: BTreeSet::new(),
            last_rental: None,
            is_active: false,
            is_new_this_month: false,
            pending_payments: 0,
        }
    }
}

/// Totales de clientes para las tarjetas del dashboard
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerStats {
    pub total: usize,
    pub active: usize,
    pub new_this_month: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerOverview {
    pub customers: Vec<CustomerSummary>,
    pub stats: CustomerStats,
}
