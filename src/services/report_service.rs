//! Reportes de ingresos y utilización
//!
//! Los rangos se resuelven contra el reloj recibido en una ventana UTC
//! semiabierta `[start, end)` alineada a meses calendario.

use chrono::{DateTime, Datelike, Duration, Months, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::payment::{Payment, TransactionStatus};
use crate::models::rental::Rental;
use crate::models::tractor::Tractor;
use crate::utils::money::sum_amounts;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ReportRange {
    #[default]
    ThisMonth,
    LastMonth,
    Last3Months,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

fn month_start(instant: DateTime<Utc>) -> DateTime<Utc> {
    let date = instant.date_naive();
    let first = date - Duration::days(i64::from(date.day0()));
    Utc.from_utc_datetime(&first.and_time(NaiveTime::MIN))
}

impl ReportRange {
    pub fn window(&self, reference_now: DateTime<Utc>) -> ReportWindow {
        let current = month_start(reference_now);
        let next = current
            .checked_add_months(Months::new(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let months_back = |n: u32| current.checked_sub_months(Months::new(n)).unwrap_or(DateTime::<Utc>::MIN_UTC);

        match self {
            ReportRange::ThisMonth => ReportWindow { start: current, end: next },
            ReportRange::LastMonth => ReportWindow {
                start: months_back(1),
                end: current,
            },
            ReportRange::Last3Months => ReportWindow {
                start: months_back(2),
                end: next,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TractorUtilization {
    pub tractor_id: i64,
    pub name: String,
    pub revenue: Decimal,
    pub bookings: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportSummary {
    pub total_revenue: Decimal,
    pub total_bookings: usize,
    pub average_booking_value: Decimal,
    pub utilization_rate: Decimal,
}

/// Contadores rápidos del lateral del reporte
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportQuickStats {
    pub total_tractors: usize,
    pub rentals_in_range: usize,
    pub completed_payments: usize,
    pub pending_payments: usize,
    /// Pagos completados sobre todos los pagos, en porcentaje entero
    pub collection_rate: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub range: ReportRange,
    pub window: ReportWindow,
    pub revenue_by_month: Vec<MonthlyRevenue>,
    pub tractor_utilization: Vec<TractorUtilization>,
    pub summary: ReportSummary,
    pub quick_stats: ReportQuickStats,
}

fn paid_in<'a>(payments: &'a [Payment], window: &'a ReportWindow) -> impl Iterator<Item = (&'a Payment, DateTime<Utc>)> + 'a {
    payments
        .iter()
        .filter_map(|p| p.paid_date.map(|date| (p, date)))
        .filter(move |(_, date)| window.contains(*date))
}

pub fn revenue_by_month(payments: &[Payment], window: &ReportWindow) -> Vec<MonthlyRevenue> {
    let mut months: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for (payment, date) in paid_in(payments, window) {
        if payment.status == TransactionStatus::Completed {
            let revenue = months.entry((date.year(), date.month())).or_insert(Decimal::ZERO);
            *revenue = revenue.saturating_add(payment.amount);
        }
    }

    months
        .into_iter()
        .filter_map(|((year, month), revenue)| {
            let label = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()?.format("%b %Y");
            Some(MonthlyRevenue {
                month: label.to_string(),
                revenue,
            })
        })
        .collect()
}

pub fn tractor_utilization(tractors: &[Tractor], rentals: &[Rental], window: &ReportWindow) -> Vec<TractorUtilization> {
    let mut utilization: Vec<TractorUtilization> = tractors
        .iter()
        .map(|tractor| {
            let booked: Vec<&Rental> = rentals
                .iter()
                .filter(|r| r.tractor_id == Some(tractor.id) && window.contains(r.start_time))
                .collect();
            TractorUtilization {
                tractor_id: tractor.id,
                name: tractor.name.clone(),
                revenue: sum_amounts(booked.iter().map(|r| r.total_amount)),
                bookings: booked.len(),
            }
        })
        .collect();

    utilization.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    utilization
}

pub fn build_report(
    range: ReportRange,
    tractors: &[Tractor],
    rentals: &[Rental],
    payments: &[Payment],
    reference_now: DateTime<Utc>,
) -> Report {
    let window = range.window(reference_now);
    let hundred = Decimal::ONE_HUNDRED;

    let total_revenue = sum_amounts(
        paid_in(payments, &window)
            .filter(|(p, _)| p.status == TransactionStatus::Completed)
            .map(|(p, _)| p.amount),
    );
    let total_bookings = rentals.iter().filter(|r| window.contains(r.start_time)).count();

    let average_booking_value = if total_bookings == 0 {
        Decimal::ZERO
    } else {
        (total_revenue / Decimal::from(total_bookings)).round_dp(2)
    };
    let utilization_rate = if tractors.is_empty() {
        Decimal::ZERO
    } else {
        (Decimal::from(total_bookings) / Decimal::from(tractors.len()) * hundred).round_dp(2)
    };

    let completed_payments = paid_in(payments, &window)
        .filter(|(p, _)| p.status == TransactionStatus::Completed)
        .count();
    let pending_payments = paid_in(payments, &window)
        .filter(|(p, _)| p.status == TransactionStatus::Pending)
        .count();
    let collection_rate = if payments.is_empty() {
        0
    } else {
        let completed = payments
            .iter()
            .filter(|p| p.status == TransactionStatus::Completed)
            .count();
        ((completed as f64 / payments.len() as f64) * 100.0).round() as u32
    };

    Report {
        range,
        window,
        revenue_by_month: revenue_by_month(payments, &window),
        tractor_utilization: tractor_utilization(tractors, rentals, &window),
        summary: ReportSummary {
            total_revenue: total_revenue.round_dp(2),
            total_bookings,
            average_booking_value,
            utilization_rate,
        },
        quick_stats: ReportQuickStats {
            total_tractors: tractors.len(),
            rentals_in_range: total_bookings,
            completed_payments,
            pending_payments,
            collection_rate,
        },
    }
}
