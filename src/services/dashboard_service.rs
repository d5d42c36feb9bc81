//! Indicadores del panel principal

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::rental::{PaymentStatus, Rental};
use crate::models::tractor::{Tractor, TractorStatus};
use crate::utils::money::sum_amounts;

const RECENT_RENTALS: usize = 5;
const FEATURED_TRACTORS: usize = 6;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_tractors: usize,
    pub available_tractors: usize,
    /// Porcentaje entero (0 sin tractores)
    pub availability_rate: u32,
    pub active_rentals: usize,
    pub today_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub stats: DashboardStats,
    pub available_tractors: Vec<Tractor>,
    pub recent_rentals: Vec<Rental>,
}

pub fn compute_dashboard_stats(tractors: &[Tractor], rentals: &[Rental], reference_now: DateTime<Utc>) -> DashboardStats {
    let total_tractors = tractors.len();
    let available_tractors = tractors
        .iter()
        .filter(|t| t.status == TractorStatus::Available)
        .count();

    let availability_rate = if total_tractors == 0 {
        0
    } else {
        ((available_tractors as f64 / total_tractors as f64) * 100.0).round() as u32
    };

    let today = reference_now.date_naive();
    let today_revenue = sum_amounts(
        rentals
            .iter()
            .filter(|r| r.start_time.date_naive() == today)
            .map(|r| r.total_amount),
    );

    DashboardStats {
        total_tractors,
        available_tractors,
        availability_rate,
        active_rentals: rentals
            .iter()
            .filter(|r| r.payment_status == PaymentStatus::Pending)
            .count(),
        today_revenue,
    }
}

/// Panel completo: indicadores, tractores disponibles y últimos alquileres
pub fn build_dashboard(tractors: Vec<Tractor>, mut rentals: Vec<Rental>, reference_now: DateTime<Utc>) -> DashboardOverview {
    let stats = compute_dashboard_stats(&tractors, &rentals, reference_now);

    rentals.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    rentals.truncate(RECENT_RENTALS);

    let available_tractors = tractors
        .into_iter()
        .filter(Tractor::is_available)
        .take(FEATURED_TRACTORS)
        .collect();

    DashboardOverview {
        stats,
        available_tractors,
        recent_rentals: rentals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rental::RentalType;
    use chrono::{Duration, TimeZone};

    fn tractor(id: i64, status: TractorStatus) -> Tractor {
        Tractor {
            id,
            name: format!("Tractor {}", id),
            number: format!("TR-{:02}", id),
            status,
            hourly_rate: Decimal::new(150, 0),
            daily_rate: Decimal::new(1000, 0),
        }
    }

    fn rental(id: i64, start: DateTime<Utc>, amount: i64, status: PaymentStatus) -> Rental {
        Rental {
            id,
            tractor_id: Some(1),
            customer_name: "Ramesh".to_string(),
            farm_location: "Green Valley".to_string(),
            start_time: start,
            end_time: start + Duration::hours(8),
            rental_type: RentalType::Hourly,
            total_amount: Decimal::new(amount, 0),
            payment_status: status,
            created_at: None,
        }
    }

    #[test]
    fn test_dashboard_stats() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 15, 0, 0).unwrap();
        let tractors = vec![
            tractor(1, TractorStatus::Available),
            tractor(2, TractorStatus::OnRent),
            tractor(3, TractorStatus::Available),
        ];
        let rentals = vec![
            rental(1, now - Duration::hours(9), 1200, PaymentStatus::Pending),
            rental(2, now - Duration::days(1), 800, PaymentStatus::Pending),
            rental(3, now - Duration::hours(2), 300, PaymentStatus::Paid),
        ];

        let stats = compute_dashboard_stats(&tractors, &rentals, now);
        assert_eq!(stats.total_tractors, 3);
        assert_eq!(stats.available_tractors, 2);
        assert_eq!(stats.availability_rate, 67);
        assert_eq!(stats.active_rentals, 2);
        assert_eq!(stats.today_revenue, Decimal::new(1500, 0));
    }

    #[test]
    fn test_empty_fleet_has_zero_rate() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 15, 0, 0).unwrap();
        let stats = compute_dashboard_stats(&[], &[], now);
        assert_eq!(stats.availability_rate, 0);
        assert_eq!(stats.today_revenue, Decimal::ZERO);
    }

    #[test]
    fn test_build_dashboard_limits_lists() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 15, 0, 0).unwrap();
        let tractors: Vec<Tractor> = (1..=8).map(|id| tractor(id, TractorStatus::Available)).collect();
        let rentals: Vec<Rental> = (1..=7)
            .map(|id| rental(id, now - Duration::days(id), 100, PaymentStatus::Paid))
            .collect();

        let overview = build_dashboard(tractors, rentals, now);
        assert_eq!(overview.available_tractors.len(), 6);
        assert_eq!(overview.recent_rentals.len(), 5);
        assert_eq!(overview.recent_rentals[0].id, 1);
        assert_eq!(overview.stats.total_tractors, 8);
    }
}
