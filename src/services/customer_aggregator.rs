//! Agregador de clientes
//!
//! Deriva los resúmenes por cliente a partir de la lista plana de
//! alquileres. Agrupa por el nombre exacto del cliente (sensible a
//! mayúsculas, sin normalizar). El reloj se recibe como argumento.

use chrono::{DateTime, Datelike, Months, Utc};
use std::collections::BTreeMap;

use crate::models::customer::{CustomerOverview, CustomerStats, CustomerSummary};
use crate::models::rental::Rental;

/// Meses hacia atrás que cuentan como actividad reciente
pub const ACTIVITY_WINDOW_MONTHS: u32 = 6;

/// Límite de actividad: un alquiler cuenta si empieza estrictamente después
pub fn activity_cutoff(reference_now: DateTime<Utc>) -> DateTime<Utc> {
    reference_now
        .checked_sub_months(Months::new(ACTIVITY_WINDOW_MONTHS))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn same_calendar_month(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub fn aggregate_customers(rentals: &[Rental], reference_now: DateTime<Utc>) -> CustomerOverview {
    let cutoff = activity_cutoff(reference_now);
    let mut groups: BTreeMap<&str, CustomerSummary> = BTreeMap::new();

    for rental in rentals {
        if rental.customer_name.is_empty() {
            continue;
        }

        let summary = groups
            .entry(rental.customer_name.as_str())
            .or_insert_with(|| CustomerSummary::new(&rental.customer_name));

        summary.total_rentals += 1;
        summary.total_amount = summary.total_amount.saturating_add(rental.total_amount);

        if !rental.farm_location.is_empty() {
            summary.locations.insert(rental.farm_location.clone());
        }

        if rental.payment_status.is_outstanding() {
            summary.pending_payments += 1;
        }

        if summary.last_rental.map_or(true, |last| rental.start_time > last) {
            summary.last_rental = Some(rental.start_time);
        }

        if rental.start_time > cutoff {
            summary.is_active = true;
        }

        if rental
            .created_at
            .map_or(false, |created| same_calendar_month(created, reference_now))
        {
            summary.is_new_this_month = true;
        }
    }

    let customers: Vec<CustomerSummary> = groups.into_values().collect();
    let stats = CustomerStats {
        total: customers.len(),
        active: customers.iter().filter(|c| c.is_active).count(),
        new_this_month: customers.iter().filter(|c| c.is_new_this_month).count(),
    };

    CustomerOverview { customers, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rental::{PaymentStatus, RentalType};
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 15, 12, 0, 0).unwrap()
    }

    fn rental(id: i64, customer: &str, start: DateTime<Utc>, amount: i64, status: PaymentStatus) -> Rental {
        Rental {
            id,
            tractor_id: Some(1),
            customer_name: customer.to_string(),
            farm_location: format!("Farm {}", id),
            start_time: start,
            end_time: start + Duration::hours(8),
            rental_type: RentalType::Hourly,
            total_amount: Decimal::from(amount),
            payment_status: status,
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()),
        }
    }

    fn find<'a>(overview: &'a CustomerOverview, name: &str) -> &'a CustomerSummary {
        overview.customers.iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn test_identical_names_merge() {
        let start = now() - Duration::days(10);
        let rentals = vec![
            rental(1, "Ramesh Patel", start, 2500, PaymentStatus::Paid),
            rental(2, "Ramesh Patel", start + Duration::days(2), 4000, PaymentStatus::Paid),
        ];

        let overview = aggregate_customers(&rentals, now());
        assert_eq!(overview.stats.total, 1);
        let ramesh = find(&overview, "Ramesh Patel");
        assert_eq!(ramesh.total_rentals, 2);
        assert_eq!(ramesh.total_amount, Decimal::from(6500));
        assert_eq!(ramesh.locations.len(), 2);
        assert_eq!(ramesh.last_rental, Some(start + Duration::days(2)));
    }

    #[test]
    fn test_grouping_is_case_sensitive() {
        let start = now() - Duration::days(1);
        let rentals = vec![
            rental(1, "Ramesh Patel", start, 100, PaymentStatus::Paid),
            rental(2, "ramesh patel", start, 100, PaymentStatus::Paid),
        ];
        assert_eq!(aggregate_customers(&rentals, now()).stats.total, 2);
    }

    #[test]
    fn test_activity_window_boundary() {
        let six_months_ago = Utc.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap();
        assert_eq!(activity_cutoff(now()), six_months_ago);

        let rentals = vec![
            rental(1, "Inactive", six_months_ago - Duration::days(1), 100, PaymentStatus::Paid),
            rental(2, "Active", six_months_ago + Duration::days(1), 100, PaymentStatus::Paid),
            rental(3, "AtCutoff", six_months_ago, 100, PaymentStatus::Paid),
        ];
        let overview = aggregate_customers(&rentals, now());

        assert!(!find(&overview, "Inactive").is_active);
        assert!(find(&overview, "Active").is_active);
        assert!(!find(&overview, "AtCutoff").is_active);
        assert_eq!(overview.stats.active, 1);
    }

    #[test]
    fn test_pending_and_overdue_count_as_pending() {
        let start = now() - Duration::days(3);
        let rentals = vec![
            rental(1, "Suresh Kumar", start, 100, PaymentStatus::Pending),
            rental(2, "Suresh Kumar", start, 100, PaymentStatus::Overdue),
            rental(3, "Suresh Kumar", start, 100, PaymentStatus::Partial),
            rental(4, "Suresh Kumar", start, 100, PaymentStatus::Paid),
        ];
        let overview = aggregate_customers(&rentals, now());
        assert_eq!(find(&overview, "Suresh Kumar").pending_payments, 2);
    }

    #[test]
    fn test_new_this_month_uses_creation_timestamp() {
        let mut fresh = rental(1, "New Farmer", now() - Duration::days(40), 100, PaymentStatus::Paid);
        fresh.created_at = Some(Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap());
        let mut last_year = rental(2, "Old Farmer", now(), 100, PaymentStatus::Paid);
        last_year.created_at = Some(Utc.with_ymd_and_hms(2023, 8, 20, 0, 0, 0).unwrap());
        let mut unknown = rental(3, "Unknown", now(), 100, PaymentStatus::Paid);
        unknown.created_at = None;

        let overview = aggregate_customers(&[fresh, last_year, unknown], now());
        assert!(find(&overview, "New Farmer").is_new_this_month);
        assert!(!find(&overview, "Old Farmer").is_new_this_month);
        assert!(!find(&overview, "Unknown").is_new_this_month);
        assert_eq!(overview.stats.new_this_month, 1);
    }

    #[test]
    fn test_blank_names_are_skipped_and_locations_deduplicated() {
        let start = now() - Duration::days(3);
        let mut a = rental(1, "Lakshmi", start, 100, PaymentStatus::Paid);
        let mut b = rental(2, "Lakshmi", start, 100, PaymentStatus::Paid);
        a.farm_location = "Nashik".to_string();
        b.farm_location = "Nashik".to_string();
        let blank = rental(3, "", start, 999, PaymentStatus::Pending);

        let overview = aggregate_customers(&[a, b, blank], now());
        assert_eq!(overview.stats.total, 1);
        assert_eq!(find(&overview, "Lakshmi").locations.len(), 1);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let start = now() - Duration::days(5);
        let rentals = vec![
            rental(1, "B Farmer", start, 300, PaymentStatus::Pending),
            rental(2, "A Farmer", start, 200, PaymentStatus::Paid),
            rental(3, "B Farmer", start, 100, PaymentStatus::Overdue),
        ];
        let snapshot = rentals.clone();

        let first = aggregate_customers(&rentals, now());
        let second = aggregate_customers(&rentals, now());
        assert_eq!(first, second);
        assert_eq!(rentals, snapshot);
    }

    #[test]
    fn test_huge_totals_saturate() {
        let start = now() - Duration::days(2);
        let mut a = rental(1, "Ramesh Patel", start, 0, PaymentStatus::Paid);
        let mut b = rental(2, "Ramesh Patel", start, 0, PaymentStatus::Paid);
        a.total_amount = Decimal::MAX;
        b.total_amount = Decimal::MAX;

        let overview = aggregate_customers(&[a, b], now());
        assert_eq!(find(&overview, "Ramesh Patel").total_amount, Decimal::MAX);
    }

    #[test]
    fn test_empty_input() {
        let overview = aggregate_customers(&[], now());
        assert!(overview.customers.is_empty());
        assert_eq!(overview.stats, CustomerStats::default());
    }
}
