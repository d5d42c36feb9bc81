//! Listados de las pantallas de gestión
//!
//! Búsqueda, filtro por estado, orden y conteos por pestaña sobre
//! entidades ya normalizadas. Los conteos se calculan sobre la lista
//! completa, antes de aplicar los filtros.

use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use crate::dto::payment_dto::{PaymentFilters, PaymentListItem, PaymentListResponse, PaymentStats};
use crate::dto::rental_dto::{RentalFilters, RentalListItem, RentalListResponse};
use crate::dto::tractor_dto::{TractorFilters, TractorListResponse};
use crate::models::payment::{Payment, TransactionStatus};
use crate::models::rental::{PaymentStatus, Rental};
use crate::models::tractor::{Tractor, TractorStatus};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::money::sum_amounts;
use crate::utils::validation::contains_ignore_case;

/// Pestaña que agrupa todos los estados
pub const ALL_LABEL: &str = "All";

/// Interpretar el filtro de estado (`All` o vacío = sin filtro)
pub fn parse_status_filter<S>(raw: Option<&str>) -> AppResult<Option<S>>
where
    S: FromStr<Err = String>,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case(ALL_LABEL) => Ok(None),
        Some(value) => value.parse::<S>().map(Some).map_err(AppError::BadRequest),
    }
}

fn search_term(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|term| !term.is_empty())
}

fn status_counts<'a>(labels: &[&str], statuses: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = labels.iter().map(|label| (label.to_string(), 0)).collect();
    let mut total = 0;
    for status in statuses {
        *counts.entry(status.to_string()).or_insert(0) += 1;
        total += 1;
    }
    counts.insert(ALL_LABEL.to_string(), total);
    counts
}

pub fn list_tractors(tractors: Vec<Tractor>, filters: &TractorFilters) -> AppResult<TractorListResponse> {
    let status = parse_status_filter::<TractorStatus>(filters.status.as_deref())?;
    let search = search_term(filters.search.as_deref());

    let labels: Vec<&str> = TractorStatus::ALL.iter().map(TractorStatus::as_str).collect();
    let counts = status_counts(&labels, tractors.iter().map(|t| t.status.as_str()));

    let tractors = tractors
        .into_iter()
        .filter(|t| status.map_or(true, |s| t.status == s))
        .filter(|t| {
            search.map_or(true, |term| {
                contains_ignore_case(&t.name, term) || contains_ignore_case(&t.number, term)
            })
        })
        .collect();

    Ok(TractorListResponse { tractors, counts })
}

pub fn list_rentals(
    rentals: Vec<Rental>,
    tractors: &[Tractor],
    filters: &RentalFilters,
) -> AppResult<RentalListResponse> {
    let status = parse_status_filter::<PaymentStatus>(filters.status.as_deref())?;
    let search = search_term(filters.search.as_deref());

    let labels: Vec<&str> = PaymentStatus::ALL.iter().map(PaymentStatus::as_str).collect();
    let counts = status_counts(&labels, rentals.iter().map(|r| r.payment_status.as_str()));

    let by_id: HashMap<i64, &Tractor> = tractors.iter().map(|t| (t.id, t)).collect();

    let mut items: Vec<RentalListItem> = rentals
        .into_iter()
        .filter(|r| status.map_or(true, |s| r.payment_status == s))
        .filter(|r| {
            search.map_or(true, |term| {
                contains_ignore_case(&r.customer_name, term) || contains_ignore_case(&r.farm_location, term)
            })
        })
        .map(|rental| {
            let tractor = rental.tractor_id.and_then(|id| by_id.get(&id));
            RentalListItem {
                tractor_name: tractor.map(|t| t.name.clone()),
                tractor_number: tractor.map(|t| t.number.clone()),
                rental,
            }
        })
        .collect();

    items.sort_by(|a, b| b.rental.start_time.cmp(&a.rental.start_time));

    Ok(RentalListResponse { rentals: items, counts })
}

/// Totales de pagos completados y pendientes
pub fn payment_stats(payments: &[Payment]) -> PaymentStats {
    payments.iter().fold(PaymentStats::default(), |mut stats, payment| {
        match payment.status {
            TransactionStatus::Completed => {
                stats.total_amount = stats.total_amount.saturating_add(payment.amount);
                stats.completed_payments += 1;
            }
            TransactionStatus::Pending => {
                stats.pending_amount = stats.pending_amount.saturating_add(payment.amount);
                stats.pending_payments += 1;
            }
            TransactionStatus::Failed => {}
        }
        stats
    })
}

pub fn list_payments(
    payments: Vec<Payment>,
    rentals: &[Rental],
    filters: &PaymentFilters,
) -> AppResult<PaymentListResponse> {
    let status = parse_status_filter::<TransactionStatus>(filters.status.as_deref())?;
    let search = search_term(filters.search.as_deref());

    let labels: Vec<&str> = TransactionStatus::ALL.iter().map(TransactionStatus::as_str).collect();
    let counts = status_counts(&labels, payments.iter().map(|p| p.status.as_str()));
    let stats = payment_stats(&payments);

    let by_id: HashMap<i64, &Rental> = rentals.iter().map(|r| (r.id, r)).collect();

    let mut items: Vec<PaymentListItem> = payments
        .into_iter()
        .filter(|p| status.map_or(true, |s| p.status == s))
        .map(|payment| {
            let rental = payment.rental_id.and_then(|id| by_id.get(&id));
            PaymentListItem {
                customer_name: rental.map(|r| r.customer_name.clone()),
                farm_location: rental.map(|r| r.farm_location.clone()),
                payment,
            }
        })
        .filter(|item| {
            search.map_or(true, |term| {
                item.customer_name
                    .as_deref()
                    .map_or(false, |name| contains_ignore_case(name, term))
                    || contains_ignore_case(&item.payment.method, term)
            })
        })
        .collect();

    // sin fecha al final
    items.sort_by(|a, b| b.payment.paid_date.cmp(&a.payment.paid_date));

    Ok(PaymentListResponse {
        payments: items,
        counts,
        stats,
    })
}

/// Importe pendiente de un conjunto de alquileres
pub fn outstanding_amount(rentals: &[Rental]) -> Decimal {
    sum_amounts(
        rentals
            .iter()
            .filter(|r| r.payment_status.is_outstanding())
            .map(|r| r.total_amount),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rental::RentalType;
    use chrono::{DateTime, TimeZone, Utc};

    fn tractor(id: i64, name: &str, number: &str, status: TractorStatus) -> Tractor {
        Tractor {
            id,
            name: name.to_string(),
            number: number.to_string(),
            status,
            hourly_rate: Decimal::new(150, 0),
            daily_rate: Decimal::new(1000, 0),
        }
    }

    fn at(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 8, 0, 0).unwrap()
    }

    fn rental(id: i64, tractor_id: i64, customer: &str, location: &str, day: u32, status: PaymentStatus) -> Rental {
        Rental {
            id,
            tractor_id: Some(tractor_id),
            customer_name: customer.to_string(),
            farm_location: location.to_string(),
            start_time: at(day),
            end_time: at(day + 1),
            rental_type: RentalType::Daily,
            total_amount: Decimal::new(1000, 0),
            payment_status: status,
            created_at: None,
        }
    }

    fn payment(id: i64, rental_id: i64, amount: i64, day: Option<u32>, method: &str, status: TransactionStatus) -> Payment {
        Payment {
            id,
            rental_id: Some(rental_id),
            amount: Decimal::new(amount, 0),
            paid_date: day.map(at),
            method: method.to_string(),
            status,
        }
    }

    #[test]
    fn test_parse_status_filter() {
        assert_eq!(parse_status_filter::<TractorStatus>(None).unwrap(), None);
        assert_eq!(parse_status_filter::<TractorStatus>(Some("All")).unwrap(), None);
        assert_eq!(
            parse_status_filter::<TractorStatus>(Some("On Rent")).unwrap(),
            Some(TractorStatus::OnRent)
        );
        assert!(matches!(
            parse_status_filter::<TractorStatus>(Some("Broken")),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_list_tractors_search_and_counts() {
        let tractors = vec![
            tractor(1, "Mahindra 575", "TR-01", TractorStatus::Available),
            tractor(2, "Swaraj 744", "TR-02", TractorStatus::OnRent),
            tractor(3, "John Deere 5050", "JD-50", TractorStatus::Available),
        ];
        let filters = TractorFilters {
            search: Some("tr-".to_string()),
            status: Some("Available".to_string()),
        };

        let response = list_tractors(tractors, &filters).unwrap();
        assert_eq!(response.tractors.len(), 1);
        assert_eq!(response.tractors[0].id, 1);
        assert_eq!(response.counts["All"], 3);
        assert_eq!(response.counts["Available"], 2);
        assert_eq!(response.counts["On Rent"], 1);
        assert_eq!(response.counts["Maintenance"], 0);
    }

    #[test]
    fn test_list_rentals_joins_tractor_and_sorts() {
        let tractors = vec![tractor(1, "Mahindra 575", "TR-01", TractorStatus::Available)];
        let rentals = vec![
            rental(1, 1, "Ramesh", "Green Valley", 2, PaymentStatus::Paid),
            rental(2, 1, "Suresh", "Hill Farm", 9, PaymentStatus::Pending),
            rental(3, 42, "Mahesh", "Green Acres", 5, PaymentStatus::Pending),
        ];

        let response = list_rentals(rentals, &tractors, &RentalFilters::default()).unwrap();
        let ids: Vec<i64> = response.rentals.iter().map(|item| item.rental.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(response.rentals[0].tractor_name.as_deref(), Some("Mahindra 575"));
        assert!(response.rentals[1].tractor_name.is_none());
        assert_eq!(response.counts["Pending"], 2);
        assert_eq!(response.counts["Overdue"], 0);
    }

    #[test]
    fn test_list_rentals_search_by_location() {
        let rentals = vec![
            rental(1, 1, "Ramesh", "Green Valley", 2, PaymentStatus::Paid),
            rental(2, 1, "Suresh", "Hill Farm", 9, PaymentStatus::Pending),
        ];
        let filters = RentalFilters {
            search: Some("GREEN".to_string()),
            status: None,
        };

        let response = list_rentals(rentals, &[], &filters).unwrap();
        assert_eq!(response.rentals.len(), 1);
        assert_eq!(response.rentals[0].rental.customer_name, "Ramesh");
    }

    #[test]
    fn test_list_payments_stats_and_order() {
        let rentals = vec![rental(1, 1, "Ramesh", "Green Valley", 2, PaymentStatus::Paid)];
        let payments = vec![
            payment(1, 1, 500, Some(3), "Cash", TransactionStatus::Completed),
            payment(2, 1, 300, None, "UPI", TransactionStatus::Pending),
            payment(3, 1, 700, Some(10), "Bank Transfer", TransactionStatus::Completed),
            payment(4, 1, 200, Some(5), "Cash", TransactionStatus::Failed),
        ];

        let response = list_payments(payments, &rentals, &PaymentFilters::default()).unwrap();
        let ids: Vec<i64> = response.payments.iter().map(|item| item.payment.id).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
        assert_eq!(response.payments[0].customer_name.as_deref(), Some("Ramesh"));

        assert_eq!(
            response.stats,
            PaymentStats {
                total_amount: Decimal::new(1200, 0),
                pending_amount: Decimal::new(300, 0),
                completed_payments: 2,
                pending_payments: 1,
            }
        );
        assert_eq!(response.counts["All"], 4);
        assert_eq!(response.counts["Failed"], 1);
    }

    #[test]
    fn test_list_payments_search_by_customer_or_method() {
        let rentals = vec![
            rental(1, 1, "Ramesh", "Green Valley", 2, PaymentStatus::Paid),
            rental(2, 1, "Suresh", "Hill Farm", 9, PaymentStatus::Pending),
        ];
        let payments = vec![
            payment(1, 1, 500, Some(3), "Cash", TransactionStatus::Completed),
            payment(2, 2, 300, Some(4), "UPI", TransactionStatus::Pending),
        ];

        let by_customer = PaymentFilters {
            search: Some("sure".to_string()),
            status: None,
        };
        let response = list_payments(payments.clone(), &rentals, &by_customer).unwrap();
        assert_eq!(response.payments.len(), 1);
        assert_eq!(response.payments[0].payment.id, 2);

        let by_method = PaymentFilters {
            search: Some("cash".to_string()),
            status: Some("Completed".to_string()),
        };
        let response = list_payments(payments, &rentals, &by_method).unwrap();
        assert_eq!(response.payments.len(), 1);
        assert_eq!(response.payments[0].payment.id, 1);
    }

    #[test]
    fn test_outstanding_amount() {
        let rentals = vec![
            rental(1, 1, "Ramesh", "Green Valley", 2, PaymentStatus::Pending),
            rental(2, 1, "Ramesh", "Green Valley", 3, PaymentStatus::Overdue),
            rental(3, 1, "Ramesh", "Green Valley", 4, PaymentStatus::Paid),
        ];
        assert_eq!(outstanding_amount(&rentals), Decimal::new(2000, 0));
    }
}
