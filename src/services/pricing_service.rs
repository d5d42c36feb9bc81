//! Calculadora de precio y duración de alquileres
//!
//! Función pura: tarifa del tractor + ventana de tiempo + tipo de alquiler
//! -> unidades facturables y total. Las horas transcurridas se truncan hacia
//! cero (5h59m son 5 horas); una ventana degenerada o menor a una hora
//! devuelve ceros y el llamador no debe permitir el envío. Un total que no
//! cabe en un `Decimal` también se cotiza en cero.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::rental::RentalType;
use crate::models::tractor::Tractor;
use crate::utils::money::checked_total;

const HOURS_PER_DAY: i64 = 24;

/// Resultado de la cotización
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RentalQuote {
    pub rental_type: RentalType,
    pub elapsed_hours: i64,
    /// Días (Daily) u horas (Hourly) facturables
    pub duration_units: i64,
    pub rate: Decimal,
    pub total_amount: Decimal,
}

impl RentalQuote {
    /// Un total en cero bloquea la reserva
    pub fn is_billable(&self) -> bool {
        self.total_amount > Decimal::ZERO
    }
}

/// Horas completas entre inicio y fin (truncadas hacia cero)
pub fn elapsed_whole_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_hours()
}

pub fn compute_quote(
    tractor: &Tractor,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rental_type: RentalType,
) -> RentalQuote {
    let rate = tractor.rate_for(rental_type);
    let elapsed_hours = elapsed_whole_hours(start, end);

    if elapsed_hours <= 0 {
        return RentalQuote {
            rental_type,
            elapsed_hours: 0,
            duration_units: 0,
            rate,
            total_amount: Decimal::ZERO,
        };
    }

    let duration_units = match rental_type {
        RentalType::Daily => (elapsed_hours + HOURS_PER_DAY - 1) / HOURS_PER_DAY,
        RentalType::Hourly => elapsed_hours,
    };

    let total_amount = checked_total(duration_units, rate).unwrap_or_else(|| {
        log::warn!(
            "⚠️ Total fuera de rango para el tractor {}: {} unidades x {}",
            tractor.id,
            duration_units,
            rate
        );
        Decimal::ZERO
    });

    RentalQuote {
        rental_type,
        elapsed_hours,
        duration_units,
        rate,
        total_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tractor::TractorStatus;
    use chrono::{Duration, TimeZone};

    fn tractor(hourly: i64, daily: i64) -> Tractor {
        Tractor {
            id: 1,
            name: "Mahindra 575 DI".to_string(),
            number: "TR-001".to_string(),
            status: TractorStatus::Available,
            hourly_rate: Decimal::from(hourly),
            daily_rate: Decimal::from(daily),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_daily_rounds_partial_days_up() {
        let quote = compute_quote(&tractor(500, 3000), at(2024, 1, 1, 0, 0), at(2024, 1, 2, 6, 0), RentalType::Daily);
        assert_eq!(quote.elapsed_hours, 30);
        assert_eq!(quote.duration_units, 2);
        assert_eq!(quote.total_amount, Decimal::from(6000));
    }

    #[test]
    fn test_hourly_uses_whole_hours() {
        let quote = compute_quote(&tractor(500, 3000), at(2024, 1, 1, 0, 0), at(2024, 1, 1, 5, 0), RentalType::Hourly);
        assert_eq!(quote.duration_units, 5);
        assert_eq!(quote.rate, Decimal::from(500));
        assert_eq!(quote.total_amount, Decimal::from(2500));
    }

    #[test]
    fn test_partial_hours_are_truncated() {
        let t = tractor(500, 3000);
        let hourly = compute_quote(&t, at(2024, 1, 1, 0, 0), at(2024, 1, 1, 5, 59), RentalType::Hourly);
        assert_eq!(hourly.duration_units, 5);

        let daily = compute_quote(&t, at(2024, 1, 1, 0, 0), at(2024, 1, 2, 0, 30), RentalType::Daily);
        assert_eq!(daily.elapsed_hours, 24);
        assert_eq!(daily.duration_units, 1);

        let short = compute_quote(&t, at(2024, 1, 1, 0, 0), at(2024, 1, 1, 0, 30), RentalType::Hourly);
        assert_eq!(short.duration_units, 0);
        assert!(!short.is_billable());
    }

    #[test]
    fn test_degenerate_window_is_zero() {
        let t = tractor(500, 3000);
        let start = at(2024, 1, 1, 10, 0);
        for rental_type in [RentalType::Daily, RentalType::Hourly] {
            let same = compute_quote(&t, start, start, rental_type);
            assert_eq!((same.duration_units, same.total_amount), (0, Decimal::ZERO));

            let inverted = compute_quote(&t, start, start - Duration::hours(5), rental_type);
            assert_eq!((inverted.duration_units, inverted.total_amount), (0, Decimal::ZERO));
        }
    }

    #[test]
    fn test_zero_rate_is_not_billable() {
        let quote = compute_quote(&tractor(0, 0), at(2024, 1, 1, 0, 0), at(2024, 1, 3, 0, 0), RentalType::Daily);
        assert_eq!(quote.duration_units, 2);
        assert!(!quote.is_billable());
    }

    #[test]
    fn test_out_of_range_total_is_not_billable() {
        let t = Tractor {
            hourly_rate: Decimal::from_i128_with_scale(10_i128.pow(24), 0),
            ..tractor(0, 0)
        };
        let quote = compute_quote(&t, at(1, 1, 1, 0, 0), at(9999, 12, 31, 0, 0), RentalType::Hourly);
        assert!(quote.duration_units > 0);
        assert_eq!(quote.total_amount, Decimal::ZERO);
        assert!(!quote.is_billable());
    }

    #[test]
    fn test_total_is_duration_times_rate() {
        let t = Tractor {
            hourly_rate: Decimal::new(4505, 1),
            ..tractor(0, 2750)
        };
        let start = at(2024, 3, 1, 6, 0);
        for hours in [1_i64, 7, 23, 24, 25, 49, 100] {
            let end = start + Duration::hours(hours);
            for rental_type in [RentalType::Daily, RentalType::Hourly] {
                let quote = compute_quote(&t, start, end, rental_type);
                assert_eq!(quote.total_amount, Decimal::from(quote.duration_units) * t.rate_for(rental_type));
            }
        }
    }
}
