//! Aritmética de importes
//!
//! Los importes vienen del record store sin límite superior; sumar o
//! multiplicar con los operadores de `Decimal` entra en pánico al desbordar.

use rust_decimal::Decimal;

/// Suma de importes que se satura en `Decimal::MAX` en lugar de desbordar
pub fn sum_amounts<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(amount))
}

/// Unidades x tarifa; `None` si el resultado no cabe en un `Decimal`
pub fn checked_total(units: i64, rate: Decimal) -> Option<Decimal> {
    Decimal::from(units).checked_mul(rate)
}
