//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de fechas que llegan del record store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::ValidationError;

/// Formatos sin zona horaria aceptados (se interpretan como UTC)
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Validar y convertir string a datetime
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    parse_store_datetime(value).ok_or_else(|| {
        let mut error = ValidationError::new("datetime");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"RFC3339 | YYYY-MM-DDTHH:MM".to_string());
        error
    })
}

/// Convertir una fecha del record store a UTC.
///
/// Acepta RFC3339, fechas `datetime-local` sin zona y fechas simples.
pub fn parse_store_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Deserializar fechas del formulario (RFC3339 o `datetime-local`)
pub fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_store_datetime(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("fecha inválida: '{}'", raw)))
}

/// Variante opcional de `deserialize_datetime` (usar con `#[serde(default)]`)
pub fn deserialize_optional_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_store_datetime(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("fecha inválida: '{}'", raw))),
    }
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Importes y tarifas (para `#[validate(custom)]`)
pub fn validate_non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)
}

/// Búsqueda de subcadena sin distinguir mayúsculas
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_store_datetime_formats() {
        let rfc = parse_store_datetime("2024-01-01T10:30:00+02:00").unwrap();
        assert_eq!(rfc.hour(), 8);

        let local = parse_store_datetime("2024-01-01T10:30").unwrap();
        assert_eq!((local.hour(), local.minute()), (10, 30));

        let date_only = parse_store_datetime("2024-03-15").unwrap();
        assert_eq!((date_only.month(), date_only.day(), date_only.hour()), (3, 15, 0));

        assert!(parse_store_datetime("").is_none());
        assert!(parse_store_datetime("15/03/2024").is_none());
    }

    #[test]
    fn test_validate_datetime() {
        assert!(validate_datetime("2024-01-15T08:00").is_ok());
        assert!(validate_datetime("ayer").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Ramesh").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(Decimal::ZERO).is_ok());
        assert!(validate_non_negative(Decimal::new(1500, 0)).is_ok());
        assert!(validate_non_negative(Decimal::new(-1, 0)).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Window {
        #[serde(deserialize_with = "deserialize_datetime")]
        start: DateTime<Utc>,
        #[serde(default, deserialize_with = "deserialize_optional_datetime")]
        end: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_deserialize_form_dates() {
        let window: Window = serde_json::from_str(r#"{"start": "2024-01-01T06:00"}"#).unwrap();
        assert_eq!(window.start.hour(), 6);
        assert!(window.end.is_none());

        let window: Window =
            serde_json::from_str(r#"{"start": "2024-01-01T06:00:00Z", "end": "2024-01-02"}"#).unwrap();
        assert_eq!(window.end.unwrap().day(), 2);

        assert!(serde_json::from_str::<Window>(r#"{"start": "mañana"}"#).is_err());
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Green Valley Farm", "valley"));
        assert!(!contains_ignore_case("Green Valley Farm", "hill"));
    }
}
