//! Parsing de fechas flexibles
//!
//! Los clientes del API envían fechas como RFC 3339 completo o como
//! `YYYY-MM-DD` (inputs de tipo date del front). Ambos formatos se aceptan.

use chrono::{DateTime, NaiveDate, Utc};

/// Parsear una fecha en RFC 3339 o `YYYY-MM-DD` (medianoche UTC)
pub fn parse_date_flexible(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_date_flexible("2026-03-01T12:30:00Z").unwrap();
        assert_eq!(dt.hour(), 12);
        assert_eq!(dt.day(), 1);
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_date_flexible("2026-03-01").unwrap();
        assert_eq!(dt.year(), 2026);
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_date_flexible("next tuesday").is_none());
    }
}
