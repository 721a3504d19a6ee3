//! Internal helpers for field validation.
//!
//! These are **not** part of the public API; the engine calls them for both
//! create and update so a record can never be stored in an invalid state.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{Category, ResultEngine};

pub(crate) const TITLE_MAX_CHARS: usize = 100;

pub(crate) fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title is required".to_string());
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(format!(
            "Title must be at most {TITLE_MAX_CHARS} characters"
        ));
    }
    Ok(())
}

pub(crate) fn validate_amount(amount: f64) -> Result<(), String> {
    if !amount.is_finite() {
        return Err("Amount must be a number".to_string());
    }
    if amount <= 0.0 {
        return Err("Amount must be greater than 0".to_string());
    }
    Ok(())
}

pub(crate) fn parse_category(category: &str) -> Result<Category, String> {
    Category::try_from(category).map_err(|err| err.to_string())
}

/// Parses an ISO-8601 date or date/time.
///
/// Accepts RFC 3339 (`2024-03-01T10:00:00+02:00`), a date/time without offset
/// (read as UTC) and a plain calendar date (midnight UTC).
pub(crate) fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Date is required".to_string());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        && let Some(naive) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(naive.and_utc());
    }
    Err(format!("\"{value}\" is not a valid date"))
}

/// Folds the collected field errors into a single validation error.
pub(crate) fn collect_errors(errors: Vec<String>) -> ResultEngine<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::EngineError::Validation(errors.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn title_must_be_present_and_short() {
        assert!(validate_title("Lunch").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"a".repeat(100)).is_ok());
        assert!(validate_title(&"a".repeat(101)).is_err());
        // counted in characters, not bytes
        assert!(validate_title(&"é".repeat(100)).is_ok());
    }

    #[test]
    fn amount_must_be_positive_and_finite() {
        assert!(validate_amount(0.01).is_ok());
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-5.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn parses_plain_dates_as_midnight_utc() {
        let dt = parse_date("2024-03-01").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 1));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_date("2024-03-01T10:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
        let dt = parse_date("2024-03-01T00:00:00.000Z").unwrap();
        assert_eq!(dt.day(), 1);
    }

    #[test]
    fn parses_naive_date_time_as_utc() {
        let dt = parse_date("2024-03-01T12:30:00").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (12, 30));
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(parse_date("").is_err());
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn joins_errors() {
        assert!(collect_errors(vec![]).is_ok());
        let err = collect_errors(vec!["a".into(), "b".into()]).unwrap_err();
        assert_eq!(err, crate::EngineError::Validation("a, b".to_string()));
    }
}
