//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Date layout accepted on the wire (`2024-01-31`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a UUID and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidArgument(format!("invalid {label} id")))
}

/// Parse a `YYYY-MM-DD` date.
pub(crate) fn parse_date(value: &str, label: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        EngineError::InvalidArgument(format!("invalid {label}: expected YYYY-MM-DD, got {value}"))
    })
}

/// Apply a signed delta to a balance, rejecting overflow.
pub(crate) fn checked_balance(balance: i64, delta: i64) -> ResultEngine<i64> {
    balance
        .checked_add(delta)
        .ok_or_else(|| EngineError::InvalidArgument("balance overflow".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let date = parse_date("2024-02-29", "transaction_date").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn rejects_other_date_layouts() {
        assert!(matches!(
            parse_date("29/02/2024", "transaction_date"),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(parse_date("2023-02-29", "transaction_date").is_err());
    }

    #[test]
    fn balance_overflow_is_rejected() {
        assert_eq!(checked_balance(10, -30).unwrap(), -20);
        assert!(checked_balance(i64::MAX, 1).is_err());
    }

    #[test]
    fn invalid_uuid_is_labeled() {
        assert_eq!(
            parse_uuid("nope", "user"),
            Err(EngineError::InvalidArgument("invalid user id".to_string()))
        );
    }
}
