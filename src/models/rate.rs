//! Hourly rate model.
//!
//! Rate history is a contiguous, non-overlapping sequence of intervals;
//! the entry with `end_date == None` is the currently active rate.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One interval of the hourly rate history.
///
/// Closed entries are immutable; only the active entry (the one with
/// `end_date == None`) is ever closed, and closing it and opening the
/// successor happen as a single atomic store operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRate {
    /// Currency units per hour. Always positive.
    pub rate: Decimal,
    /// When this rate took effect.
    pub start_date: NaiveDateTime,
    /// When this rate stopped applying; `None` marks the active entry.
    pub end_date: Option<NaiveDateTime>,
}

impl HourlyRate {
    /// Checks whether `at` falls within this rate's interval.
    ///
    /// The start is inclusive and the end exclusive, so the instant a
    /// rate changes belongs to the new interval.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start_date && self.end_date.is_none_or(|end| at < end)
    }

    /// Returns `true` for the currently active entry.
    pub fn is_active(&self) -> bool {
        self.end_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_active_rate_contains_later_instant() {
        let rate = HourlyRate {
            rate: Decimal::new(1200, 0),
            start_date: make_datetime("2026-01-01 00:00:00"),
            end_date: None,
        };
        assert!(rate.is_active());
        assert!(rate.contains(make_datetime("2026-06-01 12:00:00")));
        assert!(!rate.contains(make_datetime("2025-12-31 23:59:59")));
    }

    #[test]
    fn test_closed_rate_end_is_exclusive() {
        let rate = HourlyRate {
            rate: Decimal::new(1000, 0),
            start_date: make_datetime("2026-01-01 00:00:00"),
            end_date: Some(make_datetime("2026-02-01 00:00:00")),
        };
        assert!(rate.contains(make_datetime("2026-01-15 09:00:00")));
        assert!(!rate.contains(make_datetime("2026-02-01 00:00:00")));
    }

    #[test]
    fn test_start_is_inclusive() {
        let rate = HourlyRate {
            rate: Decimal::new(1000, 0),
            start_date: make_datetime("2026-01-01 00:00:00"),
            end_date: None,
        };
        assert!(rate.contains(make_datetime("2026-01-01 00:00:00")));
    }
}
