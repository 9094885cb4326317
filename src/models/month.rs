//! Calendar month type used as the reporting period key.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month, parsed from and rendered as `YYYY-MM`.
///
/// # Example
///
/// ```
/// use timeclock::models::Month;
/// use chrono::NaiveDate;
///
/// let month: Month = "2026-01".parse().unwrap();
/// assert!(month.contains(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// assert_eq!(month.to_string(), "2026-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month, rejecting out-of-range month numbers.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// Returns the month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| unreachable!("constructor validated year-month"))
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .unwrap_or_else(|| unreachable!("constructor validated year-month"))
            .pred_opt()
            .unwrap_or_else(|| unreachable!("first of month has a predecessor"))
    }

    /// Checks whether `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got '{}'", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("invalid year in '{}'", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("invalid month in '{}'", s))?;
        Month::new(year, month).ok_or_else(|| format!("month out of range in '{}'", s))
    }
}

impl TryFrom<String> for Month {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let month: Month = "2026-01".parse().unwrap();
        assert_eq!(month.to_string(), "2026-01");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("2026".parse::<Month>().is_err());
        assert!("2026-13".parse::<Month>().is_err());
        assert!("abcd-01".parse::<Month>().is_err());
    }

    #[test]
    fn test_first_and_last_day() {
        let month: Month = "2026-02".parse().unwrap();
        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }

    #[test]
    fn test_last_day_of_december() {
        let month: Month = "2026-12".parse().unwrap();
        assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn test_contains() {
        let month: Month = "2026-01".parse().unwrap();
        assert!(month.contains(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
    }

    #[test]
    fn test_of_date() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 9).unwrap();
        assert_eq!(Month::of(date), "2026-07".parse().unwrap());
    }

    #[test]
    fn test_serde_as_string() {
        let month: Month = "2026-03".parse().unwrap();
        assert_eq!(serde_json::to_string(&month).unwrap(), "\"2026-03\"");
        let parsed: Month = serde_json::from_str("\"2026-03\"").unwrap();
        assert_eq!(parsed, month);
    }
}
