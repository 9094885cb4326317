//! Wage aggregation over a set of attendance records.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::AttendanceRecord;

/// Sums `hours_worked * rate` over the records and rounds the total to a
/// whole currency amount (half-up). Rates and totals are whole-number yen
/// in this domain, so no fractional unit survives the final rounding.
///
/// Records without computed hours (open sessions, sessions missing a
/// clock-out) contribute zero. The rate is supplied per record so the
/// caller can apply either the current rate or the historical one.
///
/// # Example
///
/// ```
/// use timeclock::calculation::compute_wage;
/// use rust_decimal::Decimal;
///
/// let wage = compute_wage(&[], |_| Decimal::new(1000, 0));
/// assert_eq!(wage, Decimal::ZERO);
/// ```
pub fn compute_wage<F>(records: &[AttendanceRecord], rate_for: F) -> Decimal
where
    F: Fn(&AttendanceRecord) -> Decimal,
{
    let total: Decimal = records
        .iter()
        .filter_map(|record| record.hours_worked.map(|hours| hours * rate_for(record)))
        .sum();

    total.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Sums the computed hours over the records; open sessions contribute zero.
pub fn total_hours(records: &[AttendanceRecord]) -> Decimal {
    records.iter().filter_map(|record| record.hours_worked).sum()
}
