//! Worked-hours computation for a single session.
//!
//! Hours are computed exactly once, at clock-out: the raw span from
//! clock-in to clock-out minus the break, rounded to two decimal places
//! with half-up rounding. The result is never negative; a break longer
//! than the session is a data-integrity fault, not a silent zero.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::BreakPolicy;
use crate::error::{TimeclockError, TimeclockResult};
use crate::models::ClockAction;

/// Seconds per hour, as a `Decimal` divisor.
const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    Decimal::from((end - start).num_seconds()) / SECONDS_PER_HOUR
}

/// Computes the worked hours for a session being clocked out.
///
/// # Arguments
///
/// * `clock_in` - When the session was opened.
/// * `clock_out` - The clock-out instant.
/// * `break_start` / `break_end` - The break interval, if any.
/// * `policy` - Treatment of a break that was started but never ended.
///
/// # Returns
///
/// The worked hours rounded to two decimal places (half-up), or:
/// - [`TimeclockError::DataIntegrityFault`] when clock-out precedes
///   clock-in, the break interval is inverted, or the break deduction
///   exceeds the raw span;
/// - [`TimeclockError::InvalidTransition`] when the break is still open
///   and the policy is [`BreakPolicy::BlockClockOut`].
///
/// # Example
///
/// ```
/// use timeclock::calculation::compute_hours_worked;
/// use timeclock::config::BreakPolicy;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let t = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let hours = compute_hours_worked(
///     t("2026-01-15 09:00:00"),
///     t("2026-01-15 15:00:00"),
///     Some(t("2026-01-15 12:00:00")),
///     Some(t("2026-01-15 12:30:00")),
///     BreakPolicy::Ignore,
/// )
/// .unwrap();
/// assert_eq!(hours, Decimal::new(550, 2)); // 5.50
/// ```
pub fn compute_hours_worked(
    clock_in: NaiveDateTime,
    clock_out: NaiveDateTime,
    break_start: Option<NaiveDateTime>,
    break_end: Option<NaiveDateTime>,
    policy: BreakPolicy,
) -> TimeclockResult<Decimal> {
    if clock_out < clock_in {
        return Err(TimeclockError::DataIntegrityFault {
            message: format!("clock-out {} precedes clock-in {}", clock_out, clock_in),
        });
    }
    let raw_hours = hours_between(clock_in, clock_out);

    let break_hours = match (break_start, break_end) {
        (Some(start), Some(end)) => {
            if end < start {
                return Err(TimeclockError::DataIntegrityFault {
                    message: format!("break end {} precedes break start {}", end, start),
                });
            }
            hours_between(start, end)
        }
        (Some(start), None) => match policy {
            BreakPolicy::Ignore => Decimal::ZERO,
            BreakPolicy::DeductUntilClockOut => hours_between(start.min(clock_out), clock_out),
            BreakPolicy::BlockClockOut => {
                return Err(TimeclockError::InvalidTransition {
                    action: ClockAction::ClockOut,
                    message: "a break is still open; end it before clocking out".to_string(),
                });
            }
        },
        _ => Decimal::ZERO,
    };

    if break_hours > raw_hours {
        return Err(TimeclockError::DataIntegrityFault {
            message: format!(
                "break of {} hours exceeds session span of {} hours",
                break_hours, raw_hours
            ),
        });
    }

    Ok((raw_hours - break_hours).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        use std::str::FromStr;
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_short_day_with_break() {
        // 09:00-15:00 minus a 30 minute break
        let hours = compute_hours_worked(
            t("2026-01-15 09:00:00"),
            t("2026-01-15 15:00:00"),
            Some(t("2026-01-15 12:00:00")),
            Some(t("2026-01-15 12:30:00")),
            BreakPolicy::Ignore,
        )
        .unwrap();
        assert_eq!(hours, dec("5.50"));
    }

    #[test]
    fn test_full_day_with_break() {
        // 09:00-18:00 minus a 30 minute break
        let hours = compute_hours_worked(
            t("2026-01-15 09:00:00"),
            t("2026-01-15 18:00:00"),
            Some(t("2026-01-15 12:00:00")),
            Some(t("2026-01-15 12:30:00")),
            BreakPolicy::Ignore,
        )
        .unwrap();
        assert_eq!(hours, dec("8.50"));
    }

    #[test]
    fn test_full_day_no_break() {
        let hours = compute_hours_worked(
            t("2026-01-15 09:00:00"),
            t("2026-01-15 17:00:00"),
            None,
            None,
            BreakPolicy::Ignore,
        )
        .unwrap();
        assert_eq!(hours, dec("8.00"));
    }

    #[test]
    fn test_sub_minute_spans_round_half_up() {
        // 7h59m30s -> 7.9917 -> 7.99
        let hours = compute_hours_worked(
            t("2026-01-15 09:00:00"),
            t("2026-01-15 16:59:30"),
            None,
            None,
            BreakPolicy::Ignore,
        )
        .unwrap();
        assert_eq!(hours, dec("7.99"));

        // 27 seconds -> 0.0075 -> 0.01 (half-up)
        let hours = compute_hours_worked(
            t("2026-01-15 09:00:00"),
            t("2026-01-15 09:00:27"),
            None,
            None,
            BreakPolicy::Ignore,
        )
        .unwrap();
        assert_eq!(hours, dec("0.01"));
    }

    #[test]
    fn test_open_break_ignored_by_default() {
        let hours = compute_hours_worked(
            t("2026-01-15 09:00:00"),
            t("2026-01-15 17:00:00"),
            Some(t("2026-01-15 12:00:00")),
            None,
            BreakPolicy::Ignore,
        )
        .unwrap();
        assert_eq!(hours, dec("8.00"));
    }

    #[test]
    fn test_open_break_deducted_until_clock_out() {
        let hours = compute_hours_worked(
            t("2026-01-15 09:00:00"),
            t("2026-01-15 17:00:00"),
            Some(t("2026-01-15 16:00:00")),
            None,
            BreakPolicy::DeductUntilClockOut,
        )
        .unwrap();
        assert_eq!(hours, dec("7.00"));
    }

    #[test]
    fn test_open_break_blocks_clock_out() {
        let result = compute_hours_worked(
            t("2026-01-15 09:00:00"),
            t("2026-01-15 17:00:00"),
            Some(t("2026-01-15 12:00:00")),
            None,
            BreakPolicy::BlockClockOut,
        );
        assert!(matches!(
            result,
            Err(TimeclockError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_inverted_clock_interval_is_integrity_fault() {
        let result = compute_hours_worked(
            t("2026-01-15 17:00:00"),
            t("2026-01-15 09:00:00"),
            None,
            None,
            BreakPolicy::Ignore,
        );
        assert!(matches!(
            result,
            Err(TimeclockError::DataIntegrityFault { .. })
        ));
    }

    #[test]
    fn test_break_exceeding_span_is_integrity_fault_not_negative() {
        let result = compute_hours_worked(
            t("2026-01-15 09:00:00"),
            t("2026-01-15 10:00:00"),
            Some(t("2026-01-15 09:00:00")),
            Some(t("2026-01-15 12:00:00")),
            BreakPolicy::Ignore,
        );
        assert!(matches!(
            result,
            Err(TimeclockError::DataIntegrityFault { .. })
        ));
    }

    #[test]
    fn test_inverted_break_interval_is_integrity_fault() {
        let result = compute_hours_worked(
            t("2026-01-15 09:00:00"),
            t("2026-01-15 17:00:00"),
            Some(t("2026-01-15 13:00:00")),
            Some(t("2026-01-15 12:00:00")),
            BreakPolicy::Ignore,
        );
        assert!(matches!(
            result,
            Err(TimeclockError::DataIntegrityFault { .. })
        ));
    }

    #[test]
    fn test_zero_duration_session() {
        let hours = compute_hours_worked(
            t("2026-01-15 09:00:00"),
            t("2026-01-15 09:00:00"),
            None,
            None,
            BreakPolicy::Ignore,
        )
        .unwrap();
        assert_eq!(hours, Decimal::ZERO.round_dp(2));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn base() -> NaiveDateTime {
            t("2026-01-15 00:00:00")
        }

        proptest! {
            /// Worked hours are round(raw - break, 2) and never negative
            /// for any well-ordered timestamps.
            #[test]
            fn hours_are_rounded_difference(
                start_s in 0i64..43_200,
                work_s in 0i64..43_200,
                break_offset_s in 0i64..43_200,
                break_len_s in 0i64..43_200,
            ) {
                let clock_in = base() + chrono::Duration::seconds(start_s);
                let clock_out = clock_in + chrono::Duration::seconds(work_s);
                let break_start = clock_in + chrono::Duration::seconds(break_offset_s.min(work_s));
                let break_end = break_start
                    + chrono::Duration::seconds(break_len_s.min(work_s - break_offset_s.min(work_s)));

                let hours = compute_hours_worked(
                    clock_in,
                    clock_out,
                    Some(break_start),
                    Some(break_end),
                    BreakPolicy::Ignore,
                )
                .unwrap();

                let raw = Decimal::from(work_s) / SECONDS_PER_HOUR;
                let brk = Decimal::from((break_end - break_start).num_seconds()) / SECONDS_PER_HOUR;
                let expected = (raw - brk)
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

                prop_assert_eq!(hours, expected);
                prop_assert!(hours >= Decimal::ZERO);
            }
        }
    }
}
