//! Session status derivation.
//!
//! The dashboard's clocked-in and on-break indicators are computed from
//! the stored record set every time, never tracked as separate flags, so
//! the view cannot drift from the store.

use crate::models::{AttendanceRecord, SessionStatus};

/// Derives the session status for a day from its records.
///
/// The open record (if any) decides between clocked-in and on-break;
/// a day with only closed records is clocked-out; an empty day is
/// not-clocked-in. When multiple records are open (which the store
/// invariant forbids, but the derivation stays total), the one with the
/// latest clock-in wins, creation order breaking ties.
pub fn derive_status(records: &[AttendanceRecord]) -> SessionStatus {
    let open = records
        .iter()
        .filter(|record| record.is_open())
        .max_by_key(|record| (record.clock_in, record.created_at, record.id));

    match open {
        Some(record) if record.on_break() => SessionStatus::OnBreak,
        Some(_) => SessionStatus::ClockedIn,
        None if records.is_empty() => SessionStatus::NotClockedIn,
        None => SessionStatus::ClockedOut,
    }
}
