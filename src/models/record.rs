//! Attendance record model and related types.
//!
//! This module defines the canonical [`AttendanceRecord`] shape used
//! throughout the engine, the [`ClockAction`] set accepted by the session
//! state machine, and the derived [`SessionStatus`] view.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The clock actions accepted by the session state machine.
///
/// The wire names are camelCase to match what the dashboard sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClockAction {
    /// Open a new session for today.
    ClockIn,
    /// Close the open session and compute worked hours.
    ClockOut,
    /// Start a break within the open session.
    BreakStart,
    /// End the break in progress.
    BreakEnd,
}

impl std::fmt::Display for ClockAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ClockAction::ClockIn => "clockIn",
            ClockAction::ClockOut => "clockOut",
            ClockAction::BreakStart => "breakStart",
            ClockAction::BreakEnd => "breakEnd",
        };
        f.write_str(name)
    }
}

/// The state of today's session, derived from the record set.
///
/// This is a pure view over stored records; it is never tracked as a
/// separate mutable flag, so it cannot drift from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No record exists for the day.
    NotClockedIn,
    /// An open record exists and no break is in progress.
    ClockedIn,
    /// An open record exists with a break in progress.
    OnBreak,
    /// Records exist for the day but none is open.
    ClockedOut,
}

/// One clock-in-to-clock-out cycle, the unit of attendance tracking.
///
/// A record is created at clock-in and mutated in place by the later
/// actions of the same session. A day may hold several records (second
/// shifts), but at most one of them may be open at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,
    /// The calendar day the session belongs to.
    pub date: NaiveDate,
    /// When the session was opened.
    pub clock_in: NaiveDateTime,
    /// When the session was closed; `None` while the session is open.
    pub clock_out: Option<NaiveDateTime>,
    /// When the break started, if one was taken.
    pub break_start: Option<NaiveDateTime>,
    /// When the break ended, if it was closed.
    pub break_end: Option<NaiveDateTime>,
    /// Worked hours, computed exactly once at clock-out.
    pub hours_worked: Option<Decimal>,
    /// Free-text annotation, editable by an operator.
    pub note: Option<String>,
    /// When the record was created.
    pub created_at: NaiveDateTime,
    /// When the record was last written.
    pub updated_at: NaiveDateTime,
    /// Compare-and-swap token, incremented on every store write.
    #[serde(skip_serializing, default)]
    pub version: u64,
}

impl AttendanceRecord {
    /// Returns `true` while the session has not been clocked out.
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Returns `true` while a break has been started but not ended.
    pub fn on_break(&self) -> bool {
        self.break_start.is_some() && self.break_end.is_none()
    }
}

/// Fields required to create a record at clock-in.
#[derive(Debug, Clone)]
pub struct NewRecord {
    /// The calendar day of the new session.
    pub date: NaiveDate,
    /// The clock-in instant.
    pub clock_in: NaiveDateTime,
    /// Optional annotation carried on the new record.
    pub note: Option<String>,
}

/// A partial update applied to an existing record.
///
/// `None` leaves a field unchanged. The note uses a nested option so an
/// operator can clear it explicitly.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    /// Replacement clock-in time.
    pub clock_in: Option<NaiveDateTime>,
    /// Replacement clock-out time.
    pub clock_out: Option<NaiveDateTime>,
    /// Replacement break start time.
    pub break_start: Option<NaiveDateTime>,
    /// Replacement break end time.
    pub break_end: Option<NaiveDateTime>,
    /// Replacement worked hours.
    pub hours_worked: Option<Decimal>,
    /// Replacement note; `Some(None)` clears it.
    pub note: Option<Option<String>>,
}

impl RecordPatch {
    /// Returns `true` when the patch touches any of the four timestamps.
    pub fn touches_times(&self) -> bool {
        self.clock_in.is_some()
            || self.clock_out.is_some()
            || self.break_start.is_some()
            || self.break_end.is_some()
    }

    /// Applies the patch to a copy of `record`, leaving untouched fields
    /// as they were. The version and bookkeeping timestamps are the
    /// store's concern and are not modified here.
    pub fn apply_to(&self, record: &AttendanceRecord) -> AttendanceRecord {
        let mut updated = record.clone();
        if let Some(clock_in) = self.clock_in {
            updated.clock_in = clock_in;
        }
        if let Some(clock_out) = self.clock_out {
            updated.clock_out = Some(clock_out);
        }
        if let Some(break_start) = self.break_start {
            updated.break_start = Some(break_start);
        }
        if let Some(break_end) = self.break_end {
            updated.break_end = Some(break_end);
        }
        if let Some(hours_worked) = self.hours_worked {
            updated.hours_worked = Some(hours_worked);
        }
        if let Some(note) = &self.note {
            updated.note = note.clone();
        }
        updated
    }
}

/// Records for one calendar day, in stable clock-in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecords {
    /// The calendar day.
    pub date: NaiveDate,
    /// The day's records, ordered by clock-in time.
    pub records: Vec<AttendanceRecord>,
}
