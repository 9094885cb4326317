//! Storage abstraction for attendance records and rate history.
//!
//! The engine consumes these traits and never touches a concrete backend
//! directly, so a relational store can replace the in-memory one without
//! changing the domain layer. Every trait method is atomic from the
//! caller's perspective: check-then-act sequences that must not race
//! (create-if-no-open, compare-and-swap update, close-and-open) live
//! behind a single call.

mod memory;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AttendanceRecord, HourlyRate, NewRecord, RecordPatch};

pub use memory::MemoryStore;

/// Errors surfaced at the store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend did not respond; the call may be retried.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// A concurrent writer invalidated this call's premise.
    #[error("conflicting concurrent update")]
    Conflict,
    /// The addressed row does not exist.
    #[error("record not found")]
    NotFound,
    /// The write would violate a stored-data invariant.
    #[error("integrity violation: {0}")]
    Integrity(String),
}

/// A type alias for Results at the store boundary.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable storage of attendance records.
pub trait RecordStore: Send + Sync {
    /// Creates a record for a new session.
    ///
    /// Fails with [`StoreError::Conflict`] when an open record already
    /// exists for the date; the at-most-one-open-per-day invariant is
    /// enforced here, under the store's serialization, so two racing
    /// clock-ins cannot both succeed.
    fn create_record(&self, new: NewRecord) -> StoreResult<AttendanceRecord>;

    /// Returns the open record for a day with the latest clock-in,
    /// creation order breaking ties.
    fn find_open_record(&self, date: NaiveDate) -> StoreResult<Option<AttendanceRecord>>;

    /// Fetches a record by id.
    fn get_record(&self, id: Uuid) -> StoreResult<Option<AttendanceRecord>>;

    /// Applies a patch if and only if the stored version still equals
    /// `expected_version`, then bumps the version and stamps
    /// `updated_at` with the caller-supplied write instant `at`.
    ///
    /// Fails with [`StoreError::NotFound`] for a missing id and
    /// [`StoreError::Conflict`] when another writer got there first.
    fn update_record(
        &self,
        id: Uuid,
        patch: RecordPatch,
        expected_version: u64,
        at: NaiveDateTime,
    ) -> StoreResult<AttendanceRecord>;

    /// Lists records with `from <= date <= to`, ordered by date, then
    /// clock-in, then creation order.
    fn list_records(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<AttendanceRecord>>;

    /// Deletes a record. Returns whether a row was removed.
    fn delete_record(&self, id: Uuid) -> StoreResult<bool>;
}

/// Durable storage of the hourly rate history.
pub trait RateStore: Send + Sync {
    /// Returns the active rate entry, if the history is non-empty.
    fn active_rate(&self) -> StoreResult<Option<HourlyRate>>;

    /// Returns the rate whose interval contains `at`.
    fn rate_at(&self, at: NaiveDateTime) -> StoreResult<Option<HourlyRate>>;

    /// Closes the active interval at `at` and opens a new one starting at
    /// the same instant, as one atomic unit. The first-ever call simply
    /// opens the first interval.
    ///
    /// Fails with [`StoreError::Integrity`] when `at` precedes the active
    /// interval's start; accepting it would invert the closed interval
    /// and leave the history overlapping.
    fn close_active_and_open(&self, rate: Decimal, at: NaiveDateTime) -> StoreResult<HourlyRate>;
}
