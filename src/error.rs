//! Error types for the timeclock engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure modes of the session state machine, the wage calculator
//! and the rate history manager.

use thiserror::Error;
use uuid::Uuid;

use crate::models::ClockAction;

/// The main error type for the timeclock engine.
///
/// State-machine and calculator failures are returned as values to the
/// caller so the presentation layer can render a user-facing message;
/// nothing is panicked or thrown past the engine boundary.
///
/// # Example
///
/// ```
/// use timeclock::error::TimeclockError;
/// use chrono::NaiveDate;
///
/// let error = TimeclockError::NoOpenSession {
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
/// };
/// assert_eq!(error.to_string(), "No open session found for 2026-01-15");
/// ```
#[derive(Debug, Error)]
pub enum TimeclockError {
    /// The requested clock action is not legal in the current session state.
    #[error("Action '{action}' is not valid here: {message}")]
    InvalidTransition {
        /// The action that was rejected.
        action: ClockAction,
        /// A description of why the action was rejected.
        message: String,
    },

    /// No open attendance record exists for the day the action targets.
    #[error("No open session found for {date}")]
    NoOpenSession {
        /// The calendar day that has no open record.
        date: chrono::NaiveDate,
    },

    /// A break is already in progress on the open record.
    #[error("A break is already active for the open session")]
    BreakAlreadyActive,

    /// No break is currently in progress, so there is nothing to end.
    #[error("No active break to end")]
    NoActiveBreak,

    /// Stored data violates an invariant and the write was rejected.
    ///
    /// Integrity faults are never silently corrected; the prior state
    /// is preserved and the fault surfaced.
    #[error("Data integrity fault: {message}")]
    DataIntegrityFault {
        /// A description of the violated invariant.
        message: String,
    },

    /// The record store did not respond; the operation may be retried.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the transient failure.
        message: String,
    },

    /// No attendance record exists with the given id.
    #[error("Attendance record not found: {id}")]
    RecordNotFound {
        /// The id that was not found.
        id: Uuid,
    },

    /// Input from the caller failed validation.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// Settings file was not found at the specified path.
    #[error("Settings file not found: {path}")]
    SettingsNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Settings file could not be parsed.
    #[error("Failed to parse settings file '{path}': {message}")]
    SettingsParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return [`TimeclockError`].
pub type TimeclockResult<T> = Result<T, TimeclockError>;
