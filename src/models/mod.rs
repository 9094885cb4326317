//! Core data models for the timeclock engine.
//!
//! This module contains all the domain models used throughout the engine.

mod month;
mod rate;
mod record;

pub use month::Month;
pub use rate::HourlyRate;
pub use record::{
    AttendanceRecord, ClockAction, DayRecords, NewRecord, RecordPatch, SessionStatus,
};
