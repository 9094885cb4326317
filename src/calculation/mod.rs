//! Calculation logic for the timeclock engine.
//!
//! This module contains the worked-hours computation performed at
//! clock-out, the wage aggregation over a reporting period, and the
//! derivation of the session status from the stored record set.

mod hours;
mod status;
mod wage;

pub use hours::compute_hours_worked;
pub use status::derive_status;
pub use wage::{compute_wage, total_hours};
