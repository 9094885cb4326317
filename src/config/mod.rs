//! Configuration for the timeclock engine.

mod settings;

pub use settings::{BreakPolicy, RatePolicy, Settings};
