//! Timeclock engine for a single-operator attendance dashboard
//!
//! This crate tracks daily attendance sessions (clock-in, breaks,
//! clock-out), computes worked hours and monthly wages with decimal
//! precision, and manages the hourly rate history behind an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
