//! HTTP API module for the timeclock dashboard.
//!
//! This module provides the REST endpoints for clock actions, record
//! listings and edits, wage summaries and rate management.

mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use auth::{AllowAll, Authorizer, TokenAuthorizer};
pub use handlers::create_router;
pub use request::{ActionRequest, RateChangeRequest, RecordUpdateRequest};
pub use response::{ApiError, MessageResponse, RateResponse, StatusResponse};
pub use state::AppState;
