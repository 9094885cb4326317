//! Application state for the timeclock API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::TimeclockEngine;

use super::auth::Authorizer;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// engine and the authorizer guarding mutating endpoints.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<TimeclockEngine>,
    authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(engine: Arc<TimeclockEngine>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self { engine, authorizer }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &TimeclockEngine {
        &self.engine
    }

    /// Returns a reference to the authorizer.
    pub fn authorizer(&self) -> &dyn Authorizer {
        self.authorizer.as_ref()
    }
}
