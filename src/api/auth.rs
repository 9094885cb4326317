//! Authorization seam for the timeclock API.
//!
//! The dashboard is single-operator: there is no user model, only a
//! yes-or-no gate in front of the endpoints. The [`Authorizer`] trait
//! keeps the gate swappable so deployments can plug in whatever check
//! their environment provides.

use axum::http::{header, HeaderMap};

/// Decides whether a request may operate the dashboard.
pub trait Authorizer: Send + Sync {
    /// Returns whether the presented bearer token is acceptable.
    fn authorize(&self, token: Option<&str>) -> bool;
}

/// Authorizer backed by a static allow-list of tokens.
pub struct TokenAuthorizer {
    tokens: Vec<String>,
}

impl TokenAuthorizer {
    /// Creates an authorizer accepting exactly the given tokens.
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

impl Authorizer for TokenAuthorizer {
    fn authorize(&self, token: Option<&str>) -> bool {
        match token {
            Some(token) => self.tokens.iter().any(|t| t == token),
            None => false,
        }
    }
}

/// Authorizer that accepts every request. For tests and trusted
/// single-machine deployments.
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn authorize(&self, _token: Option<&str>) -> bool {
        true
    }
}

/// Extracts the bearer token from the `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
