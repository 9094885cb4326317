//! HTTP request handlers for the timeclock API.
//!
//! This module contains the handler functions for all endpoints and the
//! router wiring them together.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::RecordPatch;

use super::auth::bearer_token;
use super::request::{ActionRequest, MonthQuery, RateChangeRequest, RecordUpdateRequest};
use super::response::{ApiError, ApiErrorResponse, MessageResponse, RateResponse, StatusResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/actions", post(action_handler))
        .route("/attendance/status", get(status_handler))
        .route("/attendance/records", get(records_handler))
        .route(
            "/attendance/records/:id",
            put(update_record_handler).delete(delete_record_handler),
        )
        .route("/attendance/wage", get(wage_handler))
        .route("/rate", get(rate_handler).put(rate_change_handler))
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn json_error(response: ApiErrorResponse) -> Response {
    (
        response.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response.error),
    )
        .into_response()
}

/// Checks the bearer token against the configured authorizer.
fn require_authorized(
    state: &AppState,
    headers: &HeaderMap,
    correlation_id: Uuid,
) -> Result<(), Response> {
    if state.authorizer().authorize(bearer_token(headers)) {
        Ok(())
    } else {
        warn!(correlation_id = %correlation_id, "Unauthorized request");
        Err(json_error(ApiErrorResponse {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::unauthorized(),
        }))
    }
}

/// Unwraps a JSON body, converting rejections to error responses.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(json_error(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            }))
        }
    }
}

/// Unwraps the month query, converting rejections to error responses.
fn parse_month(
    query: Result<Query<MonthQuery>, QueryRejection>,
    correlation_id: Uuid,
) -> Result<MonthQuery, Response> {
    match query {
        Ok(Query(query)) => Ok(query),
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid month query"
            );
            Err(json_error(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(rejection.body_text()),
            }))
        }
    }
}

/// Unwraps the record id path segment, converting rejections to error
/// responses.
fn parse_record_id(
    path: Result<Path<Uuid>, PathRejection>,
    correlation_id: Uuid,
) -> Result<Uuid, Response> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid record id"
            );
            Err(json_error(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error("record id must be a UUID"),
            }))
        }
    }
}

/// Handler for `POST /attendance/actions`.
///
/// Applies a clock action at the server's current local time.
async fn action_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    if let Err(response) = require_authorized(&state, &headers, correlation_id) {
        return response;
    }
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let now = Local::now().naive_local();
    info!(
        correlation_id = %correlation_id,
        action = %request.action,
        "Processing clock action"
    );

    match state.engine().record_action(request.action, now).await {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %record.id,
                "Clock action applied"
            );
            json_ok(record)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Clock action rejected"
            );
            json_error(err.into())
        }
    }
}

/// Handler for `GET /attendance/status`.
async fn status_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();

    if let Err(response) = require_authorized(&state, &headers, correlation_id) {
        return response;
    }

    let now = Local::now().naive_local();
    match state.engine().session_status(now).await {
        Ok(status) => json_ok(StatusResponse { status }),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Status lookup failed");
            json_error(err.into())
        }
    }
}

/// Handler for `GET /attendance/records?month=YYYY-MM`.
async fn records_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    if let Err(response) = require_authorized(&state, &headers, correlation_id) {
        return response;
    }
    let query = match parse_month(query, correlation_id) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match state.engine().monthly_records(query.month).await {
        Ok(days) => json_ok(days),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Record listing failed");
            json_error(err.into())
        }
    }
}

/// Handler for `PUT /attendance/records/{id}`.
async fn update_record_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    headers: HeaderMap,
    payload: Result<Json<RecordUpdateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    if let Err(response) = require_authorized(&state, &headers, correlation_id) {
        return response;
    }
    let id = match parse_record_id(path, correlation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let patch: RecordPatch = request.into();
    info!(correlation_id = %correlation_id, record_id = %id, "Processing record edit");

    let now = Local::now().naive_local();
    match state.engine().update_record(id, patch, now).await {
        Ok(record) => json_ok(record),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                record_id = %id,
                error = %err,
                "Record edit rejected"
            );
            json_error(err.into())
        }
    }
}

/// Handler for `DELETE /attendance/records/{id}`.
async fn delete_record_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();

    if let Err(response) = require_authorized(&state, &headers, correlation_id) {
        return response;
    }
    let id = match parse_record_id(path, correlation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.engine().delete_record(id).await {
        Ok(()) => {
            info!(correlation_id = %correlation_id, record_id = %id, "Record deleted");
            json_ok(MessageResponse {
                message: "record deleted".to_string(),
            })
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                record_id = %id,
                error = %err,
                "Record deletion failed"
            );
            json_error(err.into())
        }
    }
}

/// Handler for `GET /attendance/wage?month=YYYY-MM`.
async fn wage_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    if let Err(response) = require_authorized(&state, &headers, correlation_id) {
        return response;
    }
    let query = match parse_month(query, correlation_id) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match state.engine().monthly_wage(query.month).await {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                month = %summary.month,
                wage = %summary.wage,
                "Wage summary computed"
            );
            json_ok(summary)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Wage summary failed");
            json_error(err.into())
        }
    }
}

/// Handler for `GET /rate`.
async fn rate_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();

    if let Err(response) = require_authorized(&state, &headers, correlation_id) {
        return response;
    }

    json_ok(RateResponse {
        rate: state.engine().current_rate(),
    })
}

/// Handler for `PUT /rate`.
async fn rate_change_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RateChangeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    if let Err(response) = require_authorized(&state, &headers, correlation_id) {
        return response;
    }
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let now = Local::now().naive_local();
    match state.engine().change_rate(request.rate, now).await {
        Ok(rate) => {
            info!(correlation_id = %correlation_id, rate = %rate.rate, "Rate changed");
            json_ok(RateResponse { rate: rate.rate })
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Rate change rejected");
            json_error(err.into())
        }
    }
}
