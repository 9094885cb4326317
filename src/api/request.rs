//! Request types for the timeclock API.
//!
//! This module defines the JSON request structures and query parameters
//! accepted by the endpoints.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ClockAction, Month, RecordPatch};

/// Request body for `POST /attendance/actions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    /// The clock action to apply.
    pub action: ClockAction,
}

/// Request body for `PUT /rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateChangeRequest {
    /// The new hourly rate.
    pub rate: Decimal,
}

/// Request body for `PUT /attendance/records/{id}`.
///
/// Every field is optional; absent fields leave the stored value
/// unchanged. Setting `note` to an empty string clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordUpdateRequest {
    /// New clock-in time.
    #[serde(default)]
    pub clock_in: Option<NaiveDateTime>,
    /// New clock-out time.
    #[serde(default)]
    pub clock_out: Option<NaiveDateTime>,
    /// New break start time.
    #[serde(default)]
    pub break_start: Option<NaiveDateTime>,
    /// New break end time.
    #[serde(default)]
    pub break_end: Option<NaiveDateTime>,
    /// New note text.
    #[serde(default)]
    pub note: Option<String>,
}

impl From<RecordUpdateRequest> for RecordPatch {
    fn from(req: RecordUpdateRequest) -> Self {
        RecordPatch {
            clock_in: req.clock_in,
            clock_out: req.clock_out,
            break_start: req.break_start,
            break_end: req.break_end,
            hours_worked: None,
            note: req.note.map(|note| {
                if note.is_empty() {
                    None
                } else {
                    Some(note)
                }
            }),
        }
    }
}

/// Query parameters selecting a reporting month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthQuery {
    /// The month in `YYYY-MM` form.
    pub month: Month,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_action_request() {
        let request: ActionRequest = serde_json::from_str(r#"{"action": "clockIn"}"#).unwrap();
        assert_eq!(request.action, ClockAction::ClockIn);
    }

    #[test]
    fn test_deserialize_unknown_action_fails() {
        let result = serde_json::from_str::<ActionRequest>(r#"{"action": "lunch"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_into_patch() {
        let request: RecordUpdateRequest = serde_json::from_str(
            r#"{"clock_out": "2026-01-15T18:00:00", "note": "stayed late"}"#,
        )
        .unwrap();
        let patch: RecordPatch = request.into();
        assert!(patch.clock_in.is_none());
        assert!(patch.clock_out.is_some());
        assert_eq!(patch.note, Some(Some("stayed late".to_string())));
        assert!(patch.touches_times());
    }

    #[test]
    fn test_empty_note_clears() {
        let request: RecordUpdateRequest = serde_json::from_str(r#"{"note": ""}"#).unwrap();
        let patch: RecordPatch = request.into();
        assert_eq!(patch.note, Some(None));
        assert!(!patch.touches_times());
    }

    #[test]
    fn test_month_query_parses() {
        let query: MonthQuery = serde_json::from_str(r#"{"month": "2026-01"}"#).unwrap();
        assert_eq!(query.month, Month::new(2026, 1).unwrap());
    }
}
