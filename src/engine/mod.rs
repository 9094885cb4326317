//! The timeclock engine: session state machine, wage aggregation and
//! rate history management on top of the store traits.
//!
//! Every successful transition issues exactly one write to the record
//! store and bumps a data-changed signal the presentation layer can watch
//! to refresh its views. Session state is always derived from the stored
//! records, never tracked separately.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::warn;

use crate::calculation::{compute_hours_worked, compute_wage, derive_status, total_hours};
use crate::config::{RatePolicy, Settings};
use crate::error::{TimeclockError, TimeclockResult};
use crate::models::{
    AttendanceRecord, ClockAction, DayRecords, HourlyRate, Month, NewRecord, RecordPatch,
    SessionStatus,
};
use crate::store::{RateStore, RecordStore, StoreError, StoreResult};
use uuid::Uuid;

/// Pause before the single retry of an unavailable store call.
const RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// Monthly wage summary returned by [`TimeclockEngine::monthly_wage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyWage {
    /// The reporting month.
    pub month: Month,
    /// Sum of computed hours over the month's records.
    pub total_hours: Decimal,
    /// The flat rate applied, when the current-rate policy is in effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    /// The wage total, rounded to a whole currency amount.
    pub wage: Decimal,
}

/// The core engine consumed by the presentation layer.
pub struct TimeclockEngine {
    records: Arc<dyn RecordStore>,
    rates: Arc<dyn RateStore>,
    settings: Settings,
    changed: watch::Sender<u64>,
}

impl TimeclockEngine {
    /// Creates an engine over the given stores.
    pub fn new(records: Arc<dyn RecordStore>, rates: Arc<dyn RateStore>, settings: Settings) -> Self {
        let (changed, _) = watch::channel(0);
        Self {
            records,
            rates,
            settings,
            changed,
        }
    }

    /// Returns a receiver that observes a generation counter bumped on
    /// every successful write. The presentation layer watches it to know
    /// when to refetch.
    pub fn subscribe_changes(&self) -> watch::Receiver<u64> {
        self.changed.subscribe()
    }

    /// The settings the engine was built with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn notify_changed(&self) {
        self.changed.send_modify(|generation| *generation += 1);
    }

    /// Runs a store call, retrying once with backoff when the store
    /// reports itself unavailable.
    async fn with_retry<T, F>(&self, mut op: F) -> StoreResult<T>
    where
        F: FnMut() -> StoreResult<T>,
    {
        match op() {
            Err(StoreError::Unavailable(message)) => {
                warn!(error = %message, "store unavailable, retrying once");
                tokio::time::sleep(RETRY_BACKOFF).await;
                op()
            }
            other => other,
        }
    }

    /// Applies a clock action at `now` and returns the affected record.
    ///
    /// This is the session state machine: the action's legality is judged
    /// against the stored records for `now`'s calendar day, and exactly
    /// one store write (create or compare-and-swap update) follows. A
    /// writer that loses a race observes the same typed error it would
    /// have seen arriving a moment later.
    pub async fn record_action(
        &self,
        action: ClockAction,
        now: NaiveDateTime,
    ) -> TimeclockResult<AttendanceRecord> {
        let record = match action {
            ClockAction::ClockIn => self.clock_in(now).await?,
            ClockAction::ClockOut => self.clock_out(now).await?,
            ClockAction::BreakStart => self.break_start(now).await?,
            ClockAction::BreakEnd => self.break_end(now).await?,
        };
        self.notify_changed();
        Ok(record)
    }

    async fn find_open(&self, now: NaiveDateTime) -> TimeclockResult<Option<AttendanceRecord>> {
        self.with_retry(|| self.records.find_open_record(now.date()))
            .await
            .map_err(surface)
    }

    async fn clock_in(&self, now: NaiveDateTime) -> TimeclockResult<AttendanceRecord> {
        if self.find_open(now).await?.is_some() {
            return Err(TimeclockError::InvalidTransition {
                action: ClockAction::ClockIn,
                message: "a session is already open for today".to_string(),
            });
        }

        let new = NewRecord {
            date: now.date(),
            clock_in: now,
            note: None,
        };
        match self.with_retry(|| self.records.create_record(new.clone())).await {
            Ok(record) => Ok(record),
            // A concurrent clock-in opened the day first.
            Err(StoreError::Conflict) => Err(TimeclockError::InvalidTransition {
                action: ClockAction::ClockIn,
                message: "a session is already open for today".to_string(),
            }),
            Err(e) => Err(surface(e)),
        }
    }

    async fn clock_out(&self, now: NaiveDateTime) -> TimeclockResult<AttendanceRecord> {
        let open = self
            .find_open(now)
            .await?
            .ok_or(TimeclockError::NoOpenSession { date: now.date() })?;

        let hours = compute_hours_worked(
            open.clock_in,
            now,
            open.break_start,
            open.break_end,
            self.settings.break_policy,
        )?;

        let patch = RecordPatch {
            clock_out: Some(now),
            hours_worked: Some(hours),
            ..Default::default()
        };
        match self
            .with_retry(|| self.records.update_record(open.id, patch.clone(), open.version, now))
            .await
        {
            Ok(record) => Ok(record),
            // The session was closed (or removed) under us; the loser of
            // two concurrent clock-outs lands here.
            Err(StoreError::Conflict) | Err(StoreError::NotFound) => {
                Err(TimeclockError::NoOpenSession { date: now.date() })
            }
            Err(e) => Err(surface(e)),
        }
    }

    async fn break_start(&self, now: NaiveDateTime) -> TimeclockResult<AttendanceRecord> {
        let open = self
            .find_open(now)
            .await?
            .ok_or(TimeclockError::NoOpenSession { date: now.date() })?;

        if open.on_break() {
            return Err(TimeclockError::BreakAlreadyActive);
        }
        if open.break_start.is_some() {
            // The record holds a single break interval; overwriting a
            // closed break would discard its deduction.
            return Err(TimeclockError::InvalidTransition {
                action: ClockAction::BreakStart,
                message: "a break was already taken this session".to_string(),
            });
        }

        let patch = RecordPatch {
            break_start: Some(now),
            ..Default::default()
        };
        match self
            .with_retry(|| self.records.update_record(open.id, patch.clone(), open.version, now))
            .await
        {
            Ok(record) => Ok(record),
            Err(StoreError::Conflict) | Err(StoreError::NotFound) => {
                Err(TimeclockError::NoOpenSession { date: now.date() })
            }
            Err(e) => Err(surface(e)),
        }
    }

    async fn break_end(&self, now: NaiveDateTime) -> TimeclockResult<AttendanceRecord> {
        let open = self
            .find_open(now)
            .await?
            .ok_or(TimeclockError::NoActiveBreak)?;

        if !open.on_break() {
            return Err(TimeclockError::NoActiveBreak);
        }

        let patch = RecordPatch {
            break_end: Some(now),
            ..Default::default()
        };
        match self
            .with_retry(|| self.records.update_record(open.id, patch.clone(), open.version, now))
            .await
        {
            Ok(record) => Ok(record),
            Err(StoreError::Conflict) | Err(StoreError::NotFound) => {
                Err(TimeclockError::NoActiveBreak)
            }
            Err(e) => Err(surface(e)),
        }
    }

    /// Derives the session status for `now`'s calendar day.
    pub async fn session_status(&self, now: NaiveDateTime) -> TimeclockResult<SessionStatus> {
        let records = self
            .with_retry(|| self.records.list_records(now.date(), now.date()))
            .await
            .map_err(surface)?;
        Ok(derive_status(&records))
    }

    /// Returns the month's records grouped by day, in stable order.
    pub async fn monthly_records(&self, month: Month) -> TimeclockResult<Vec<DayRecords>> {
        let records = self
            .with_retry(|| self.records.list_records(month.first_day(), month.last_day()))
            .await
            .map_err(surface)?;

        let mut days: Vec<DayRecords> = Vec::new();
        for record in records {
            match days.last_mut() {
                Some(day) if day.date == record.date => day.records.push(record),
                _ => days.push(DayRecords {
                    date: record.date,
                    records: vec![record],
                }),
            }
        }
        Ok(days)
    }

    /// Computes the wage summary for a month.
    ///
    /// The rate basis follows [`RatePolicy`]: either the currently active
    /// rate applied to every record, or the rate whose interval contains
    /// each record's work (looked up at clock-out, falling back to
    /// clock-in for open sessions).
    pub async fn monthly_wage(&self, month: Month) -> TimeclockResult<MonthlyWage> {
        let records = self
            .with_retry(|| self.records.list_records(month.first_day(), month.last_day()))
            .await
            .map_err(surface)?;

        let (wage, rate) = match self.settings.rate_policy {
            RatePolicy::CurrentRate => {
                let rate = self.current_rate();
                (compute_wage(&records, |_| rate), Some(rate))
            }
            RatePolicy::RateAtWorkDate => {
                let wage = compute_wage(&records, |record| {
                    self.rate_at_or_default(record.clock_out.unwrap_or(record.clock_in))
                });
                (wage, None)
            }
        };

        Ok(MonthlyWage {
            month,
            total_hours: total_hours(&records),
            rate,
            wage,
        })
    }

    /// The currently active hourly rate.
    ///
    /// Falls back to the configured default when the history is empty or
    /// the store is unreachable, so the dashboard always has a rate to
    /// show.
    pub fn current_rate(&self) -> Decimal {
        match self.rates.active_rate() {
            Ok(Some(rate)) => rate.rate,
            Ok(None) => self.settings.default_hourly_rate,
            Err(e) => {
                warn!(error = %e, "rate store unreachable, using default rate");
                self.settings.default_hourly_rate
            }
        }
    }

    fn rate_at_or_default(&self, at: NaiveDateTime) -> Decimal {
        match self.rates.rate_at(at) {
            Ok(Some(rate)) => rate.rate,
            Ok(None) => self.settings.default_hourly_rate,
            Err(e) => {
                warn!(error = %e, "rate store unreachable, using default rate");
                self.settings.default_hourly_rate
            }
        }
    }

    /// Appends a new rate to the history, closing the active interval at
    /// the same instant. Rejects non-positive rates.
    pub async fn change_rate(
        &self,
        new_rate: Decimal,
        now: NaiveDateTime,
    ) -> TimeclockResult<HourlyRate> {
        if new_rate <= Decimal::ZERO {
            return Err(TimeclockError::Validation {
                field: "rate".to_string(),
                message: "hourly rate must be positive".to_string(),
            });
        }

        let rate = self
            .with_retry(|| self.rates.close_active_and_open(new_rate, now))
            .await
            .map_err(surface)?;
        self.notify_changed();
        Ok(rate)
    }

    /// Applies an operator edit to a record.
    ///
    /// When the edit touches timestamps of a closed session, the worked
    /// hours are recomputed; an edit that would violate an integrity
    /// invariant is rejected wholesale, leaving the stored record as it
    /// was.
    pub async fn update_record(
        &self,
        id: Uuid,
        patch: RecordPatch,
        now: NaiveDateTime,
    ) -> TimeclockResult<AttendanceRecord> {
        let existing = self
            .with_retry(|| self.records.get_record(id))
            .await
            .map_err(surface)?
            .ok_or(TimeclockError::RecordNotFound { id })?;

        let mut patch = patch;
        let preview = patch.apply_to(&existing);
        if patch.touches_times() {
            if let Some(clock_out) = preview.clock_out {
                patch.hours_worked = Some(compute_hours_worked(
                    preview.clock_in,
                    clock_out,
                    preview.break_start,
                    preview.break_end,
                    self.settings.break_policy,
                )?);
            }
        }

        match self
            .with_retry(|| self.records.update_record(id, patch.clone(), existing.version, now))
            .await
        {
            Ok(record) => {
                self.notify_changed();
                Ok(record)
            }
            Err(StoreError::NotFound) => Err(TimeclockError::RecordNotFound { id }),
            // A concurrent writer moved the record on; the edit is
            // retryable from a fresh read.
            Err(StoreError::Conflict) => Err(TimeclockError::StoreUnavailable {
                message: "record was modified concurrently, retry the edit".to_string(),
            }),
            Err(e) => Err(surface(e)),
        }
    }

    /// Deletes a record by id.
    pub async fn delete_record(&self, id: Uuid) -> TimeclockResult<()> {
        let deleted = self
            .with_retry(|| self.records.delete_record(id))
            .await
            .map_err(surface)?;
        if !deleted {
            return Err(TimeclockError::RecordNotFound { id });
        }
        self.notify_changed();
        Ok(())
    }
}

/// Maps residual store errors onto the engine error type.
fn surface(e: StoreError) -> TimeclockError {
    match e {
        StoreError::Unavailable(message) => TimeclockError::StoreUnavailable { message },
        StoreError::Conflict => TimeclockError::StoreUnavailable {
            message: "conflicting concurrent update".to_string(),
        },
        StoreError::NotFound => TimeclockError::StoreUnavailable {
            message: "record disappeared mid-operation".to_string(),
        },
        StoreError::Integrity(message) => TimeclockError::DataIntegrityFault { message },
    }
}
