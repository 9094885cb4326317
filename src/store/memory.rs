//! In-memory store implementation.
//!
//! Backs the dashboard in tests and single-process deployments. A single
//! mutex serializes every operation, which makes each trait method one
//! atomic critical section; that is all the transactional behavior the
//! engine relies on.

use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{AttendanceRecord, HourlyRate, NewRecord, RecordPatch};

use super::{RateStore, RecordStore, StoreError, StoreResult};

#[derive(Default)]
struct Inner {
    records: Vec<AttendanceRecord>,
    rates: Vec<HourlyRate>,
}

/// An in-memory [`RecordStore`] and [`RateStore`].
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }
}

fn open_record_position(records: &[AttendanceRecord], date: NaiveDate) -> Option<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.date == date && r.is_open())
        .max_by_key(|(_, r)| (r.clock_in, r.created_at, r.id))
        .map(|(i, _)| i)
}

impl RecordStore for MemoryStore {
    fn create_record(&self, new: NewRecord) -> StoreResult<AttendanceRecord> {
        let mut inner = self.lock()?;
        if open_record_position(&inner.records, new.date).is_some() {
            return Err(StoreError::Conflict);
        }
        let record = AttendanceRecord {
            id: Uuid::new_v4(),
            date: new.date,
            clock_in: new.clock_in,
            clock_out: None,
            break_start: None,
            break_end: None,
            hours_worked: None,
            note: new.note,
            created_at: new.clock_in,
            updated_at: new.clock_in,
            version: 1,
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    fn find_open_record(&self, date: NaiveDate) -> StoreResult<Option<AttendanceRecord>> {
        let inner = self.lock()?;
        Ok(open_record_position(&inner.records, date).map(|i| inner.records[i].clone()))
    }

    fn get_record(&self, id: Uuid) -> StoreResult<Option<AttendanceRecord>> {
        let inner = self.lock()?;
        Ok(inner.records.iter().find(|r| r.id == id).cloned())
    }

    fn update_record(
        &self,
        id: Uuid,
        patch: RecordPatch,
        expected_version: u64,
        at: NaiveDateTime,
    ) -> StoreResult<AttendanceRecord> {
        let mut inner = self.lock()?;
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        if record.version != expected_version {
            return Err(StoreError::Conflict);
        }
        let mut updated = patch.apply_to(record);
        updated.date = updated.clock_in.date();
        updated.version = record.version + 1;
        updated.updated_at = at;
        *record = updated.clone();
        Ok(updated)
    }

    fn list_records(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<AttendanceRecord>> {
        let inner = self.lock()?;
        let mut records: Vec<AttendanceRecord> = inner
            .records
            .iter()
            .filter(|r| r.date >= from && r.date <= to)
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.date, r.clock_in, r.created_at, r.id));
        Ok(records)
    }

    fn delete_record(&self, id: Uuid) -> StoreResult<bool> {
        let mut inner = self.lock()?;
        let before = inner.records.len();
        inner.records.retain(|r| r.id != id);
        Ok(inner.records.len() < before)
    }
}

impl RateStore for MemoryStore {
    fn active_rate(&self) -> StoreResult<Option<HourlyRate>> {
        let inner = self.lock()?;
        Ok(inner.rates.iter().find(|r| r.is_active()).cloned())
    }

    fn rate_at(&self, at: NaiveDateTime) -> StoreResult<Option<HourlyRate>> {
        let inner = self.lock()?;
        Ok(inner.rates.iter().find(|r| r.contains(at)).cloned())
    }

    fn close_active_and_open(&self, rate: Decimal, at: NaiveDateTime) -> StoreResult<HourlyRate> {
        let mut inner = self.lock()?;
        if let Some(active) = inner.rates.iter_mut().find(|r| r.is_active()) {
            // Closing before the active start would invert the interval
            // and overlap its predecessor.
            if at < active.start_date {
                return Err(StoreError::Integrity(format!(
                    "rate change at {} precedes the active interval's start {}",
                    at, active.start_date
                )));
            }
            active.end_date = Some(at);
        }
        let new_rate = HourlyRate {
            rate,
            start_date: at,
            end_date: None,
        };
        inner.rates.push(new_rate.clone());
        Ok(new_rate)
    }
}
