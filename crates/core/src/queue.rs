// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed repository over the durable check-in queue.
//!
//! [`CheckinQueue`] is the only component that touches the
//! `checkin_queue` table. Every storage fault surfaces as
//! [`Error::Persistence`](crate::error::Error::Persistence) so the caller
//! always knows whether a record is durable.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::error::Result;
use crate::record::CheckinRecord;
use crate::store::LocalStore;

const RECORD_COLUMNS: &str =
    "id, registration_id, ticket_id, user_id, event_id, occurred_at, synchronized, created_at";

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(crate::error::Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

fn record_from_row(row: &Row<'_>) -> std::result::Result<CheckinRecord, rusqlite::Error> {
    let occurred: String = row.get(5)?;
    let synchronized: i64 = row.get(6)?;
    let created: String = row.get(7)?;

    Ok(CheckinRecord {
        local_id: Some(row.get(0)?),
        registration_id: row.get(1)?,
        ticket_id: row.get(2)?,
        user_id: row.get(3)?,
        event_id: row.get(4)?,
        occurred_at: parse_timestamp(&occurred, "occurred_at")?,
        synchronized: synchronized != 0,
        created_at: Some(parse_timestamp(&created, "created_at")?),
    })
}

/// Typed access layer over [`LocalStore`] for queued check-ins.
///
/// Cloneable; clones share the same store.
#[derive(Clone)]
pub struct CheckinQueue {
    store: Arc<LocalStore>,
}

impl CheckinQueue {
    /// Create a queue over the given store.
    pub fn new(store: Arc<LocalStore>) -> Self {
        CheckinQueue { store }
    }

    /// Persist a new record with `synchronized = false` and return the
    /// assigned local identity.
    ///
    /// The record is not durable unless this call returns the identity.
    pub fn insert(&self, record: &CheckinRecord) -> Result<i64> {
        let handle = self.store.handle()?;
        handle.execute(
            "INSERT INTO checkin_queue
             (registration_id, ticket_id, user_id, event_id, occurred_at, synchronized, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
            params![
                record.registration_id,
                record.ticket_id,
                record.user_id,
                record.event_id,
                record.occurred_at.to_rfc3339(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        let local_id = handle.last_insert_rowid();
        tracing::debug!(local_id, event_id = %record.event_id, "check-in queued");
        Ok(local_id)
    }

    /// All rows not yet confirmed by the remote service, in insertion
    /// order (ascending local id) for FIFO-biased retry.
    pub fn pending(&self) -> Result<Vec<CheckinRecord>> {
        let handle = self.store.handle()?;
        let mut stmt = handle.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM checkin_queue WHERE synchronized = 0 ORDER BY id ASC"
        ))?;

        let records = stmt
            .query_map([], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Number of rows with `synchronized = false`.
    pub fn count_pending(&self) -> Result<i64> {
        let handle = self.store.handle()?;
        let count: i64 = handle.query_row(
            "SELECT COUNT(*) FROM checkin_queue WHERE synchronized = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Set the synchronized flag for exactly one pending row.
    ///
    /// Returns false when `local_id` is unknown or already synchronized;
    /// the flag never reverts once set.
    pub fn mark_synchronized(&self, local_id: i64) -> Result<bool> {
        let handle = self.store.handle()?;
        let affected = handle.execute(
            "UPDATE checkin_queue SET synchronized = 1 WHERE id = ?1 AND synchronized = 0",
            params![local_id],
        )?;
        if affected > 0 {
            tracing::debug!(local_id, "check-in marked synchronized");
        }
        Ok(affected > 0)
    }

    /// Delete all synchronized rows and return how many were removed.
    ///
    /// Pending rows are never deleted, not even transiently.
    pub fn purge_synchronized(&self) -> Result<usize> {
        let handle = self.store.handle()?;
        let deleted = handle.execute("DELETE FROM checkin_queue WHERE synchronized = 1", [])?;
        if deleted > 0 {
            tracing::debug!(deleted, "synchronized check-ins purged");
        }
        Ok(deleted)
    }

    /// Diagnostic read of every row regardless of state, newest first.
    ///
    /// For operator inspection only; the sync path uses
    /// [`pending`](Self::pending).
    pub fn all(&self) -> Result<Vec<CheckinRecord>> {
        let handle = self.store.handle()?;
        let mut stmt = handle.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM checkin_queue ORDER BY created_at DESC, id DESC"
        ))?;

        let records = stmt
            .query_map([], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
