// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check-in record data model.
//!
//! A [`CheckinRecord`] ties a registration, ticket, user, and event
//! together with an occurrence time. Records are captured locally first
//! and pushed to the remote service by the sync sweep.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single attendance event, persisted in the local check-in queue.
///
/// The four identifier fields are opaque references supplied by the
/// caller; this subsystem never validates them against remote state and
/// never mutates them after creation. The `synchronized` flag is
/// monotonic: it starts false and transitions to true exactly once, after
/// the remote service has confirmed the check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinRecord {
    /// Local identity assigned by the store on insert.
    /// `None` until the record has been persisted.
    pub local_id: Option<i64>,
    pub registration_id: String,
    pub ticket_id: String,
    pub user_id: String,
    pub event_id: String,
    /// When the physical check-in happened.
    pub occurred_at: DateTime<Utc>,
    /// When the row was written locally. Assigned by the store on insert.
    pub created_at: Option<DateTime<Utc>>,
    /// True once the remote service has confirmed this check-in.
    pub synchronized: bool,
}

impl CheckinRecord {
    /// Create a record for a check-in happening now.
    pub fn new(
        registration_id: impl Into<String>,
        ticket_id: impl Into<String>,
        user_id: impl Into<String>,
        event_id: impl Into<String>,
    ) -> Self {
        Self::with_occurred_at(registration_id, ticket_id, user_id, event_id, Utc::now())
    }

    /// Create a record with an explicit occurrence time.
    pub fn with_occurred_at(
        registration_id: impl Into<String>,
        ticket_id: impl Into<String>,
        user_id: impl Into<String>,
        event_id: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        CheckinRecord {
            local_id: None,
            registration_id: registration_id.into(),
            ticket_id: ticket_id.into(),
            user_id: user_id.into(),
            event_id: event_id.into(),
            occurred_at,
            created_at: None,
            synchronized: false,
        }
    }

    /// Returns true if the record has been persisted locally.
    pub fn is_persisted(&self) -> bool {
        self.local_id.is_some()
    }

    /// Returns true if the record is persisted but not yet confirmed by
    /// the remote service.
    pub fn is_pending(&self) -> bool {
        self.is_persisted() && !self.synchronized
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
