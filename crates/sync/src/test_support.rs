// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for gl-sync tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use gl_core::CheckinRecord;

use crate::api::{ApiError, ApiResult, CheckinApi, CheckinSubmission};

/// Scriptable in-memory API for testing without a real server.
pub struct MockApi {
    /// Registration ids whose submission fails.
    failing: Mutex<HashSet<String>>,
    /// Successfully accepted submissions, in arrival order.
    submitted: Mutex<Vec<CheckinSubmission>>,
    /// Artificial latency applied to every submission.
    delay: Mutex<Option<Duration>>,
}

impl MockApi {
    pub fn new() -> Self {
        MockApi {
            failing: Mutex::new(HashSet::new()),
            submitted: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        }
    }

    /// Make submissions for the given registration fail.
    pub fn fail_registration(&self, registration_id: &str) {
        self.failing
            .lock()
            .unwrap()
            .insert(registration_id.to_string());
    }

    /// Let previously failing registrations succeed again.
    pub fn clear_failures(&self) {
        self.failing.lock().unwrap().clear();
    }

    /// Delay every submission by the given duration.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// All submissions the mock accepted.
    pub fn submissions(&self) -> Vec<CheckinSubmission> {
        self.submitted.lock().unwrap().clone()
    }
}

impl CheckinApi for MockApi {
    fn submit(
        &self,
        submission: CheckinSubmission,
    ) -> Pin<Box<dyn Future<Output = ApiResult<()>> + Send + '_>> {
        Box::pin(async move {
            let delay = *self.delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if self
                .failing
                .lock()
                .unwrap()
                .contains(&submission.registration_id)
            {
                return Err(ApiError::Network("mock failure".to_string()));
            }
            self.submitted.lock().unwrap().push(submission);
            Ok(())
        })
    }
}

/// Create a record with deterministic identifiers and occurrence time.
pub fn make_record(n: u32) -> CheckinRecord {
    let occurred =
        Utc.with_ymd_and_hms(2025, 11, 2, 18, 30, 0).unwrap() + chrono::Duration::seconds(n.into());
    CheckinRecord::with_occurred_at(
        format!("reg-{n}"),
        format!("tkt-{n}"),
        format!("usr-{n}"),
        "evt-1",
        occurred,
    )
}
