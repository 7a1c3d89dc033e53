// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead check-in capture flow.
//!
//! Every check-in is written to the durable queue before any network
//! attempt. When the gate reports online the service additionally tries
//! one immediate submission so the common case never waits for a sweep.

use std::sync::Arc;
use std::time::Duration;

use gl_core::{CheckinQueue, CheckinRecord, Result};

use crate::api::{CheckinApi, CheckinSubmission};
use crate::gate::ConnectivityGate;

/// Outcome of recording a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckinAck {
    /// Identity assigned by the local store.
    pub local_id: i64,
    /// True when the record was also accepted remotely in the same call;
    /// false means it is queued for the next sweep.
    pub synchronized: bool,
}

/// Captures check-ins with write-ahead durability.
pub struct CheckinService {
    queue: CheckinQueue,
    gate: ConnectivityGate,
    api: Arc<dyn CheckinApi>,
    submit_timeout: Duration,
}

impl CheckinService {
    pub fn new(
        queue: CheckinQueue,
        gate: ConnectivityGate,
        api: Arc<dyn CheckinApi>,
        submit_timeout: Duration,
    ) -> Self {
        CheckinService {
            queue,
            gate,
            api,
            submit_timeout,
        }
    }

    /// Durably queue a check-in, then opportunistically submit it when
    /// the gate reports online.
    ///
    /// Storage faults propagate immediately: the caller must know
    /// synchronously whether the check-in was durably queued. A failed
    /// or timed-out direct submission is not an error; the record stays
    /// pending and the ack says so.
    pub async fn record_checkin(&self, record: &CheckinRecord) -> Result<CheckinAck> {
        let local_id = self.queue.insert(record)?;

        if !self.gate.is_online() {
            return Ok(CheckinAck {
                local_id,
                synchronized: false,
            });
        }

        let submission = CheckinSubmission::from(record);
        match tokio::time::timeout(self.submit_timeout, self.api.submit(submission)).await {
            Ok(Ok(())) => {
                self.queue.mark_synchronized(local_id)?;
                Ok(CheckinAck {
                    local_id,
                    synchronized: true,
                })
            }
            Ok(Err(err)) => {
                tracing::warn!(local_id, error = %err, "direct submission failed; queued");
                Ok(CheckinAck {
                    local_id,
                    synchronized: false,
                })
            }
            Err(_) => {
                tracing::warn!(local_id, "direct submission timed out; queued");
                Ok(CheckinAck {
                    local_id,
                    synchronized: false,
                })
            }
        }
    }

    /// Number of check-ins waiting for the next sweep.
    pub fn pending_count(&self) -> Result<i64> {
        self.queue.count_pending()
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
