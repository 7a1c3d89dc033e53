// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync coordinator draining the pending queue to the remote service.
//!
//! A sweep is one pass over the current pending snapshot: each record is
//! submitted in FIFO order with a bounded timeout, successes are marked
//! synchronized, failures stay pending for the next sweep. The
//! coordinator owns no scheduling; callers invoke [`SyncCoordinator::sweep`]
//! on demand or from a timer.

use std::sync::Arc;
use std::time::Duration;

use gl_core::{CheckinQueue, Result};

use crate::api::{ApiError, CheckinApi, CheckinSubmission};
use crate::cancel::CancelToken;
use crate::gate::ConnectivityGate;

/// Tuning for the sync sweep.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Maximum time to wait for a single submission. A timeout counts as
    /// a per-record failure, not a fatal abort.
    pub submit_timeout: Duration,
    /// Purge synchronized rows at the end of each pass.
    pub purge_after_sweep: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            submit_timeout: Duration::from_secs(6),
            purge_after_sweep: true,
        }
    }
}

/// One failed submission inside a sweep.
#[derive(Debug, Clone)]
pub struct SweepFailure {
    pub local_id: i64,
    pub reason: String,
}

/// Counters for one completed sweep.
///
/// Returned as data so the caller decides what to log or alert on; a
/// partial-failure batch is the expected common case, not an exception.
#[derive(Debug, Clone, Default)]
pub struct SweepSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<SweepFailure>,
    /// Synchronized rows reclaimed at the end of the pass.
    pub purged: usize,
    /// True when the sweep stopped early on a cancellation request.
    pub cancelled: bool,
}

/// Result of invoking a sweep.
#[derive(Debug, Clone)]
pub enum SweepOutcome {
    /// The connectivity gate reported offline; zero records attempted
    /// and the pending set is unchanged.
    SkippedOffline,
    Completed(SweepSummary),
}

/// Orchestrates reconciliation of the local queue with the remote
/// service.
pub struct SyncCoordinator {
    queue: CheckinQueue,
    gate: ConnectivityGate,
    api: Arc<dyn CheckinApi>,
    config: SyncConfig,
}

impl SyncCoordinator {
    pub fn new(
        queue: CheckinQueue,
        gate: ConnectivityGate,
        api: Arc<dyn CheckinApi>,
        config: SyncConfig,
    ) -> Self {
        SyncCoordinator {
            queue,
            gate,
            api,
            config,
        }
    }

    /// Run one sweep without external cancellation.
    pub async fn sweep(&self) -> Result<SweepOutcome> {
        self.sweep_with(&CancelToken::new()).await
    }

    /// Run one sweep, checking the cancellation token between records.
    ///
    /// Storage faults propagate as errors; submission faults are
    /// aggregated into the returned [`SweepSummary`].
    pub async fn sweep_with(&self, cancel: &CancelToken) -> Result<SweepOutcome> {
        if !self.gate.is_online() {
            tracing::debug!("sweep skipped: offline");
            return Ok(SweepOutcome::SkippedOffline);
        }

        let pending = self.queue.pending()?;
        let mut summary = SweepSummary::default();

        for record in pending {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }
            let Some(local_id) = record.local_id else {
                continue;
            };

            summary.attempted += 1;
            match self.submit_bounded(CheckinSubmission::from(&record)).await {
                Ok(()) => {
                    self.queue.mark_synchronized(local_id)?;
                    summary.succeeded += 1;
                    tracing::info!(local_id, event_id = %record.event_id, "check-in synchronized");
                }
                Err(err) => {
                    // The record stays pending; one bad record must not
                    // block the rest of the batch.
                    summary.failed += 1;
                    tracing::warn!(local_id, error = %err, "check-in submission failed");
                    summary.failures.push(SweepFailure {
                        local_id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        if self.config.purge_after_sweep {
            summary.purged = self.queue.purge_synchronized()?;
        }

        tracing::info!(
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            purged = summary.purged,
            cancelled = summary.cancelled,
            "sweep finished"
        );
        Ok(SweepOutcome::Completed(summary))
    }

    async fn submit_bounded(&self, submission: CheckinSubmission) -> crate::api::ApiResult<()> {
        match tokio::time::timeout(self.config.submit_timeout, self.api.submit(submission)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout),
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
