// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity gate deciding the online/offline posture.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Decides, per attempted operation, whether the system should be
/// treated as online.
///
/// This is a deliberately simple forced-offline override: a synchronous
/// boolean answer with no side effects. Deployments that want real
/// reachability probing can layer it behind the same contract. Clones
/// share the same flag, so a gate handed to the sweep scheduler and one
/// held by an operator console stay in agreement.
#[derive(Debug, Clone, Default)]
pub struct ConnectivityGate {
    forced_offline: Arc<AtomicBool>,
}

impl ConnectivityGate {
    /// Create a gate that assumes online.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current posture: true unless offline has been forced.
    pub fn is_online(&self) -> bool {
        !self.forced_offline.load(Ordering::SeqCst)
    }

    /// Administrative override for operators and tests to simulate
    /// connectivity loss. Takes effect for subsequent
    /// [`is_online`](Self::is_online) calls; in-flight operations are
    /// not affected.
    pub fn set_forced_offline(&self, forced: bool) {
        self.forced_offline.store(forced, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
