// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! gl-sync: offline synchronization for the gatelog check-in client
//!
//! Check-ins are always written to the durable local queue first
//! (gl-core). This crate decides the online/offline posture, performs the
//! opportunistic direct submission on capture, and drains the pending
//! queue to the remote service in bounded, interruptible sweeps.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐    ┌──────────────────┐    ┌─────────────┐
//! │ CheckinService │───►│  CheckinQueue    │    │   Remote    │
//! │ (write-ahead)  │    │  (gl-core)       │    │   Service   │
//! └───────┬────────┘    └────────▲─────────┘    └──────▲──────┘
//!         │                      │                     │
//!         │             ┌────────┴─────────┐    ┌──────┴──────┐
//!         └────────────►│ SyncCoordinator  │───►│ CheckinApi  │
//!                       │ (sweep)          │    │ (trait)     │
//!                       └────────▲─────────┘    └─────────────┘
//!                                │
//!                       ┌────────┴─────────┐
//!                       │ ConnectivityGate │
//!                       └──────────────────┘
//! ```

pub mod api;
pub mod cancel;
pub mod config;
pub mod coordinator;
pub mod gate;
pub mod service;

pub use api::{ApiError, ApiResult, CheckinApi, CheckinSubmission, HttpCheckinApi};
pub use cancel::CancelToken;
pub use config::{ApiConfig, ConfigError};
pub use coordinator::{SweepFailure, SweepOutcome, SweepSummary, SyncConfig, SyncCoordinator};
pub use gate::ConnectivityGate;
pub use service::{CheckinAck, CheckinService};

#[cfg(test)]
mod test_support;
