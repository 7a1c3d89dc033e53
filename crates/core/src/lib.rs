// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! gl-core: Shared library for the gatelog check-in client
//!
//! This crate provides the check-in data model, the embedded SQLite store,
//! and the durable queue repository used by the gl-sync layer.

pub mod error;
pub mod queue;
pub mod record;
pub mod store;

pub use error::{Error, Result};
pub use queue::CheckinQueue;
pub use record::CheckinRecord;
pub use store::LocalStore;
