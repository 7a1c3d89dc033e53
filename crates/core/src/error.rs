// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for gl-core operations.

use thiserror::Error;

/// All possible errors that can occur in gl-core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The backing database file could not be opened or reopened.
    /// Fatal to any operation requiring persistence.
    #[error("local store unavailable: {0}")]
    StorageUnavailable(String),

    /// A single storage operation failed though the store is reachable.
    #[error("storage operation failed: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for gl-core operations.
pub type Result<T> = std::result::Result<T, Error>;
