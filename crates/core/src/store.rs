// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed local store for the offline check-in queue.
//!
//! [`LocalStore`] owns the database file exclusively. The connection is
//! established lazily and transparently reopened after a `close`, and the
//! schema is created at most once per store instance. All access is
//! serialized through an internal mutex so one thread can capture new
//! check-ins while another runs the sync sweep.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::error::{Error, Result};

/// SQL schema for the check-in queue.
///
/// The index on `synchronized` keeps pending scans and counts efficient
/// as the table grows.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS checkin_queue (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    registration_id TEXT NOT NULL,
    ticket_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    event_id TEXT NOT NULL,
    occurred_at TEXT NOT NULL,
    synchronized INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_checkin_queue_sync ON checkin_queue(synchronized);
"#;

/// Where the store keeps its data.
#[derive(Debug, Clone)]
enum Backing {
    /// On-disk database file.
    File(PathBuf),
    /// In-memory database (for testing). Contents are lost on `close`.
    Memory,
}

/// Mutex-guarded connection state.
struct StoreState {
    conn: Option<Connection>,
    schema_applied: bool,
}

/// Durable, crash-safe storage for queued check-in rows.
pub struct LocalStore {
    backing: Backing,
    state: Mutex<StoreState>,
}

impl LocalStore {
    /// Create a store backed by the given database file.
    ///
    /// No I/O happens until [`open`](Self::open) or
    /// [`handle`](Self::handle) is called.
    pub fn new(path: &Path) -> Self {
        LocalStore {
            backing: Backing::File(path.to_path_buf()),
            state: Mutex::new(StoreState {
                conn: None,
                schema_applied: false,
            }),
        }
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> Self {
        LocalStore {
            backing: Backing::Memory,
            state: Mutex::new(StoreState {
                conn: None,
                schema_applied: false,
            }),
        }
    }

    /// Establish the underlying connection and create the schema if
    /// absent. Idempotent: calling on an already-open store is a no-op.
    pub fn open(&self) -> Result<()> {
        let mut state = self.lock()?;
        Self::ensure_open(&self.backing, &mut state)?;
        Ok(())
    }

    /// Return a live connection handle, transparently reopening if the
    /// previous connection was closed.
    pub fn handle(&self) -> Result<StoreHandle<'_>> {
        let mut state = self.lock()?;
        Self::ensure_open(&self.backing, &mut state)?;
        Ok(StoreHandle { guard: state })
    }

    /// Release the connection. Safe to call when already closed.
    pub fn close(&self) -> Result<()> {
        let mut state = self.lock()?;
        if state.conn.take().is_some() {
            tracing::debug!("local store closed");
        }
        if matches!(self.backing, Backing::Memory) {
            // A reopened in-memory database starts empty, so the schema
            // must be created again.
            state.schema_applied = false;
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|_| Error::StorageUnavailable("store lock poisoned".to_string()))
    }

    fn ensure_open<'a>(backing: &Backing, state: &'a mut StoreState) -> Result<&'a Connection> {
        if state.conn.is_none() {
            let conn = Self::connect(backing)?;
            if !state.schema_applied {
                conn.execute_batch(SCHEMA)
                    .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
                state.schema_applied = true;
                tracing::debug!("check-in queue schema verified");
            }
            state.conn = Some(conn);
        }
        match state.conn.as_ref() {
            Some(conn) => Ok(conn),
            None => Err(Error::StorageUnavailable(
                "connection missing after open".to_string(),
            )),
        }
    }

    fn connect(backing: &Backing) -> Result<Connection> {
        match backing {
            Backing::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)
                            .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
                    }
                }
                let conn = Connection::open(path)
                    .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
                // WAL mode lets the sweep read while a capture thread writes.
                conn.execute_batch(
                    "PRAGMA journal_mode = WAL;
                     PRAGMA busy_timeout = 5000;",
                )
                .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
                tracing::debug!(path = %path.display(), "local store opened");
                Ok(conn)
            }
            Backing::Memory => {
                Connection::open_in_memory().map_err(|e| Error::StorageUnavailable(e.to_string()))
            }
        }
    }
}

/// A live connection guard handed out by [`LocalStore::handle`].
///
/// Holds the store lock for its lifetime; drop it promptly.
pub struct StoreHandle<'a> {
    guard: MutexGuard<'a, StoreState>,
}

impl Deref for StoreHandle<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        match self.guard.conn.as_ref() {
            Some(conn) => conn,
            // ensure_open ran before this guard was constructed.
            None => unreachable!("store handle without open connection"),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
