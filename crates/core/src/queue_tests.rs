// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the check-in queue repository.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tempfile::tempdir;
use yare::parameterized;

use super::CheckinQueue;
use crate::record::CheckinRecord;
use crate::store::LocalStore;

fn memory_queue() -> CheckinQueue {
    CheckinQueue::new(Arc::new(LocalStore::in_memory()))
}

fn make_record(n: u32) -> CheckinRecord {
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

#[test]
fn test_insert_returns_increasing_ids() {
    let queue = memory_queue();

    let a = queue.insert(&make_record(1)).unwrap();
    let b = queue.insert(&make_record(2)).unwrap();

    assert!(b > a);
}

#[test]
fn test_insert_is_durable_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("checkins.db");

    let record = make_record(1);
    {
        let queue = CheckinQueue::new(Arc::new(LocalStore::new(&path)));
        queue.insert(&record).unwrap();
    }

    // Simulated process restart: a fresh store over the same file.
    let queue = CheckinQueue::new(Arc::new(LocalStore::new(&path)));
    let pending = queue.pending().unwrap();

    assert_eq!(pending.len(), 1);
    let restored = &pending[0];
    assert_eq!(restored.registration_id, record.registration_id);
    assert_eq!(restored.ticket_id, record.ticket_id);
    assert_eq!(restored.user_id, record.user_id);
    assert_eq!(restored.event_id, record.event_id);
    assert_eq!(restored.occurred_at, record.occurred_at);
    assert!(!restored.synchronized);
    assert!(restored.local_id.is_some());
    assert!(restored.created_at.is_some());
}

#[test]
fn test_pending_empty_when_nothing_queued() {
    let queue = memory_queue();

    assert!(queue.pending().unwrap().is_empty());
    assert_eq!(queue.count_pending().unwrap(), 0);
}

#[test]
fn test_pending_returns_fifo_order() {
    let queue = memory_queue();

    let a = queue.insert(&make_record(1)).unwrap();
    let b = queue.insert(&make_record(2)).unwrap();
    let c = queue.insert(&make_record(3)).unwrap();

    let pending = queue.pending().unwrap();
    let ids: Vec<i64> = pending.iter().filter_map(|r| r.local_id).collect();
    assert_eq!(ids, vec![a, b, c]);
}

#[parameterized(
    none = { 0 },
    one = { 1 },
    several = { 5 },
)]
fn test_count_pending_matches_inserts(count: u32) {
    let queue = memory_queue();

    for n in 0..count {
        queue.insert(&make_record(n)).unwrap();
    }

    assert_eq!(queue.count_pending().unwrap(), i64::from(count));
    assert_eq!(queue.pending().unwrap().len(), count as usize);
}

#[test]
fn test_mark_synchronized_removes_from_pending() {
    let queue = memory_queue();

    let id = queue.insert(&make_record(1)).unwrap();
    queue.insert(&make_record(2)).unwrap();

    assert!(queue.mark_synchronized(id).unwrap());

    let pending = queue.pending().unwrap();
    assert_eq!(pending.len(), 1);
    assert!(pending.iter().all(|r| r.local_id != Some(id)));
}

#[test]
fn test_mark_synchronized_is_monotonic() {
    let queue = memory_queue();
    let id = queue.insert(&make_record(1)).unwrap();

    assert!(queue.mark_synchronized(id).unwrap());
    // Second invocation is a no-op on an already-synchronized row.
    assert!(!queue.mark_synchronized(id).unwrap());

    let all = queue.all().unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].synchronized);
}

#[test]
fn test_mark_synchronized_unknown_id_returns_false() {
    let queue = memory_queue();

    assert!(!queue.mark_synchronized(999).unwrap());
}

#[test]
fn test_purge_never_reduces_pending_count() {
    let queue = memory_queue();

    let a = queue.insert(&make_record(1)).unwrap();
    queue.insert(&make_record(2)).unwrap();
    queue.insert(&make_record(3)).unwrap();
    queue.mark_synchronized(a).unwrap();

    let pending_before = queue.count_pending().unwrap();
    let purged = queue.purge_synchronized().unwrap();
    let pending_after = queue.count_pending().unwrap();

    assert_eq!(purged, 1);
    assert_eq!(pending_before, pending_after);
    assert_eq!(queue.all().unwrap().len(), 2);
}

#[test]
fn test_purge_on_empty_queue() {
    let queue = memory_queue();

    assert_eq!(queue.purge_synchronized().unwrap(), 0);
}

#[test]
fn test_all_returns_newest_first() {
    let queue = memory_queue();

    let a = queue.insert(&make_record(1)).unwrap();
    let b = queue.insert(&make_record(2)).unwrap();
    queue.mark_synchronized(a).unwrap();

    let all = queue.all().unwrap();
    assert_eq!(all.len(), 2);
    // Same created_at resolution can tie; the id tiebreak keeps the
    // later insert first.
    assert_eq!(all[0].local_id, Some(b));
    assert_eq!(all[1].local_id, Some(a));
}

#[test]
fn test_concurrent_inserts_from_multiple_threads() {
    let dir = tempdir().unwrap();
    let store = Arc::new(LocalStore::new(&dir.path().join("checkins.db")));
    store.open().unwrap();

    let mut handles = Vec::new();
    for t in 0..4 {
        let queue = CheckinQueue::new(Arc::clone(&store));
        handles.push(std::thread::spawn(move || {
            for n in 0..25 {
                queue.insert(&make_record(t * 100 + n)).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let queue = CheckinQueue::new(store);
    assert_eq!(queue.count_pending().unwrap(), 100);

    // Local ids are unique even under concurrent insertion.
    let mut ids: Vec<i64> = queue
        .pending()
        .unwrap()
        .iter()
        .filter_map(|r| r.local_id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 100);
}
