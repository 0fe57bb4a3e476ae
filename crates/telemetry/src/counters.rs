//! Live aggregate counters, sharded to keep concurrent resolution workers
//! off each other's cache lines and off the admin read path.
//!
//! Each event is applied wholly under one shard's lock, so a snapshot can
//! never observe a half-applied event (a `total` increment whose
//! `sum_duration_ms` has not landed yet). A snapshot folds the shards one
//! at a time; it holds no shard lock longer than the copy of one cell.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::Serialize;
use warden_core::types::{now_ms, UnixMillis};

use crate::event::{ErrorEvent, QueryEvent};

/// Shard count; a small power of two is plenty for the worker counts a
/// single resolver node runs.
const SHARDS: usize = 8;

#[derive(Debug, Default)]
struct CounterCell {
    total: u64,
    blocked: u64,
    cached: u64,
    errors: u64,
    sum_duration_ms: u64,
}

/// Point-in-time view of the live counters.
///
/// Volatile: reset on process restart. `live_since` is the process start
/// time and is the baseline for uptime display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveCounters {
    pub total: u64,
    pub blocked: u64,
    pub cached: u64,
    pub errors: u64,
    pub sum_duration_ms: u64,
    pub live_since: UnixMillis,
}

/// Sharded accumulator; the sole owner of live counter state.
pub struct LiveCounterSet {
    shards: Vec<Mutex<CounterCell>>,
    next_shard: AtomicUsize,
    live_since: UnixMillis,
}

impl LiveCounterSet {
    /// Create an empty counter set with `live_since` = now.
    pub fn new() -> Self {
        Self {
            shards: (0..SHARDS).map(|_| Mutex::new(CounterCell::default())).collect(),
            next_shard: AtomicUsize::new(0),
            live_since: now_ms(),
        }
    }

    fn shard(&self) -> &Mutex<CounterCell> {
        let i = self.next_shard.fetch_add(1, Ordering::Relaxed);
        &self.shards[i % SHARDS]
    }

    /// Apply one resolved query. `blocked` and `cache_hit` are counted
    /// independently; they are not mutually exclusive.
    pub fn apply_query(&self, event: &QueryEvent) {
        let mut cell = self.shard().lock().unwrap();
        cell.total += 1;
        cell.sum_duration_ms += event.dur_ms;
        if event.blocked {
            cell.blocked += 1;
        }
        if event.cache_hit {
            cell.cached += 1;
        }
    }

    /// Apply one failed resolution attempt.
    pub fn apply_error(&self, _event: &ErrorEvent) {
        let mut cell = self.shard().lock().unwrap();
        cell.errors += 1;
    }

    /// Fold the shards into a consistent point-in-time view.
    pub fn snapshot(&self) -> LiveCounters {
        let mut out = LiveCounters {
            total: 0,
            blocked: 0,
            cached: 0,
            errors: 0,
            sum_duration_ms: 0,
            live_since: self.live_since,
        };
        for shard in &self.shards {
            let cell = shard.lock().unwrap();
            out.total += cell.total;
            out.blocked += cell.blocked;
            out.cached += cell.cached;
            out.errors += cell.errors;
            out.sum_duration_ms += cell.sum_duration_ms;
        }
        out
    }
}

impl Default for LiveCounterSet {
    fn default() -> Self {
        Self::new()
    }
}
