//! Non-blocking event recording and the single-writer persistence sink.
//!
//! [`Recorder`] is the handle the resolution path holds. Recording an
//! event applies it to the live counters synchronously (so a snapshot
//! taken afterwards observes it) and then `try_send`s it into a bounded
//! queue. A full or closed queue drops the event: resolution correctness
//! never depends on telemetry durability. Drops are counted and logged.
//!
//! [`TelemetrySink`] owns the receiving end: it batches events and
//! flushes them to the event tables on a periodic tick, when a batch
//! fills, and once more on shutdown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::time::{self, MissedTickBehavior};
use warden_db::repositories::{ErrorLogRepo, QueryLogRepo};
use warden_db::DbPool;

use crate::counters::{LiveCounterSet, LiveCounters};
use crate::event::{ErrorEvent, QueryEvent};

/// Flush whatever is buffered at least this often.
const FLUSH_INTERVAL: Duration = Duration::from_secs(5);

/// Flush early once a batch reaches this size.
const BATCH_FLUSH_THRESHOLD: usize = 256;

enum TelemetryMessage {
    Query(QueryEvent),
    Error(ErrorEvent),
    Shutdown,
}

/// Cloneable recording handle held by resolution workers and the admin
/// stats endpoint.
#[derive(Clone)]
pub struct Recorder {
    tx: Sender<TelemetryMessage>,
    counters: Arc<LiveCounterSet>,
    dropped: Arc<AtomicU64>,
}

impl Recorder {
    /// Record a resolved query. Never blocks and never fails the caller.
    pub fn record_query(&self, event: QueryEvent) {
        self.counters.apply_query(&event);
        self.enqueue(TelemetryMessage::Query(event));
    }

    /// Record a failed resolution attempt. Never blocks and never fails
    /// the caller.
    pub fn record_error(&self, event: ErrorEvent) {
        self.counters.apply_error(&event);
        self.enqueue(TelemetryMessage::Error(event));
    }

    /// Consistent point-in-time view of the live counters.
    pub fn snapshot(&self) -> LiveCounters {
        self.counters.snapshot()
    }

    /// Number of events dropped because the persistence queue was full or
    /// the sink had shut down.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Ask the sink to flush remaining events and stop.
    pub fn shutdown(&self) {
        let _ = self.tx.try_send(TelemetryMessage::Shutdown);
    }

    fn enqueue(&self, msg: TelemetryMessage) {
        if self.tx.try_send(msg).is_err() {
            let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            // Log sparsely; at line rate a full queue would otherwise
            // flood the log with one line per query.
            if dropped == 1 || dropped % 1_000 == 0 {
                tracing::warn!(dropped, "telemetry queue full, dropping events");
            }
        }
    }
}

/// Single writer draining the telemetry queue into the database.
pub struct TelemetrySink {
    pool: DbPool,
    rx: Receiver<TelemetryMessage>,
    query_batch: Vec<QueryEvent>,
    error_batch: Vec<ErrorEvent>,
}

impl TelemetrySink {
    /// Build a recorder/sink pair over a queue of `capacity` events.
    pub fn new(pool: DbPool, capacity: usize) -> (Recorder, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        let recorder = Recorder {
            tx,
            counters: Arc::new(LiveCounterSet::new()),
            dropped: Arc::new(AtomicU64::new(0)),
        };
        let sink = Self {
            pool,
            rx,
            query_batch: Vec::with_capacity(BATCH_FLUSH_THRESHOLD),
            error_batch: Vec::with_capacity(BATCH_FLUSH_THRESHOLD),
        };
        (recorder, sink)
    }

    /// Drain the queue until shutdown, flushing on a timer and on batch
    /// pressure. Flushes once more before returning.
    pub async fn run(mut self) {
        tracing::info!("telemetry sink running");

        let mut tick = time::interval(FLUSH_INTERVAL);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tick.tick().await;

        loop {
            tokio::select! {
                _ = tick.tick() => self.flush().await,
                msg = self.rx.recv() => match msg {
                    None | Some(TelemetryMessage::Shutdown) => {
                        tracing::info!("telemetry sink shutting down");
                        self.flush().await;
                        return;
                    }
                    Some(TelemetryMessage::Query(event)) => {
                        self.query_batch.push(event);
                        if self.query_batch.len() >= BATCH_FLUSH_THRESHOLD {
                            self.flush().await;
                        }
                    }
                    Some(TelemetryMessage::Error(event)) => {
                        self.error_batch.push(event);
                        if self.error_batch.len() >= BATCH_FLUSH_THRESHOLD {
                            self.flush().await;
                        }
                    }
                },
            }
        }
    }

    /// Write both batches out. A failed flush drops the batch: the hot
    /// path must not observe persistence failures, so they are logged and
    /// the sink keeps going.
    async fn flush(&mut self) {
        if !self.query_batch.is_empty() {
            let rows: Vec<_> = self.query_batch.drain(..).map(QueryEvent::into_row).collect();
            match QueryLogRepo::batch_insert(&self.pool, &rows).await {
                Ok(()) => tracing::debug!(count = rows.len(), "flushed query events"),
                Err(e) => {
                    tracing::error!(count = rows.len(), error = %e, "failed to flush query events")
                }
            }
        }

        if !self.error_batch.is_empty() {
            let rows: Vec<_> = self.error_batch.drain(..).map(ErrorEvent::into_row).collect();
            match ErrorLogRepo::batch_insert(&self.pool, &rows).await {
                Ok(()) => tracing::debug!(count = rows.len(), "flushed error events"),
                Err(e) => {
                    tracing::error!(count = rows.len(), error = %e, "failed to flush error events")
                }
            }
        }
    }
}
