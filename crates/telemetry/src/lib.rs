//! Telemetry ingestion for the resolution hot path.
//!
//! The resolver hands each finished query or failed attempt to a
//! [`Recorder`]; the call applies the event to the live counters and
//! enqueues it for persistence without ever waiting on the database. A
//! single-writer [`TelemetrySink`] task drains the queue and flushes
//! batches to the event tables.

pub mod counters;
pub mod event;
pub mod recorder;

pub use counters::{LiveCounters, LiveCounterSet};
pub use event::{ErrorEvent, QueryEvent};
pub use recorder::{Recorder, TelemetrySink};
