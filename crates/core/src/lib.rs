//! Shared domain types for the Warden resolver backend.
//!
//! This crate has no I/O: it holds the wire-level type vocabulary
//! (timestamps, transports), the domain error taxonomy, the pagination
//! engine, and blocklist domain normalization.

pub mod domain;
pub mod error;
pub mod page;
pub mod types;
