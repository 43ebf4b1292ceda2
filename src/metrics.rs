//! Metric helpers for `chunkwire`.
//!
//! This module defines metric names and small helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. With the `metrics` feature
//! disabled the helpers compile to no-ops so call sites stay unconditional.

#[cfg(feature = "metrics")]
use metrics::counter;

/// Name of the counter tracking emitted chunks.
pub const CHUNKS_EMITTED: &str = "chunkwire_chunks_emitted_total";
/// Name of the counter tracking completed transfers.
pub const TRANSFERS_COMPLETED: &str = "chunkwire_transfers_completed_total";
/// Name of the counter tracking rejected chunks, labelled by reason.
pub const CHUNKS_REJECTED: &str = "chunkwire_chunks_rejected_total";
/// Name of the counter tracking evicted stalled transfers.
pub const TRANSFERS_EVICTED: &str = "chunkwire_transfers_evicted_total";

/// Record chunks produced by one chunking call.
#[cfg(feature = "metrics")]
pub fn inc_chunks_emitted(count: u64) { counter!(CHUNKS_EMITTED).increment(count); }

#[cfg(not(feature = "metrics"))]
pub fn inc_chunks_emitted(_count: u64) {}

/// Record a completed transfer.
#[cfg(feature = "metrics")]
pub fn inc_transfers_completed() { counter!(TRANSFERS_COMPLETED).increment(1); }

#[cfg(not(feature = "metrics"))]
pub fn inc_transfers_completed() {}

/// Record a rejected chunk with the reason label.
#[cfg(feature = "metrics")]
pub fn inc_chunks_rejected(reason: &'static str) {
    counter!(CHUNKS_REJECTED, "reason" => reason).increment(1);
}

#[cfg(not(feature = "metrics"))]
pub fn inc_chunks_rejected(_reason: &'static str) {}

/// Record transfers evicted by a purge sweep.
#[cfg(feature = "metrics")]
pub fn inc_transfers_evicted(count: u64) { counter!(TRANSFERS_EVICTED).increment(count); }

#[cfg(not(feature = "metrics"))]
pub fn inc_transfers_evicted(_count: u64) {}
