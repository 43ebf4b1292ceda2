//! Configuration that bounds chunk sizes and reassembly resource usage.

use std::{num::NonZeroUsize, time::Duration};

use super::chunk_overhead;

/// Settings shared by one chunking/reassembly pairing.
#[derive(Clone, Copy, Debug)]
pub struct ChunkingConfig {
    /// Maximum number of payload bytes carried by a single chunk. The
    /// encoded chunk additionally carries marker and header overhead; use
    /// [`ChunkingConfig::for_frame_budget`] to keep the final size within a
    /// transport's message ceiling.
    pub chunk_payload_cap: NonZeroUsize,
    /// Hard cap on a fully reassembled payload's size.
    pub max_transfer_size: NonZeroUsize,
    /// Duration after which incomplete transfers are evicted.
    pub reassembly_timeout: Duration,
}

/// Slack reserved for the transport's own framing around an encoded chunk,
/// such as a length prefix added below this layer.
const ENVELOPE_GUARD_BYTES: usize = 16;

impl ChunkingConfig {
    /// Derive a configuration from the largest message the transport will
    /// deliver intact.
    ///
    /// `frame_budget` should reflect the channel's usable MTU. The returned
    /// configuration leaves room for the chunk marker, header, and guard
    /// slack, so every encoded chunk fits the budget.
    ///
    /// Returns `None` when the budget cannot accommodate the fixed overhead.
    #[must_use]
    pub fn for_frame_budget(
        frame_budget: usize,
        max_transfer_size: NonZeroUsize,
        reassembly_timeout: Duration,
    ) -> Option<Self> {
        let overhead = chunk_overhead().get() + ENVELOPE_GUARD_BYTES;
        let available = frame_budget.checked_sub(overhead)?;
        Some(Self {
            chunk_payload_cap: NonZeroUsize::new(available)?,
            max_transfer_size,
            reassembly_timeout,
        })
    }

    /// Largest encoded chunk this configuration can produce.
    #[must_use]
    pub fn encoded_chunk_ceiling(&self) -> usize {
        self.chunk_payload_cap.get() + chunk_overhead().get()
    }
}
