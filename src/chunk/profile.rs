//! Channel capability hand-off consumed by the chunking layer.
//!
//! The transport layer owns capability probing; this module only models
//! what it hands over: a usable MTU and the delivery flags it discovered.
//! The chunking core trusts the MTU it is given and never probes anything
//! itself.

use std::{num::NonZeroUsize, time::Duration};

use super::ChunkingConfig;

/// Default maximum message size in bytes for data channels whose receiving
/// end may silently truncate larger messages. Kept below the 16 KiB
/// truncation threshold observed in several runtimes.
pub const DEFAULT_MTU: usize = 16_300;

/// Capabilities and limits reported by the transport for one channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelProfile {
    /// Largest message the channel delivers without truncation.
    pub mtu: NonZeroUsize,
    /// Whether the channel preserves message ordering.
    pub ordered: bool,
    /// Whether the channel carries binary payloads natively.
    pub binary: bool,
}

impl ChannelProfile {
    /// Create a profile from explicit capability values.
    #[must_use]
    pub const fn new(mtu: NonZeroUsize, ordered: bool, binary: bool) -> Self {
        Self {
            mtu,
            ordered,
            binary,
        }
    }

    /// Report whether `payload_len` bytes exceed the channel's MTU and
    /// therefore need chunked delivery.
    #[must_use]
    pub const fn requires_chunking(&self, payload_len: usize) -> bool {
        payload_len > self.mtu.get()
    }

    /// Derive a [`ChunkingConfig`] that fits this channel's MTU.
    ///
    /// Returns `None` when the MTU cannot accommodate the chunk envelope
    /// overhead.
    #[must_use]
    pub fn chunking_config(
        &self,
        max_transfer_size: NonZeroUsize,
        reassembly_timeout: Duration,
    ) -> Option<ChunkingConfig> {
        ChunkingConfig::for_frame_budget(self.mtu.get(), max_transfer_size, reassembly_timeout)
    }
}

impl Default for ChannelProfile {
    fn default() -> Self {
        let mtu = NonZeroUsize::new(DEFAULT_MTU)
            .unwrap_or_else(|| unreachable!("default mtu is non-zero"));
        Self::new(mtu, true, true)
    }
}
