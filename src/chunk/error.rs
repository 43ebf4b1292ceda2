//! Error types emitted by the chunking and reassembly layer.
//!
//! Reassembly failures are deliberately local: each one names the offending
//! chunk so the receiver can drop it, surface the condition, and keep
//! serving the remaining transfers.

use std::num::NonZeroUsize;

use bincode::error::EncodeError;
use thiserror::Error;

use super::{ChunkSequence, TransferId};

/// Errors produced while splitting outbound payloads.
#[derive(Debug, Error)]
pub enum ChunkingError {
    /// The configured MTU cannot carry any payload bytes.
    #[error("invalid mtu: {mtu} (must be at least 1)")]
    InvalidMtu { mtu: usize },
    /// The payload needs more chunks than the count field can express.
    #[error("payload of {len} bytes at mtu {mtu} exceeds the chunk count limit")]
    CountOverflow { len: usize, mtu: usize },
    /// Serialization failed before chunking.
    #[error("failed to encode message: {0}")]
    Encode(#[from] EncodeError),
}

/// Errors produced while folding inbound chunks back into payloads.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ReassemblyError {
    /// The chunk's position is impossible for its declared count.
    #[error(
        "transfer {transfer_id}: sequence {sequence} out of range for declared total {total}"
    )]
    SequenceOutOfRange {
        transfer_id: TransferId,
        sequence: ChunkSequence,
        total: u32,
    },
    /// The chunk declares a different count than the transfer established.
    #[error("transfer {transfer_id}: declared total {found} conflicts with established {expected}")]
    TotalMismatch {
        transfer_id: TransferId,
        expected: u32,
        found: u32,
    },
    /// Accepting the chunk would grow the transfer past the configured cap.
    #[error("transfer {transfer_id}: {attempted} buffered bytes exceed the {limit} byte cap")]
    TransferTooLarge {
        transfer_id: TransferId,
        attempted: usize,
        limit: NonZeroUsize,
    },
}
