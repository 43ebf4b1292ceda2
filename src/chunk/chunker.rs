//! Outbound helper that splits oversized payloads into MTU-sized chunks.
//!
//! [`Chunker`] walks a byte buffer in MTU strides and tags every slice with
//! a [`ChunkHeader`] carrying a fresh [`TransferId`] plus the slice's
//! position and the transfer's total chunk count. The identifier counter is
//! owned by the instance, so callers never co-ordinate id allocation
//! themselves.

use std::{
    num::NonZeroUsize,
    sync::atomic::{AtomicU64, Ordering},
};

use super::{ChunkHeader, ChunkSequence, ChunkingError, TransferId};
use crate::message::Message;

/// Splits opaque byte buffers into transport-safe chunk frames.
#[derive(Debug)]
pub struct Chunker {
    mtu: NonZeroUsize,
    next_transfer_id: AtomicU64,
}

impl Chunker {
    /// First identifier handed out by a fresh chunker.
    const INITIAL_TRANSFER_ID: TransferId = TransferId::new(1);

    /// Create a chunker that caps chunk payloads at `mtu` bytes.
    #[must_use]
    pub const fn new(mtu: NonZeroUsize) -> Self {
        Self::with_starting_id(mtu, Self::INITIAL_TRANSFER_ID)
    }

    /// Create a chunker from a raw MTU value.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidMtu`] when `mtu` is zero. A zero MTU
    /// is a caller programming error and is surfaced immediately rather than
    /// producing an unusable instance.
    pub fn with_mtu(mtu: usize) -> Result<Self, ChunkingError> {
        NonZeroUsize::new(mtu)
            .map(Self::new)
            .ok_or(ChunkingError::InvalidMtu { mtu })
    }

    /// Create a chunker whose identifier counter starts at `start_at`.
    #[must_use]
    pub const fn with_starting_id(mtu: NonZeroUsize, start_at: TransferId) -> Self {
        Self {
            mtu,
            next_transfer_id: AtomicU64::new(start_at.get()),
        }
    }

    /// Return the maximum chunk payload size in bytes.
    #[must_use]
    pub const fn mtu(&self) -> NonZeroUsize { self.mtu }

    /// Allocate and return the next [`TransferId`].
    ///
    /// Each call consumes one identifier, so ids stay unique for the
    /// lifetime of the chunker even when it is shared across threads.
    ///
    /// # Panics
    ///
    /// Panics if the identifier counter reaches `u64::MAX` and overflows.
    #[must_use]
    pub fn next_transfer_id(&self) -> TransferId {
        let previous = self
            .next_transfer_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                current.checked_add(1)
            })
            .unwrap_or_else(|_| panic!("transfer id counter exhausted"));
        TransferId::new(previous)
    }

    /// Serialize `message` and split the bytes into chunks.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::Encode`] if serialization fails, or
    /// [`ChunkingError::CountOverflow`] if the chunk count would not fit the
    /// header's count field.
    pub fn chunk_message<M: Message>(&self, message: &M) -> Result<ChunkBatch, ChunkingError> {
        let bytes = message.to_bytes()?;
        self.chunk_bytes(bytes)
    }

    /// Split `payload` into chunks, allocating a fresh [`TransferId`].
    ///
    /// The identifier counter advances exactly once per call regardless of
    /// how many chunks the payload needs. An empty payload still yields one
    /// zero-length chunk so the transfer stays representable on the wire.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::CountOverflow`] if the payload needs more
    /// than `u32::MAX` chunks.
    pub fn chunk_bytes(&self, payload: impl AsRef<[u8]>) -> Result<ChunkBatch, ChunkingError> {
        let transfer_id = self.next_transfer_id();
        self.chunk_with_id(transfer_id, payload.as_ref())
    }

    /// Split `payload` into chunks tagged with an explicit `transfer_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::CountOverflow`] if the payload needs more
    /// than `u32::MAX` chunks.
    pub fn chunk_with_id(
        &self,
        transfer_id: TransferId,
        payload: impl AsRef<[u8]>,
    ) -> Result<ChunkBatch, ChunkingError> {
        let frames = self.build_chunks(transfer_id, payload.as_ref())?;
        crate::metrics::inc_chunks_emitted(frames.len() as u64);
        Ok(ChunkBatch::new(transfer_id, frames))
    }

    fn build_chunks(
        &self,
        transfer_id: TransferId,
        payload: &[u8],
    ) -> Result<Vec<ChunkFrame>, ChunkingError> {
        let mtu = self.mtu.get();
        if payload.is_empty() {
            // An empty transfer must still round-trip, as exactly one
            // zero-length chunk.
            let header = ChunkHeader::new(transfer_id, ChunkSequence::zero(), 1);
            return Ok(vec![ChunkFrame::new(header, Vec::new())]);
        }

        let len = payload.len();
        let total = u32::try_from(len.div_ceil(mtu))
            .map_err(|_| ChunkingError::CountOverflow { len, mtu })?;

        let mut frames = Vec::with_capacity(len.div_ceil(mtu));
        let mut sequence = ChunkSequence::zero();
        let mut offset = 0_usize;

        while offset < len {
            let end = (offset + mtu).min(len);
            frames.push(ChunkFrame::new(
                ChunkHeader::new(transfer_id, sequence, total),
                payload[offset..end].to_vec(),
            ));

            if end == len {
                break;
            }

            offset = end;
            sequence = sequence
                .checked_increment()
                .ok_or(ChunkingError::CountOverflow { len, mtu })?;
        }

        Ok(frames)
    }
}

/// Metadata and payload bytes for a single outbound chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkFrame {
    header: ChunkHeader,
    payload: Vec<u8>,
}

impl ChunkFrame {
    /// Construct a new chunk frame.
    #[must_use]
    pub fn new(header: ChunkHeader, payload: Vec<u8>) -> Self { Self { header, payload } }

    /// Return the chunk header.
    #[must_use]
    pub fn header(&self) -> &ChunkHeader { &self.header }

    /// Return the chunk payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] { self.payload.as_slice() }

    /// Consume the frame, returning its components.
    #[must_use]
    pub fn into_parts(self) -> (ChunkHeader, Vec<u8>) { (self.header, self.payload) }
}

/// Ordered collection of chunks produced for a single transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkBatch {
    transfer_id: TransferId,
    frames: Vec<ChunkFrame>,
}

impl ChunkBatch {
    fn new(transfer_id: TransferId, frames: Vec<ChunkFrame>) -> Self {
        debug_assert!(!frames.is_empty(), "chunk batches must not be empty");
        Self {
            transfer_id,
            frames,
        }
    }

    /// Return the [`TransferId`] shared by all chunks in the batch.
    #[must_use]
    pub const fn transfer_id(&self) -> TransferId { self.transfer_id }

    /// Return the chunks as a slice, in ascending sequence order.
    #[must_use]
    pub fn chunks(&self) -> &[ChunkFrame] { self.frames.as_slice() }

    /// Number of chunks in the batch.
    #[expect(
        clippy::len_without_is_empty,
        reason = "batches are guaranteed non-empty"
    )]
    #[must_use]
    pub fn len(&self) -> usize { self.frames.len() }

    /// Whether the payload needed more than one chunk.
    #[must_use]
    pub fn is_chunked(&self) -> bool { self.len() > 1 }

    /// Consume the batch, returning all chunks.
    #[must_use]
    pub fn into_chunks(self) -> Vec<ChunkFrame> { self.frames }
}

impl IntoIterator for ChunkBatch {
    type Item = ChunkFrame;
    type IntoIter = std::vec::IntoIter<ChunkFrame>;

    fn into_iter(self) -> Self::IntoIter { self.frames.into_iter() }
}
