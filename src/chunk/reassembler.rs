//! Inbound helper that folds unordered chunks back into whole payloads.
//!
//! [`Reassembler`] buffers chunk payloads keyed by
//! [`TransferId`](crate::chunk::TransferId), accepting them in any arrival
//! order. A transfer completes the instant every declared sequence has been
//! seen once; the buffered state is released at that moment and the caller
//! receives the reconstructed bytes. Malformed and conflicting chunks are
//! dropped without disturbing the transfers already in flight, and partial
//! transfers that stall are evicted after a configurable timeout.

use std::{
    collections::{BTreeMap, HashMap, hash_map::Entry},
    num::NonZeroUsize,
    time::{Duration, Instant},
};

use bincode::error::DecodeError;

use super::{ChunkFrame, ChunkHeader, ReassemblyError, TransferId};
use crate::message::Message;

#[derive(Debug)]
struct PendingTransfer {
    total: u32,
    received: BTreeMap<u32, Vec<u8>>,
    received_bytes: usize,
    started_at: Instant,
}

impl PendingTransfer {
    fn new(total: u32, started_at: Instant) -> Self {
        Self {
            total,
            received: BTreeMap::new(),
            received_bytes: 0,
            started_at,
        }
    }

    /// Bytes the transfer would hold after storing `incoming` at `sequence`,
    /// accounting for a replaced duplicate.
    fn projected_bytes(&self, sequence: u32, incoming: usize) -> usize {
        let replaced = self.received.get(&sequence).map_or(0, Vec::len);
        self.received_bytes - replaced + incoming
    }

    /// Store a payload slice, replacing any earlier delivery of the same
    /// sequence. Re-deliveries therefore never count twice toward
    /// completion.
    fn store(&mut self, sequence: u32, payload: Vec<u8>) {
        let incoming = payload.len();
        match self.received.insert(sequence, payload) {
            Some(previous) => {
                self.received_bytes = self.received_bytes - previous.len() + incoming;
            }
            None => self.received_bytes += incoming,
        }
    }

    fn is_complete(&self) -> bool { self.received.len() == self.total as usize }

    fn buffered_bytes(&self) -> usize { self.received_bytes }

    fn started_at(&self) -> Instant { self.started_at }

    /// Concatenate the buffered payloads in ascending sequence order.
    fn into_payload(self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.received_bytes);
        for piece in self.received.into_values() {
            buffer.extend_from_slice(&piece);
        }
        buffer
    }
}

/// Container for a fully reconstructed transfer payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReassembledTransfer {
    transfer_id: TransferId,
    payload: Vec<u8>,
}

impl ReassembledTransfer {
    /// Construct a new [`ReassembledTransfer`].
    #[must_use]
    pub fn new(transfer_id: TransferId, payload: Vec<u8>) -> Self {
        Self {
            transfer_id,
            payload,
        }
    }

    /// Identifier shared by the chunks that formed this payload.
    #[must_use]
    pub const fn transfer_id(&self) -> TransferId { self.transfer_id }

    /// Borrow the reconstructed payload.
    #[must_use]
    pub fn payload(&self) -> &[u8] { self.payload.as_slice() }

    /// Consume the transfer, returning the owned payload bytes.
    #[must_use]
    pub fn into_payload(self) -> Vec<u8> { self.payload }

    /// Decode the payload into a strongly typed message.
    ///
    /// # Errors
    ///
    /// Returns any [`DecodeError`] raised while deserialising the payload.
    pub fn decode<M: Message>(&self) -> Result<M, DecodeError> {
        let (message, _) = M::from_bytes(self.payload())?;
        Ok(message)
    }
}

/// Stateful, order-agnostic chunk collector with timeout-based eviction.
#[derive(Debug)]
pub struct Reassembler {
    max_transfer_size: NonZeroUsize,
    timeout: Duration,
    pending: HashMap<TransferId, PendingTransfer>,
}

impl Reassembler {
    /// Create a reassembler that caps reconstructed payloads at
    /// `max_transfer_size` bytes and evicts partial transfers older than
    /// `timeout`.
    #[must_use]
    pub fn new(max_transfer_size: NonZeroUsize, timeout: Duration) -> Self {
        Self {
            max_transfer_size,
            timeout,
            pending: HashMap::new(),
        }
    }

    /// Process a chunk using the current time.
    ///
    /// Returns `Ok(Some(_))` when the chunk completes its transfer,
    /// `Ok(None)` while more chunks are still expected. Waiting is the
    /// steady state, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError`] when the chunk is malformed, conflicts
    /// with its transfer's established chunk count, or would grow the
    /// transfer past the configured cap. The offending chunk is dropped;
    /// unrelated transfers are never affected.
    pub fn submit(
        &mut self,
        header: ChunkHeader,
        payload: impl AsRef<[u8]>,
    ) -> Result<Option<ReassembledTransfer>, ReassemblyError> {
        self.submit_at(header, payload, Instant::now())
    }

    /// Process a produced [`ChunkFrame`] using the current time.
    ///
    /// # Errors
    ///
    /// Propagates the same [`ReassemblyError`] conditions as [`Self::submit`].
    pub fn submit_frame(
        &mut self,
        frame: ChunkFrame,
    ) -> Result<Option<ReassembledTransfer>, ReassemblyError> {
        let (header, payload) = frame.into_parts();
        self.submit(header, payload)
    }

    /// Process a chunk using an explicit clock reading.
    ///
    /// Accepting an explicit `now` keeps eviction deterministic in tests and
    /// lets callers co-ordinate sweeps with their own timers.
    ///
    /// # Errors
    ///
    /// Propagates the same [`ReassemblyError`] conditions as [`Self::submit`].
    pub fn submit_at(
        &mut self,
        header: ChunkHeader,
        payload: impl AsRef<[u8]>,
        now: Instant,
    ) -> Result<Option<ReassembledTransfer>, ReassemblyError> {
        self.purge_expired_at(now);

        let payload = payload.as_ref();
        let transfer_id = header.transfer_id();
        let limit = self.max_transfer_size;

        if !header.sequence_in_range() {
            let err = ReassemblyError::SequenceOutOfRange {
                transfer_id,
                sequence: header.sequence(),
                total: header.total(),
            };
            log::warn!("dropping malformed chunk: {err}");
            crate::metrics::inc_chunks_rejected("sequence_out_of_range");
            return Err(err);
        }

        match self.pending.entry(transfer_id) {
            Entry::Occupied(mut occupied) => {
                if header.total() != occupied.get().total {
                    // A transfer's declared count must never change
                    // mid-flight. The conflicting chunk is dropped and the
                    // partial transfer is kept intact.
                    let err = ReassemblyError::TotalMismatch {
                        transfer_id,
                        expected: occupied.get().total,
                        found: header.total(),
                    };
                    log::warn!("dropping conflicting chunk: {err}");
                    crate::metrics::inc_chunks_rejected("total_mismatch");
                    return Err(err);
                }

                let attempted = occupied
                    .get()
                    .projected_bytes(header.sequence().get(), payload.len());
                if attempted > limit.get() {
                    occupied.remove();
                    let err = ReassemblyError::TransferTooLarge {
                        transfer_id,
                        attempted,
                        limit,
                    };
                    log::warn!("discarding oversized transfer: {err}");
                    crate::metrics::inc_chunks_rejected("transfer_too_large");
                    return Err(err);
                }

                occupied
                    .get_mut()
                    .store(header.sequence().get(), payload.to_vec());
                if occupied.get().is_complete() {
                    let buffer = occupied.remove().into_payload();
                    crate::metrics::inc_transfers_completed();
                    Ok(Some(ReassembledTransfer::new(transfer_id, buffer)))
                } else {
                    Ok(None)
                }
            }
            Entry::Vacant(vacant) => {
                if payload.len() > limit.get() {
                    let err = ReassemblyError::TransferTooLarge {
                        transfer_id,
                        attempted: payload.len(),
                        limit,
                    };
                    log::warn!("discarding oversized transfer: {err}");
                    crate::metrics::inc_chunks_rejected("transfer_too_large");
                    return Err(err);
                }

                if header.total() == 1 {
                    crate::metrics::inc_transfers_completed();
                    return Ok(Some(ReassembledTransfer::new(
                        transfer_id,
                        payload.to_vec(),
                    )));
                }

                let mut transfer = PendingTransfer::new(header.total(), now);
                transfer.store(header.sequence().get(), payload.to_vec());
                vacant.insert(transfer);
                Ok(None)
            }
        }
    }

    /// Remove partial transfers that exceeded the configured timeout.
    ///
    /// Returns the identifiers of transfers that were evicted.
    pub fn purge_expired(&mut self) -> Vec<TransferId> { self.purge_expired_at(Instant::now()) }

    /// Remove partial transfers that exceeded the configured timeout, using
    /// an explicit clock reading.
    ///
    /// Returns the identifiers of transfers that were evicted.
    pub fn purge_expired_at(&mut self, now: Instant) -> Vec<TransferId> {
        let mut evicted = Vec::new();
        let timeout = self.timeout;

        self.pending.retain(|transfer_id, transfer| {
            let expired = now.saturating_duration_since(transfer.started_at()) >= timeout;
            if expired {
                evicted.push(*transfer_id);
            }
            !expired
        });

        if !evicted.is_empty() {
            log::debug!("evicted {} stalled transfer(s)", evicted.len());
            crate::metrics::inc_transfers_evicted(evicted.len() as u64);
        }

        evicted
    }

    /// Number of partial transfers currently buffered.
    #[must_use]
    pub fn pending_len(&self) -> usize { self.pending.len() }

    /// Total payload bytes buffered across all partial transfers.
    #[must_use]
    pub fn pending_bytes(&self) -> usize {
        self.pending.values().map(PendingTransfer::buffered_bytes).sum()
    }
}
