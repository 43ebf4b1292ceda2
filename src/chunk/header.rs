use bincode::{Decode, Encode};

use super::{ChunkSequence, TransferId};

/// Self-describing metadata carried by every chunk.
///
/// A header names the transfer the chunk belongs to, the chunk's position,
/// and the total chunk count declared for the transfer. The count is
/// identical across all chunks of one transfer, which lets a receiver size
/// its bookkeeping from whichever chunk happens to arrive first. Headers are
/// small enough to copy by value and carry no payload bytes themselves.
///
/// # Examples
///
/// ```
/// use chunkwire::chunk::{ChunkHeader, ChunkSequence, TransferId};
/// let header = ChunkHeader::new(TransferId::new(3), ChunkSequence::zero(), 2);
/// assert_eq!(header.transfer_id().get(), 3);
/// assert_eq!(header.sequence().get(), 0);
/// assert_eq!(header.total(), 2);
/// assert!(header.sequence_in_range());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode)]
pub struct ChunkHeader {
    transfer_id: TransferId,
    sequence: ChunkSequence,
    total: u32,
}

impl ChunkHeader {
    /// Create a new chunk header.
    #[must_use]
    pub const fn new(transfer_id: TransferId, sequence: ChunkSequence, total: u32) -> Self {
        Self {
            transfer_id,
            sequence,
            total,
        }
    }

    /// Return the transfer identifier shared by the chunk's siblings.
    #[must_use]
    pub const fn transfer_id(&self) -> TransferId { self.transfer_id }

    /// Return the chunk's position within its transfer.
    #[must_use]
    pub const fn sequence(&self) -> ChunkSequence { self.sequence }

    /// Return the declared chunk count for the whole transfer.
    #[must_use]
    pub const fn total(&self) -> u32 { self.total }

    /// Report whether the sequence number is possible for the declared count.
    ///
    /// Well-formed headers satisfy `sequence < total`; anything else marks a
    /// corrupted or adversarial chunk.
    #[must_use]
    pub const fn sequence_in_range(&self) -> bool { self.sequence.get() < self.total }
}
