//! Zero-based chunk positioning within a transfer.
//!
//! Provides [`ChunkSequence`], a type-safe wrapper around `u32` with
//! overflow-safe increment used when walking a payload in MTU strides.

use std::num::TryFromIntError;

use bincode::{Decode, Encode};
use derive_more::{Display, From};

/// Zero-based ordinal describing a chunk's position within its transfer.
///
/// # Examples
///
/// ```
/// use chunkwire::chunk::ChunkSequence;
/// let sequence = ChunkSequence::new(2);
/// assert_eq!(sequence.get(), 2);
/// assert!(sequence.checked_increment().is_some());
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode, Display, From,
)]
#[display("{_0}")]
pub struct ChunkSequence(u32);

impl ChunkSequence {
    /// Construct a sequence number from a `u32` value.
    #[must_use]
    pub const fn new(value: u32) -> Self { Self(value) }

    /// Return the first valid sequence number.
    #[must_use]
    pub const fn zero() -> Self { Self(0) }

    /// Return the underlying numeric value.
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }

    /// Increment the sequence, returning `None` on overflow.
    #[must_use]
    pub fn checked_increment(self) -> Option<Self> { self.0.checked_add(1).map(Self) }
}

impl TryFrom<usize> for ChunkSequence {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> { u32::try_from(value).map(Self) }
}

impl From<ChunkSequence> for u32 {
    fn from(value: ChunkSequence) -> Self { value.0 }
}
