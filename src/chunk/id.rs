use bincode::{Decode, Encode};
use derive_more::{Display, From, Into};

/// Identifier tying together every chunk produced by one chunking call.
///
/// Identifiers are allocated from a per-[`Chunker`](crate::chunk::Chunker)
/// counter that starts at 1 and never repeats a value for the lifetime of
/// the instance, so receivers can key partial transfers by id alone.
///
/// # Examples
///
/// ```
/// use chunkwire::chunk::TransferId;
/// let id = TransferId::new(7);
/// assert_eq!(id.get(), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode, Display, From, Into)]
#[display("{_0}")]
pub struct TransferId(u64);

impl TransferId {
    /// Create an identifier from a raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self { Self(value) }

    /// Return the inner numeric identifier.
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}
