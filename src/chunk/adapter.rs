//! Transport-facing contract for chunked delivery of opaque messages.
//!
//! [`ChunkAdapter`] captures the minimal behaviour a transport needs:
//! split an outbound payload into channel-sized messages, fold inbound
//! messages back into payloads, and purge stale partial transfers.
//! [`DefaultChunkAdapter`] bundles one [`Chunker`] and one [`Reassembler`]
//! behind that contract.

use bincode::error::DecodeError;
use thiserror::Error;

use super::{
    ChunkingConfig,
    ChunkingError,
    Chunker,
    Reassembler,
    ReassemblyError,
    TransferId,
    decode_chunk_payload,
    encode_chunk_payload,
};

/// Error returned by [`ChunkAdapter::reassemble`].
#[derive(Debug, Error)]
pub enum ChunkAdapterError {
    /// Chunk marker/header decoding failed.
    #[error("decode error: {0}")]
    Decode(DecodeError),
    /// Reassembly validation failed.
    #[error("reassembly error: {0}")]
    Reassembly(ReassemblyError),
}

/// Adapter contract for transport-level chunking and reassembly.
pub trait ChunkAdapter: Send + Sync {
    /// Split an outbound payload into one or more channel messages.
    ///
    /// Payloads that fit within the chunk cap are returned as a single
    /// unwrapped message.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError`] when payload chunking or header encoding
    /// fails.
    fn fragment(&self, payload: &[u8]) -> Result<Vec<Vec<u8>>, ChunkingError>;

    /// Fold an inbound channel message into a payload.
    ///
    /// Returns `Ok(Some(payload))` when a complete payload is available
    /// (immediately, for unchunked messages), `Ok(None)` while more chunks
    /// are required, and an error when decoding or reassembly fails.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkAdapterError`] when chunk decoding fails or when
    /// reassembly invariants are violated.
    fn reassemble(&mut self, message: &[u8]) -> Result<Option<Vec<u8>>, ChunkAdapterError>;

    /// Purge stale partial transfers.
    ///
    /// Returns the identifiers that were evicted.
    fn purge_expired(&mut self) -> Vec<TransferId>;
}

/// Default adapter backed by [`Chunker`] and [`Reassembler`].
#[derive(Debug)]
pub struct DefaultChunkAdapter {
    chunker: Chunker,
    reassembler: Reassembler,
}

impl DefaultChunkAdapter {
    /// Create a default adapter from chunking configuration.
    #[must_use]
    pub fn new(config: ChunkingConfig) -> Self {
        Self {
            chunker: Chunker::new(config.chunk_payload_cap),
            reassembler: Reassembler::new(config.max_transfer_size, config.reassembly_timeout),
        }
    }

    fn fragment_inner(&self, payload: &[u8]) -> Result<Vec<Vec<u8>>, ChunkingError> {
        let batch = self.chunker.chunk_bytes(payload)?;
        if !batch.is_chunked() {
            return Ok(vec![payload.to_vec()]);
        }

        let mut messages = Vec::with_capacity(batch.len());
        for chunk in batch {
            let (header, body) = chunk.into_parts();
            messages.push(encode_chunk_payload(header, &body)?);
        }
        Ok(messages)
    }

    fn reassemble_inner(
        &mut self,
        message: &[u8],
    ) -> Result<Option<Vec<u8>>, ChunkAdapterError> {
        match decode_chunk_payload(message) {
            Ok(Some((header, body))) => match self.reassembler.submit(header, body) {
                Ok(Some(transfer)) => Ok(Some(transfer.into_payload())),
                Ok(None) => Ok(None),
                Err(err) => Err(ChunkAdapterError::Reassembly(err)),
            },
            Ok(None) => Ok(Some(message.to_vec())),
            Err(err) => Err(ChunkAdapterError::Decode(err)),
        }
    }

    fn purge_expired_inner(&mut self) -> Vec<TransferId> { self.reassembler.purge_expired() }

    /// Split outbound payload bytes into channel messages.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError`] when chunk emission fails.
    pub fn fragment(&self, payload: &[u8]) -> Result<Vec<Vec<u8>>, ChunkingError> {
        self.fragment_inner(payload)
    }

    /// Fold an inbound channel message into a payload.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkAdapterError`] when decoding or reassembly fails.
    pub fn reassemble(&mut self, message: &[u8]) -> Result<Option<Vec<u8>>, ChunkAdapterError> {
        self.reassemble_inner(message)
    }

    /// Purge stale partial transfers and return the evicted identifiers.
    pub fn purge_expired(&mut self) -> Vec<TransferId> { self.purge_expired_inner() }
}

impl ChunkAdapter for DefaultChunkAdapter {
    fn fragment(&self, payload: &[u8]) -> Result<Vec<Vec<u8>>, ChunkingError> {
        self.fragment_inner(payload)
    }

    fn reassemble(&mut self, message: &[u8]) -> Result<Option<Vec<u8>>, ChunkAdapterError> {
        self.reassemble_inner(message)
    }

    fn purge_expired(&mut self) -> Vec<TransferId> { self.purge_expired_inner() }
}
