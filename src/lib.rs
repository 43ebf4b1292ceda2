#![doc(html_root_url = "https://docs.rs/chunkwire/latest")]
//! Public API for the `chunkwire` library.
//!
//! This crate provides the chunked-transfer layer for moving binary
//! payloads larger than a channel's MTU across message-oriented transports
//! that silently truncate oversized messages: an outbound [`Chunker`], an
//! order-agnostic [`Reassembler`], and the envelope and adapter glue a
//! transport needs to wire them in.

pub mod chunk;
pub mod message;
pub mod metrics;

pub use chunk::{
    CHUNK_MAGIC,
    ChannelProfile,
    ChunkAdapter,
    ChunkAdapterError,
    ChunkBatch,
    ChunkFrame,
    ChunkHeader,
    ChunkSequence,
    Chunker,
    ChunkingConfig,
    ChunkingError,
    DEFAULT_MTU,
    DefaultChunkAdapter,
    ReassembledTransfer,
    Reassembler,
    ReassemblyError,
    TransferId,
    chunk_overhead,
    decode_chunk_payload,
    encode_chunk_payload,
};
pub use message::Message;
