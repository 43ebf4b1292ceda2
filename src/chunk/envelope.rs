//! Encoding helpers that embed chunks into opaque transport messages.
//!
//! A chunked message is marked by a short magic prefix, followed by the
//! length-prefixed encoded [`ChunkHeader`] and the raw chunk bytes. The
//! marker lets a receiver discriminate chunked traffic from ordinary
//! payloads on the same channel before any deserialisation happens; the
//! exact byte layout is a crate convention, not a protocol mandate.

use std::num::NonZeroUsize;

use bincode::{
    config,
    decode_from_slice,
    encode_to_vec,
    error::{DecodeError, EncodeError},
};

use super::{ChunkHeader, ChunkSequence, TransferId};

/// Magic prefix that marks an embedded chunk payload.
pub const CHUNK_MAGIC: &[u8; 4] = b"CHNK";

/// Fixed bytes required to wrap a chunk, excluding the chunk body.
///
/// Computed from a header with every field at its maximum so the result is
/// an upper bound regardless of how the varint encoding compresses smaller
/// values.
///
/// # Panics
///
/// Panics if encoding the maximal [`ChunkHeader`] fails, which would
/// indicate a programmer error in the header definition.
#[must_use]
pub fn chunk_overhead() -> NonZeroUsize {
    let header = ChunkHeader::new(
        TransferId::new(u64::MAX),
        ChunkSequence::new(u32::MAX),
        u32::MAX,
    );
    let header_bytes = encode_to_vec(header, config::standard()).unwrap_or_else(|err| {
        panic!("chunk header encoding must be infallible for constants: {err}")
    });
    // Magic + length prefix (u16 big-endian) + encoded header.
    let overhead = CHUNK_MAGIC.len() + size_of::<u16>() + header_bytes.len();
    NonZeroUsize::new(overhead).unwrap_or_else(|| {
        panic!("chunk overhead must be non-zero (computed {overhead})");
    })
}

/// Encode a chunk for transport by prefixing marker and header bytes.
///
/// The returned buffer layout is:
/// `[CHUNK_MAGIC][u16 header_len][header bytes][chunk payload]`.
///
/// # Errors
///
/// Returns an [`EncodeError`] if the header cannot be encoded.
pub fn encode_chunk_payload(
    header: ChunkHeader,
    payload: &[u8],
) -> Result<Vec<u8>, EncodeError> {
    let header_bytes = encode_to_vec(header, config::standard())?;
    let header_len = u16::try_from(header_bytes.len())
        .map_err(|_| EncodeError::Other("chunk header length must fit within u16::MAX"))?;

    let mut buf = Vec::with_capacity(
        CHUNK_MAGIC.len() + size_of::<u16>() + header_bytes.len() + payload.len(),
    );
    buf.extend_from_slice(CHUNK_MAGIC);
    buf.extend_from_slice(&header_len.to_be_bytes());
    buf.extend_from_slice(&header_bytes);
    buf.extend_from_slice(payload);
    Ok(buf)
}

/// Attempt to decode a chunk payload.
///
/// Returns `Ok(Some((header, payload)))` when `message` carries the chunk
/// marker and a valid encoded header, `Ok(None)` when the marker is absent
/// (an ordinary, unchunked message), or an error if the marker is present
/// but decoding fails.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the marker is present but the header
/// bytes are truncated, malformed, or disagree with the advertised length.
pub fn decode_chunk_payload(message: &[u8]) -> Result<Option<(ChunkHeader, &[u8])>, DecodeError> {
    let minimum_len = CHUNK_MAGIC.len() + size_of::<u16>();
    if message.len() < minimum_len || !message.starts_with(CHUNK_MAGIC) {
        return Ok(None);
    }

    let len_start = CHUNK_MAGIC.len();
    let len_bytes = [message[len_start], message[len_start + 1]];
    let header_len = usize::from(u16::from_be_bytes(len_bytes));
    let header_start = len_start + size_of::<u16>();
    let header_end = header_start + header_len;

    let Some(header_bytes) = message.get(header_start..header_end) else {
        return Err(DecodeError::UnexpectedEnd {
            additional: header_end.saturating_sub(message.len()),
        });
    };

    let (header, consumed) =
        decode_from_slice::<ChunkHeader, _>(header_bytes, config::standard())?;
    if consumed != header_len {
        return Err(DecodeError::OtherString(
            "chunk header length mismatch".to_string(),
        ));
    }

    let remainder = message.get(header_end..).unwrap_or_default();
    Ok(Some((header, remainder)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_chunk_payload() {
        let header = ChunkHeader::new(TransferId::new(9), ChunkSequence::new(2), 3);
        let payload = [1_u8, 2, 3, 4];

        let encoded = encode_chunk_payload(header, &payload).expect("encode chunk");
        let decoded = decode_chunk_payload(&encoded)
            .expect("decode chunk")
            .expect("chunk marker present");
        assert_eq!(decoded.0, header);
        assert_eq!(decoded.1, payload);
    }

    #[test]
    fn decode_returns_none_for_ordinary_messages() {
        let message = [0_u8, 1, 2, 3];
        assert!(
            decode_chunk_payload(&message)
                .expect("decode ok")
                .is_none()
        );
    }

    #[test]
    fn decode_returns_none_for_short_messages() {
        assert!(decode_chunk_payload(b"CH").expect("decode ok").is_none());
    }

    #[test]
    fn chunk_overhead_bounds_encoded_header() {
        let header = ChunkHeader::new(TransferId::new(1), ChunkSequence::zero(), 2);
        let encoded = encode_to_vec(header, config::standard()).expect("encode header");
        let wrapped = CHUNK_MAGIC.len() + size_of::<u16>() + encoded.len();
        assert!(chunk_overhead().get() >= wrapped);
    }

    #[test]
    fn decode_rejects_truncated_header() {
        let header = ChunkHeader::new(TransferId::new(2), ChunkSequence::new(1), 4);
        let encoded = encode_to_vec(header, config::standard()).expect("encode header");

        // Advertise a longer header than provided to force `UnexpectedEnd`.
        let advertised_len: u16 = (encoded.len() + 4)
            .try_into()
            .expect("encoded header length must stay within u16");
        let mut message = Vec::new();
        message.extend_from_slice(CHUNK_MAGIC);
        message.extend_from_slice(&advertised_len.to_be_bytes());
        message.extend_from_slice(&encoded);

        let err = decode_chunk_payload(&message).expect_err("expected decode failure");
        match err {
            DecodeError::UnexpectedEnd { .. } => {}
            other => panic!("expected UnexpectedEnd, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_header_length_mismatch() {
        let header = ChunkHeader::new(TransferId::new(3), ChunkSequence::new(5), 6);
        let mut encoded = encode_to_vec(header, config::standard()).expect("encode header");
        encoded.extend_from_slice(&[0_u8, 1]); // pad so the advertised length exceeds consumed.
        let advertised_len: u16 = encoded
            .len()
            .try_into()
            .expect("padded header length must fit in u16");

        let mut message = Vec::new();
        message.extend_from_slice(CHUNK_MAGIC);
        message.extend_from_slice(&advertised_len.to_be_bytes());
        message.extend_from_slice(&encoded);

        let err = decode_chunk_payload(&message).expect_err("expected decode failure");
        match err {
            DecodeError::OtherString(msg) => {
                assert_eq!(msg, "chunk header length mismatch");
            }
            other => panic!("expected length mismatch error, got {other:?}"),
        }
    }
}
