//! Tests for Display implementations on error types.

use std::num::NonZeroUsize;

use chunkwire::{ChunkSequence, ChunkingError, ReassemblyError, TransferId};

#[test]
fn chunking_error_messages() {
    assert_eq!(
        ChunkingError::InvalidMtu { mtu: 0 }.to_string(),
        "invalid mtu: 0 (must be at least 1)"
    );
    assert_eq!(
        ChunkingError::CountOverflow { len: 10, mtu: 1 }.to_string(),
        "payload of 10 bytes at mtu 1 exceeds the chunk count limit"
    );
}

#[test]
fn reassembly_error_messages() {
    let out_of_range = ReassemblyError::SequenceOutOfRange {
        transfer_id: TransferId::new(4),
        sequence: ChunkSequence::new(5),
        total: 5,
    };
    assert_eq!(
        out_of_range.to_string(),
        "transfer 4: sequence 5 out of range for declared total 5"
    );

    let mismatch = ReassemblyError::TotalMismatch {
        transfer_id: TransferId::new(4),
        expected: 3,
        found: 5,
    };
    assert_eq!(
        mismatch.to_string(),
        "transfer 4: declared total 5 conflicts with established 3"
    );

    let too_large = ReassemblyError::TransferTooLarge {
        transfer_id: TransferId::new(9),
        attempted: 2_048,
        limit: NonZeroUsize::new(1_024).expect("non-zero"),
    };
    assert_eq!(
        too_large.to_string(),
        "transfer 9: 2048 buffered bytes exceed the 1024 byte cap"
    );
}
