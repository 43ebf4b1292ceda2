//! Tests for chunk header metadata and the identifier newtypes.

use rstest::rstest;

use crate::chunk::{ChunkHeader, ChunkSequence, TransferId};

#[rstest]
#[case(0, 1, true)]
#[case(2, 3, true)]
#[case(3, 3, false)]
#[case(7, 3, false)]
#[case(0, 0, false)]
fn sequence_in_range_matches_the_declared_total(
    #[case] sequence: u32,
    #[case] total: u32,
    #[case] expected: bool,
) {
    let header = ChunkHeader::new(TransferId::new(1), ChunkSequence::new(sequence), total);
    assert_eq!(header.sequence_in_range(), expected);
}

#[test]
fn header_exposes_its_fields() {
    let header = ChunkHeader::new(TransferId::new(42), ChunkSequence::new(6), 9);
    assert_eq!(header.transfer_id(), TransferId::new(42));
    assert_eq!(header.sequence(), ChunkSequence::new(6));
    assert_eq!(header.total(), 9);
}

#[test]
fn sequence_increment_stops_at_the_count_limit() {
    assert_eq!(
        ChunkSequence::new(3).checked_increment(),
        Some(ChunkSequence::new(4))
    );
    assert!(ChunkSequence::new(u32::MAX).checked_increment().is_none());
}

#[test]
fn sequence_converts_from_usize_when_it_fits() {
    assert_eq!(ChunkSequence::try_from(9_usize), Ok(ChunkSequence::new(9)));
    assert!(ChunkSequence::try_from(1_usize << 40).is_err());
}

#[test]
fn identifiers_display_their_numeric_value() {
    assert_eq!(TransferId::new(17).to_string(), "17");
    assert_eq!(ChunkSequence::new(3).to_string(), "3");
}
