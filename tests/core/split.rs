// Integration tests for chunk ranges, unit splitting and claims

use crate::common::assert_partition;
use std::collections::HashSet;
use vidsplit::core::split::{
    chunk_count, chunk_range, split_into_units, ChunkRange, Claim, RangeClaimTracker,
};
use vidsplit::VidsplitError;

#[test]
fn test_partial_last_chunk_range() {
    // 2500 bytes at 1000 per chunk: indices 1, 2, 3
    let range = chunk_range(2500, 1000).unwrap();
    assert_eq!((range.from(), range.to()), (1, 4));
    assert_eq!(range.width(), 3);
}

#[test]
fn test_evenly_divisible_size() {
    // 2000 bytes at 1000 per chunk is exactly two chunks
    assert_eq!(chunk_count(2000, 1000).unwrap(), 2);
    let range = chunk_range(2000, 1000).unwrap();
    assert_eq!((range.from(), range.to()), (1, 3));
}

#[test]
fn test_small_and_empty_files_have_one_chunk() {
    assert_eq!(chunk_count(0, 1000).unwrap(), 1);
    assert_eq!(chunk_count(1, 1000).unwrap(), 1);
    assert_eq!(chunk_count(999, 1000).unwrap(), 1);
    assert_eq!(chunk_count(1000, 1000).unwrap(), 1);
    assert_eq!(chunk_count(1001, 1000).unwrap(), 2);
}

#[test]
fn test_zero_chunk_size_rejected() {
    assert!(chunk_count(100, 0).is_err());
    assert!(chunk_range(100, 0).is_err());
}

#[test]
fn test_invalid_ranges_rejected() {
    assert!(matches!(
        ChunkRange::new(0, 3),
        Err(VidsplitError::InvalidRange { .. })
    ));
    assert!(matches!(
        ChunkRange::new(4, 2),
        Err(VidsplitError::InvalidRange { .. })
    ));
}

#[test]
fn test_units_partition_initial_range() {
    for size in [0u64, 1, 999, 1000, 1001, 2500, 10_000, 123_456] {
        let range = chunk_range(size, 1000).unwrap();
        let units = split_into_units(range);
        assert_eq!(units.len() as u64, chunk_count(size, 1000).unwrap());
        assert_partition(range, &units);
    }
}

#[test]
fn test_each_index_claimed_once_across_units() {
    let range = chunk_range(10_500, 1000).unwrap();
    let mut claimed = HashSet::new();

    for unit in split_into_units(range) {
        let mut tracker = RangeClaimTracker::new(unit);
        while let Claim::Index(index) = tracker.claim_next() {
            assert!(claimed.insert(index), "Index {index} claimed twice");
        }
        assert_eq!(tracker.claim_next(), Claim::Exhausted);
    }

    let expected: HashSet<i64> = (1..=11).collect();
    assert_eq!(claimed, expected);
}

#[test]
fn test_split_refused_after_claim() {
    let range = chunk_range(3000, 1000).unwrap();
    let mut tracker = RangeClaimTracker::new(range);

    let units = tracker.try_split().unwrap();
    assert_eq!(units.len(), 3);

    assert_eq!(tracker.claim_next(), Claim::Index(1));
    match tracker.try_split() {
        Err(VidsplitError::SplitAfterClaim { last_claimed, .. }) => {
            assert_eq!(last_claimed, 1)
        }
        other => panic!("Expected SplitAfterClaim, got {other:?}"),
    }
}
