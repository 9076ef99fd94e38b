//! Dynamic splitting of a chunk range into unit-width work items.
//!
//! Every file's initial range is split once, before any claim is
//! issued, so each worker receives a range holding exactly one
//! index.

use crate::core::split::range::ChunkRange;

/// Split `range` into `[a, a+1), [a+1, a+2), ..., [b-1, b)`.
///
/// The result covers the input exactly once, in ascending order.
/// A unit-width input comes back unchanged and an empty input
/// yields nothing.
pub fn split_into_units(range: ChunkRange) -> Vec<ChunkRange> {
    if range.is_unit() {
        return vec![range];
    }

    (range.from()..range.to())
        .filter_map(|index| ChunkRange::unit(index).ok())
        .collect()
}
