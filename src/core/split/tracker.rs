//! Per-range claim tracking.
//!
//! A `RangeClaimTracker` is owned by exactly one worker. It hands
//! out the indices of its range one at a time, strictly
//! increasing, never repeating. Once the range is used up every
//! further call reports `Claim::Exhausted`.
//!
//! Ranges reaching workers are unit-width, so in practice a
//! tracker yields a single index. The tracker still guards the
//! claim step: a retried worker that calls `claim_next` twice
//! cannot read the same chunk twice.

use crate::core::error::{Result, VidsplitError};
use crate::core::split::policy::split_into_units;
use crate::core::split::range::ChunkRange;

/// Outcome of a claim attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// The caller now exclusively owns this index
    Index(i64),
    /// No indices remain in the range
    Exhausted,
}

impl Claim {
    pub fn index(self) -> Option<i64> {
        match self {
            Claim::Index(index) => Some(index),
            Claim::Exhausted => None,
        }
    }
}

/// Claim state for one assigned chunk range
#[derive(Debug, Clone)]
pub struct RangeClaimTracker {
    range: ChunkRange,
    last_claimed: Option<i64>,
}

impl RangeClaimTracker {
    pub fn new(range: ChunkRange) -> Self {
        Self {
            range,
            last_claimed: None,
        }
    }

    pub fn range(&self) -> ChunkRange {
        self.range
    }

    pub fn last_claimed(&self) -> Option<i64> {
        self.last_claimed
    }

    /// Claim the next index of the range.
    pub fn claim_next(&mut self) -> Claim {
        let candidate = match self.last_claimed {
            None => self.range.from(),
            Some(last) => last + 1,
        };

        if candidate >= self.range.to() {
            return Claim::Exhausted;
        }

        self.last_claimed = Some(candidate);
        Claim::Index(candidate)
    }

    /// True once no further index can be claimed
    pub fn is_done(&self) -> bool {
        match self.last_claimed {
            None => self.range.is_empty(),
            Some(last) => last + 1 >= self.range.to(),
        }
    }

    /// Split the tracked range into unit ranges.
    ///
    /// Only allowed before the first claim; afterwards the range
    /// is partially owned and splitting would hand out indices
    /// twice.
    pub fn try_split(&self) -> Result<Vec<ChunkRange>> {
        if let Some(last_claimed) = self.last_claimed {
            return Err(VidsplitError::SplitAfterClaim {
                from: self.range.from(),
                to: self.range.to(),
                last_claimed,
            });
        }
        Ok(split_into_units(self.range))
    }
}
