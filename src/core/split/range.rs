//! Chunk-index ranges and the initial range for a file.
//!
//! Chunks are addressed by 1-based indices. A file of
//! `size_bytes` split into `chunk_size` pieces owns the half-open
//! index range `[1, num_chunks + 1)`, where
//!
//! ```text
//! num_chunks = max(1, ceil(size_bytes / chunk_size))
//! ```
//!
//! Empty files still produce one claimable index so downstream
//! consumers always see at least one chunk per file.
//!
//! # Example
//!
//! ```
//! use vidsplit::core::split::chunk_range;
//!
//! let range = chunk_range(2500, 1000).unwrap();
//! assert_eq!((range.from(), range.to()), (1, 4));
//! assert_eq!(range.width(), 3);
//! ```

use std::fmt;

use serde::Serialize;

use crate::core::error::{Result, VidsplitError};

/// Half-open interval `[from, to)` of 1-based chunk indices.
///
/// Invariant: `from >= 1 && to >= from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChunkRange {
    from: i64,
    to: i64,
}

impl ChunkRange {
    /// Create a range, rejecting bounds that break the invariant.
    pub fn new(from: i64, to: i64) -> Result<Self> {
        if from < 1 {
            return Err(VidsplitError::InvalidRange {
                from,
                to,
                message: "chunk indices start at 1".to_string(),
            });
        }
        if to < from {
            return Err(VidsplitError::InvalidRange {
                from,
                to,
                message: "upper bound precedes lower bound".to_string(),
            });
        }
        Ok(Self { from, to })
    }

    /// Range holding the single index `index`.
    pub fn unit(index: i64) -> Result<Self> {
        let to = index.checked_add(1).ok_or_else(|| VidsplitError::InvalidRange {
            from: index,
            to: index,
            message: "index has no successor".to_string(),
        })?;
        Self::new(index, to)
    }

    pub fn from(&self) -> i64 {
        self.from
    }

    pub fn to(&self) -> i64 {
        self.to
    }

    /// Number of indices in the range
    pub fn width(&self) -> i64 {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    pub fn is_unit(&self) -> bool {
        self.width() == 1
    }

    pub fn contains(&self, index: i64) -> bool {
        index >= self.from && index < self.to
    }
}

impl fmt::Display for ChunkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}

/// Number of chunks a file of `size_bytes` splits into.
///
/// Never less than one.
pub fn chunk_count(size_bytes: u64, chunk_size: u64) -> Result<u64> {
    if chunk_size == 0 {
        return Err(VidsplitError::ConfigError(
            "Chunk size must be non-zero".to_string(),
        ));
    }
    Ok(size_bytes.div_ceil(chunk_size).max(1))
}

/// Initial claimable range for a file: `[1, chunk_count + 1)`.
pub fn chunk_range(size_bytes: u64, chunk_size: u64) -> Result<ChunkRange> {
    let count = chunk_count(size_bytes, chunk_size)?;
    let to = i64::try_from(count)
        .ok()
        .and_then(|count| count.checked_add(1))
        .ok_or_else(|| {
            VidsplitError::ConfigError(format!(
                "File of {size_bytes} bytes has too many chunks for chunk size {chunk_size}"
            ))
        })?;
    ChunkRange::new(1, to)
}
