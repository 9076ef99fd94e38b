//! Domain data structures shared across the core modules.

use serde::{Deserialize, Serialize};

/// A file to be split, as reported by the storage listing.
///
/// `name` is the key the byte source opens; for local storage it
/// is the path relative to the source root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub size_bytes: u64,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }
}

/// One bounded byte range of a file, addressed by its 1-based index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub file_name: String,
    pub index: i64,
    pub bytes: Vec<u8>,
}

impl Chunk {
    /// Number of bytes carried by this chunk
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A unit of work that could not be completed.
///
/// Carries enough to re-claim the same unit range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedUnit {
    pub file_name: String,
    pub index: i64,
    pub error: String,
    pub retryable: bool,
}

/// Statistics from one run of the chunk pipeline
#[derive(Debug, Clone, Default, Serialize)]
pub struct SplitReport {
    pub files: usize,
    pub units_scheduled: usize,
    pub chunks_emitted: usize,
    pub bytes_read: u64,
    pub failed: Vec<FailedUnit>,
    pub duration_ms: u64,
}

impl SplitReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.chunks_emitted == self.units_scheduled
    }
}

/// Statistics from one run of the annotation publisher
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub seen: usize,
    pub published: usize,
    pub rejected: usize,
    pub invalid: usize,
}
