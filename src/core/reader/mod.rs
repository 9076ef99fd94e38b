//! Chunk reading.
//!
//! Turns a claimed chunk index into bytes. Key properties:
//!
//! - Offset is `(index - 1) * chunk_size`; at most `chunk_size`
//!   bytes are read, fewer only at end of file
//! - The file handle lives only for the duration of one read and
//!   is released on every exit path, including errors
//! - Reads are pure functions of name, offset and length, so a
//!   failed unit can be retried without side effects
//!
//! Also provides the storage-side collaborators used by the CLI:
//! a local `ByteSource` and a `FileWalker` that lists files.

pub mod source;
pub mod walker;

pub use source::{ByteSource, LocalFs, MemorySource};
pub use walker::FileWalker;

use std::io::{Read, Seek, SeekFrom};

use crate::core::error::{Result, VidsplitError};
use crate::core::types::{Chunk, FileDescriptor};

/// Reads fixed-size chunks through a `ByteSource`
#[derive(Debug, Clone)]
pub struct ChunkReader<S> {
    source: S,
    chunk_size: u64,
}

impl<S: ByteSource> ChunkReader<S> {
    /// Create a reader for the given source and chunk size.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `chunk_size` is 0.
    pub fn new(source: S, chunk_size: u64) -> Result<Self> {
        if chunk_size == 0 {
            return Err(VidsplitError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }
        Ok(Self { source, chunk_size })
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Byte offset of a 1-based chunk index
    pub fn start_offset(&self, index: i64) -> Result<u64> {
        let invalid = |message: &str| VidsplitError::InvalidRange {
            from: index,
            to: index.saturating_add(1),
            message: message.to_string(),
        };

        let position = index
            .checked_sub(1)
            .and_then(|position| u64::try_from(position).ok())
            .ok_or_else(|| invalid("chunk indices start at 1"))?;
        position
            .checked_mul(self.chunk_size)
            .ok_or_else(|| invalid("byte offset overflows"))
    }

    /// Read the chunk at `index` of `file`.
    ///
    /// # Errors
    ///
    /// `InvalidRange` for an index below 1, `ReadFailed` for any
    /// error opening, seeking or reading the file.
    pub fn read_chunk(&self, file: &FileDescriptor, index: i64) -> Result<Chunk> {
        let offset = self.start_offset(index)?;
        let expected = self
            .chunk_size
            .min(file.size_bytes.saturating_sub(offset));

        let bytes = self
            .read_at(&file.name, offset, expected)
            .map_err(|source| VidsplitError::ReadFailed {
                file: file.name.clone(),
                index,
                source,
            })?;

        tracing::debug!(
            file = %file.name,
            index,
            offset,
            size = bytes.len(),
            "Read chunk"
        );

        Ok(Chunk {
            file_name: file.name.clone(),
            index,
            bytes,
        })
    }

    fn read_at(&self, name: &str, offset: u64, expected: u64) -> std::io::Result<Vec<u8>> {
        let mut handle = self.source.open(name)?;
        handle.seek(SeekFrom::Start(offset))?;

        let mut bytes = Vec::with_capacity(expected as usize);
        handle.by_ref().take(expected).read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}
