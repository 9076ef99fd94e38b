//! vidsplit - Parallel chunk reading and annotation filtering
//!
//! Splits large, immutable files (video objects) into fixed-size
//! byte chunks that independent workers claim and read without
//! coordination, and filters annotation records against an
//! entity allow-list and confidence threshold before publishing
//! them to a topic.
//!
//! # Architecture
//!
//! The codebase is organized into two main modules:
//!
//! - **core**: Domain logic (transport-agnostic)
//!   - config, error, types, xdg
//!   - split (chunk ranges, unit splitting, claim tracking)
//!   - reader (scoped chunk reads, byte sources, file listing)
//!   - pipeline (worker pool)
//!   - annotate (filter, records, topic sinks, publisher)
//!   - services (unified service container)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Key Properties
//!
//! - Every file yields at least one chunk, empty files included
//! - Unit ranges partition a file's chunk indices with no gaps or
//!   overlaps, and each index is claimed at most once
//! - Chunk reads are idempotent and release their handle on every
//!   exit path
//! - Annotations pass only when strictly above the threshold

// Core domain logic (transport-agnostic)
pub mod core;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{Result, VidsplitError};
pub use core::services::Services;
pub use core::types::*;
