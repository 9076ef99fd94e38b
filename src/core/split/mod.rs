//! Chunk-range computation, splitting and claim tracking.
//!
//! - **range**: `ChunkRange` and the initial range for a file
//! - **policy**: unit-width splitting of a range
//! - **tracker**: exactly-once, strictly increasing claims

pub mod policy;
pub mod range;
pub mod tracker;

pub use policy::split_into_units;
pub use range::{chunk_count, chunk_range, ChunkRange};
pub use tracker::{Claim, RangeClaimTracker};
