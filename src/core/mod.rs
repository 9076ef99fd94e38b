//! Core domain logic (transport-agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **split**: Chunk ranges, unit splitting and claim tracking
//! - **reader**: Chunk reads, byte sources and file listing
//! - **pipeline**: Worker pool driving split, claim and read
//! - **annotate**: Annotation filter and topic publishing
//! - **services**: Unified service container

pub mod annotate;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod reader;
pub mod services;
pub mod split;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{Result, VidsplitError};
pub use services::Services;
