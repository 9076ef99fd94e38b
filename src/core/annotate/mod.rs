//! Annotation filtering and publishing.
//!
//! Records whose entity is on the allow-list and whose confidence
//! is strictly above the threshold are encoded as JSON and handed,
//! one at a time and in arrival order, to a topic sink.
//!
//! - **filter**: `FilterConfig` predicate
//! - **record**: `AnnotationRecord` and the JSON-lines source
//! - **sink**: `TopicSink` trait and implementations
//! - **publisher**: `AnnotationPublisher` wiring the above

pub mod filter;
pub mod publisher;
pub mod record;
pub mod sink;

pub use filter::FilterConfig;
pub use publisher::AnnotationPublisher;
pub use record::{AnnotationRecord, JsonLinesRecords};
pub use sink::{FileTopicSink, MemoryTopicSink, StdoutTopicSink, TopicSink};
