//! Unified service container for vidsplit
//!
//! Builds the pipeline and publisher from one validated `Config`.

use crate::core::annotate::{AnnotationPublisher, FileTopicSink, TopicSink};
use crate::core::config::{Config, FilterSettings};
use crate::core::error::Result;
use crate::core::pipeline::ChunkPipeline;
use crate::core::reader::{FileWalker, LocalFs};
use std::path::Path;
use std::sync::Arc;

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Create a walker with request-specific patterns
    ///
    /// Empty pattern lists fall back to the configured defaults.
    pub fn create_walker(
        &self,
        include_patterns: Vec<String>,
        exclude_patterns: Vec<String>,
    ) -> Result<FileWalker> {
        let include = if include_patterns.is_empty() {
            self.config.reader.include_patterns.clone()
        } else {
            include_patterns
        };
        let exclude = if exclude_patterns.is_empty() {
            self.config.reader.exclude_patterns.clone()
        } else {
            exclude_patterns
        };
        FileWalker::new(include, exclude)
    }

    /// Create a chunk pipeline reading from a local directory
    ///
    /// `chunk_size` and `workers` override the configured values
    /// when given.
    pub fn create_pipeline(
        &self,
        root: &Path,
        chunk_size: Option<u64>,
        workers: Option<usize>,
    ) -> Result<ChunkPipeline<LocalFs>> {
        let reader = &self.config.reader;
        ChunkPipeline::new(
            LocalFs::new(root),
            chunk_size.unwrap_or(reader.chunk_size_bytes),
            workers.unwrap_or(reader.workers),
            reader.channel_capacity,
        )
    }

    /// Create a publisher for the configured filter and topic
    ///
    /// `filter` and `topic_id` override the configured values when
    /// given. The sink defaults to a file topic under the configured
    /// topic directory.
    pub fn create_publisher(
        &self,
        filter: Option<&FilterSettings>,
        topic_id: Option<String>,
        sink: Option<Arc<dyn TopicSink>>,
    ) -> Result<AnnotationPublisher> {
        let settings = filter.unwrap_or(&self.config.filter);
        let filter = Arc::new(settings.to_filter()?);
        let topic = topic_id.unwrap_or_else(|| self.config.publish.topic_id.clone());
        let sink = sink.unwrap_or_else(|| -> Arc<dyn TopicSink> {
            Arc::new(FileTopicSink::new(self.config.publish.resolved_topic_dir()))
        });

        AnnotationPublisher::new(filter, topic, sink)
    }
}
