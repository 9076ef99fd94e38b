//! Topic sinks that receive published messages.
//!
//! The publisher hands each encoded message to a `TopicSink`
//! together with the topic id. Delivery is fire-and-forget from
//! the publisher's side: a sink either accepts the message or
//! returns `PublishFailed`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::core::error::{Result, VidsplitError};

/// Destination for published messages
#[async_trait]
pub trait TopicSink: Send + Sync {
    async fn publish(&self, topic: &str, message: String) -> Result<()>;
}

/// Appends each message as one line to `<dir>/<topic>.jsonl`
#[derive(Debug, Clone)]
pub struct FileTopicSink {
    dir: PathBuf,
}

impl FileTopicSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `topic`; path separators in fully qualified
    /// topic names become underscores.
    pub fn topic_path(&self, topic: &str) -> PathBuf {
        let file_name: String = topic
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_name}.jsonl"))
    }
}

#[async_trait]
impl TopicSink for FileTopicSink {
    async fn publish(&self, topic: &str, message: String) -> Result<()> {
        let path = self.topic_path(topic);
        let failed = |e: std::io::Error| VidsplitError::PublishFailed {
            topic: topic.to_string(),
            message: format!("{}: {e}", path.display()),
        };

        tokio::fs::create_dir_all(&self.dir).await.map_err(failed)?;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(failed)?;

        let mut line = message.into_bytes();
        line.push(b'\n');
        file.write_all(&line).await.map_err(failed)?;
        file.flush().await.map_err(failed)?;
        Ok(())
    }
}

/// Prints each message on stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutTopicSink;

#[async_trait]
impl TopicSink for StdoutTopicSink {
    async fn publish(&self, _topic: &str, message: String) -> Result<()> {
        println!("{message}");
        Ok(())
    }
}

/// Keeps every message in memory, in publish order
#[derive(Debug, Default)]
pub struct MemoryTopicSink {
    messages: Mutex<Vec<(String, String)>>,
}

impl MemoryTopicSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `(topic, message)` pairs published so far
    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TopicSink for MemoryTopicSink {
    async fn publish(&self, topic: &str, message: String) -> Result<()> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|e| VidsplitError::PublishFailed {
                topic: topic.to_string(),
                message: e.to_string(),
            })?;
        messages.push((topic.to_string(), message));
        Ok(())
    }
}
