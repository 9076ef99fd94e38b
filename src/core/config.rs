//! Configuration management for vidsplit.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::annotate::FilterConfig;
use crate::core::error::{Result, VidsplitError};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default)]
    pub filter: FilterSettings,
    #[serde(default)]
    pub publish: PublishConfig,
}

/// Chunk reader configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReaderConfig {
    /// Bytes per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size_bytes: u64,

    /// Number of concurrent chunk workers
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Bound of the work and output queues
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// File patterns to include (glob syntax)
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// File patterns to exclude (glob syntax)
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

/// Annotation filter configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterSettings {
    /// Entities whose annotations are published
    #[serde(default)]
    pub allowed_entities: Vec<String>,

    /// Annotations must be strictly above this confidence
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

/// Publish destination configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PublishConfig {
    /// Topic that receives matching annotations
    #[serde(default)]
    pub topic_id: String,

    /// Directory backing file topics, unset means the XDG data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_dir: Option<PathBuf>,
}

// Default value functions
fn default_chunk_size() -> u64 {
    1024 * 1024
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

fn default_channel_capacity() -> usize {
    64
}

fn default_min_confidence() -> f64 {
    0.5
}

fn default_include_patterns() -> Vec<String> {
    vec![
        "*.mp4".to_string(),
        "*.mov".to_string(),
        "*.avi".to_string(),
        "*.mkv".to_string(),
        "*.webm".to_string(),
        "*.flv".to_string(),
        "*.wmv".to_string(),
        "*.mpg".to_string(),
        "*.mpeg".to_string(),
        "*.ts".to_string(),
    ]
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/.git/**".to_string(),
        "**/*.part".to_string(),
        "**/*.tmp".to_string(),
        "**/*.crdownload".to_string(),
    ]
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size_bytes: default_chunk_size(),
            workers: default_workers(),
            channel_capacity: default_channel_capacity(),
            include_patterns: default_include_patterns(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            allowed_entities: Vec::new(),
            min_confidence: default_min_confidence(),
        }
    }
}

impl PublishConfig {
    /// Configured topic directory, or `./topics` when none was set
    pub fn resolved_topic_dir(&self) -> PathBuf {
        self.topic_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("./topics"))
    }
}

impl FilterSettings {
    /// Build the validated, immutable filter
    pub fn to_filter(&self) -> Result<FilterConfig> {
        FilterConfig::new(self.allowed_entities.iter().cloned(), self.min_confidence)
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| VidsplitError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// File lookup order:
    /// 1. VIDSPLIT_CONFIG env var
    /// 2. XDG config file (~/.config/vidsplit/config.toml)
    /// 3. ./vidsplit.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("VIDSPLIT_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("vidsplit.toml").exists() {
                Self::from_file("vidsplit.toml")?
            } else {
                Self::default()
            }
        };

        // File topics go to the XDG data directory unless set explicitly
        if config.publish.topic_dir.is_none() {
            config.publish.topic_dir = Some(xdg.topics_dir());
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Reader configuration
        if let Ok(chunk_size) = env::var("VIDSPLIT_CHUNK_SIZE") {
            if let Ok(size) = chunk_size.parse() {
                self.reader.chunk_size_bytes = size;
            }
        }
        if let Ok(workers) = env::var("VIDSPLIT_WORKERS") {
            if let Ok(w) = workers.parse() {
                self.reader.workers = w;
            }
        }
        if let Ok(capacity) = env::var("VIDSPLIT_CHANNEL_CAPACITY") {
            if let Ok(c) = capacity.parse() {
                self.reader.channel_capacity = c;
            }
        }

        // Filter configuration
        if let Ok(entities) = env::var("VIDSPLIT_ALLOWED_ENTITIES") {
            self.filter.allowed_entities = entities
                .split(',')
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect();
        }
        if let Ok(confidence) = env::var("VIDSPLIT_MIN_CONFIDENCE") {
            if let Ok(c) = confidence.parse() {
                self.filter.min_confidence = c;
            }
        }

        // Publish configuration
        if let Ok(topic) = env::var("VIDSPLIT_TOPIC_ID") {
            self.publish.topic_id = topic;
        }
        if let Ok(dir) = env::var("VIDSPLIT_TOPIC_DIR") {
            self.publish.topic_dir = Some(PathBuf::from(dir));
        }
    }

    /// Validate configuration values
    ///
    /// The allow-list may be empty here; it is required only when
    /// a filter is built.
    pub fn validate(&self) -> Result<()> {
        if self.reader.chunk_size_bytes == 0 {
            return Err(VidsplitError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }

        if self.reader.workers == 0 {
            return Err(VidsplitError::ConfigError(
                "Worker count must be non-zero".to_string(),
            ));
        }

        if self.reader.channel_capacity == 0 {
            return Err(VidsplitError::ConfigError(
                "Channel capacity must be non-zero".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.filter.min_confidence) {
            return Err(VidsplitError::ConfigError(format!(
                "Minimum confidence must be within [0, 1], got {}",
                self.filter.min_confidence
            )));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Chunk size: {} bytes", self.reader.chunk_size_bytes);
        tracing::info!("  Workers: {}", self.reader.workers);
        tracing::info!("  Channel capacity: {}", self.reader.channel_capacity);
        tracing::info!(
            "  Include patterns: {} patterns",
            self.reader.include_patterns.len()
        );
        tracing::info!(
            "  Exclude patterns: {} patterns",
            self.reader.exclude_patterns.len()
        );
        tracing::info!(
            "  Allowed entities: {:?}",
            self.filter.allowed_entities
        );
        tracing::info!("  Min confidence: {}", self.filter.min_confidence);
        tracing::info!("  Topic: {:?}", self.publish.topic_id);
        tracing::info!("  Topic dir: {:?}", self.publish.topic_dir);
    }
}
