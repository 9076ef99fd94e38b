//! Config command - show current configuration

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the show-config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Show file patterns as well
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub reader: ReaderView,
    pub filter: FilterView,
    pub publish: PublishView,
}

#[derive(Debug, Serialize)]
pub struct ReaderView {
    pub chunk_size_bytes: u64,
    pub workers: usize,
    pub channel_capacity: usize,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FilterView {
    pub allowed_entities: Vec<String>,
    pub min_confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct PublishView {
    pub topic_id: String,
    pub topic_dir: String,
}

/// Execute the show-config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;
    let xdg = XdgDirs::new();

    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        reader: ReaderView {
            chunk_size_bytes: config.reader.chunk_size_bytes,
            workers: config.reader.workers,
            channel_capacity: config.reader.channel_capacity,
            include_patterns: config.reader.include_patterns.clone(),
            exclude_patterns: config.reader.exclude_patterns.clone(),
        },
        filter: FilterView {
            allowed_entities: config.filter.allowed_entities.clone(),
            min_confidence: config.filter.min_confidence,
        },
        publish: PublishView {
            topic_id: config.publish.topic_id.clone(),
            topic_dir: config
                .publish
                .resolved_topic_dir()
                .to_string_lossy()
                .into_owned(),
        },
    };

    match format {
        OutputFormat::Human => {
            println!("{}", "Configuration:".bold());
            println!(
                "  config_file: {}",
                colors::file_path(&response.config_file)
            );
            println!("  reader:");
            println!("    chunk_size_bytes: {}", response.reader.chunk_size_bytes);
            println!("    workers: {}", response.reader.workers);
            println!("    channel_capacity: {}", response.reader.channel_capacity);
            if args.all {
                println!(
                    "    include_patterns: {:?}",
                    response.reader.include_patterns
                );
                println!(
                    "    exclude_patterns: {:?}",
                    response.reader.exclude_patterns
                );
            }
            println!("  filter:");
            println!(
                "    allowed_entities: {:?}",
                response.filter.allowed_entities
            );
            println!("    min_confidence: {}", response.filter.min_confidence);
            println!("  publish:");
            println!("    topic_id: {}", colors::topic(&response.publish.topic_id));
            println!("    topic_dir: {}", response.publish.topic_dir);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
