//! Filter command - publish annotations that pass the entity filter

use crate::cli::output::{colors, format_count_colored};
use crate::cli::OutputFormat;
use crate::core::annotate::{
    AnnotationRecord, FileTopicSink, JsonLinesRecords, StdoutTopicSink, TopicSink,
};
use crate::core::config::FilterSettings;
use crate::core::error::Result as CoreResult;
use crate::core::services::Services;
use crate::core::types::PublishReport;
use clap::Args;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Arguments for the filter-annotations command
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// JSON-lines file of annotation records ("-" or omitted reads stdin)
    pub input: Option<PathBuf>,

    /// Topic that receives matching records
    #[arg(long, short = 't')]
    pub topic: Option<String>,

    /// Allowed entity (can be specified multiple times, replaces the configured list)
    #[arg(long = "entity", short = 'n')]
    pub entities: Vec<String>,

    /// Records must be strictly above this confidence
    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Directory backing file topics
    #[arg(long)]
    pub topic_dir: Option<PathBuf>,

    /// Print matching records to stdout instead of a topic file
    #[arg(long)]
    pub stdout: bool,

    /// Stop at the first malformed record
    #[arg(long)]
    pub fail_fast: bool,
}

/// Filter result response
#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub topic: String,
    pub min_confidence: f64,
    pub allowed_entities: Vec<String>,
    #[serde(flatten)]
    pub report: PublishReport,
}

/// Execute the filter-annotations command
pub async fn execute(
    args: FilterArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = filter_settings(&services.config.filter, &args);

    let sink: Arc<dyn TopicSink> = if args.stdout {
        Arc::new(StdoutTopicSink)
    } else {
        let dir = args
            .topic_dir
            .clone()
            .unwrap_or_else(|| services.config.publish.resolved_topic_dir());
        Arc::new(FileTopicSink::new(dir))
    };

    let publisher = services.create_publisher(Some(&settings), args.topic.clone(), Some(sink))?;

    let reader = open_input(args.input.as_ref())?;
    let (tx, rx) = mpsc::channel(services.config.reader.channel_capacity);
    let producer = tokio::task::spawn_blocking(move || forward_records(reader, tx));

    // An early error leaves the reader detached; it stops at its next send
    let report = publisher.publish_stream(rx, args.fail_fast).await?;
    producer.await?;

    let response = FilterResponse {
        topic: publisher.topic_id().to_string(),
        min_confidence: publisher.filter().min_confidence(),
        allowed_entities: publisher.filter().allowed_entities().iter().cloned().collect(),
        report,
    };

    // Published records own stdout when printing to it
    let summary = match format {
        OutputFormat::Human => format!(
            "{} {} of {} records to {} ({} rejected, {} invalid)",
            colors::success("Published"),
            format_count_colored(response.report.published),
            format_count_colored(response.report.seen),
            colors::topic(&response.topic),
            format_count_colored(response.report.rejected),
            format_count_colored(response.report.invalid)
        ),
        OutputFormat::Json => serde_json::to_string_pretty(&response)?,
    };
    if args.stdout {
        eprintln!("{summary}");
    } else {
        println!("{summary}");
    }

    Ok(())
}

/// Configured filter settings with command-line overrides applied
fn filter_settings(configured: &FilterSettings, args: &FilterArgs) -> FilterSettings {
    let mut settings = configured.clone();
    if !args.entities.is_empty() {
        settings.allowed_entities = args.entities.clone();
    }
    if let Some(min_confidence) = args.min_confidence {
        settings.min_confidence = min_confidence;
    }
    settings
}

/// Parse records off the runtime, stopping once the receiver is gone
fn forward_records(
    reader: Box<dyn BufRead + Send>,
    tx: mpsc::Sender<CoreResult<AnnotationRecord>>,
) {
    for record in JsonLinesRecords::new(reader) {
        if tx.blocking_send(record).is_err() {
            tracing::debug!("Record receiver closed, stopping input");
            break;
        }
    }
}

fn open_input(
    input: Option<&PathBuf>,
) -> Result<Box<dyn BufRead + Send>, Box<dyn std::error::Error>> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path).map_err(|e| {
                format!("Cannot open annotations '{}': {}", path.display(), e)
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}
