//! Split command - split files into fixed-size chunks

use crate::cli::output::{
    colors, format_bytes_colored, format_count_colored, format_duration_colored, print_warning,
};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{Chunk, FailedUnit, FileDescriptor};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Arguments for the split-files command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// File or directory to split
    pub path: PathBuf,

    /// Bytes per chunk (defaults to the configured value)
    #[arg(long)]
    pub chunk_size: Option<u64>,

    /// Number of concurrent workers (defaults to the configured value)
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,

    /// Glob patterns to include (can be specified multiple times)
    #[arg(long, short = 'i')]
    pub include: Vec<String>,

    /// Glob patterns to exclude (can be specified multiple times)
    #[arg(long, short = 'e')]
    pub exclude: Vec<String>,

    /// Write each chunk to <OUTPUT>/<file>/<index>.chunk
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Split result response
#[derive(Debug, Serialize)]
pub struct SplitResponse {
    pub path: String,
    pub chunk_size: u64,
    pub workers: usize,
    pub files: usize,
    pub chunks_scheduled: usize,
    pub chunks_emitted: usize,
    pub chunks_written: usize,
    pub bytes_read: u64,
    pub failed: Vec<FailedUnit>,
    pub duration_secs: f64,
}

/// Execute the split-files command
pub async fn execute(
    args: SplitArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = args.path.canonicalize().map_err(|e| {
        format!(
            "Invalid path '{}': {}. Make sure the path exists and is accessible.",
            args.path.display(),
            e
        )
    })?;

    let (root, files) = if path.is_dir() {
        let walker = services.create_walker(args.include, args.exclude)?;
        (path.clone(), walker.list_files(&path)?)
    } else {
        single_file(&path)?
    };

    if files.is_empty() {
        return Err(format!(
            "No files to split under '{}'. Check the include and exclude patterns.",
            path.display()
        )
        .into());
    }

    let pipeline = services.create_pipeline(&root, args.chunk_size, args.workers)?;

    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "Splitting {} files from {} into {} byte chunks...",
            files.len(),
            colors::file_path(&path.display().to_string()),
            pipeline.chunk_size()
        );
    }

    let (tx, rx) = mpsc::channel(services.config.reader.channel_capacity);
    let (report, written) = tokio::join!(
        pipeline.run(files, tx),
        consume_chunks(rx, args.output.as_deref())
    );
    let report = report?;
    let written = written?;

    let response = SplitResponse {
        path: path.to_string_lossy().into_owned(),
        chunk_size: pipeline.chunk_size(),
        workers: pipeline.workers(),
        files: report.files,
        chunks_scheduled: report.units_scheduled,
        chunks_emitted: report.chunks_emitted,
        chunks_written: written,
        bytes_read: report.bytes_read,
        failed: report.failed,
        duration_secs: report.duration_ms as f64 / 1000.0,
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {} files into {} chunks ({}) in {}",
                colors::success("Split"),
                format_count_colored(response.files),
                format_count_colored(response.chunks_emitted),
                format_bytes_colored(response.bytes_read),
                format_duration_colored(response.duration_secs)
            );
            if let Some(output) = &args.output {
                println!(
                    "  Wrote {} chunks to {}",
                    format_count_colored(response.chunks_written),
                    colors::file_path(&output.display().to_string())
                );
            }
            for failed in &response.failed {
                print_warning(&format!(
                    "{} chunk {}: {}",
                    colors::file_path(&failed.file_name),
                    colors::index(&failed.index.to_string()),
                    colors::dim(&failed.error)
                ));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    if !response.failed.is_empty() {
        return Err(format!(
            "{} of {} chunks could not be read",
            response.failed.len(),
            response.chunks_scheduled
        )
        .into());
    }

    Ok(())
}

/// Root and descriptor for a single file argument
fn single_file(path: &Path) -> Result<(PathBuf, Vec<FileDescriptor>), Box<dyn std::error::Error>> {
    let name = path
        .file_name()
        .ok_or_else(|| format!("Path '{}' has no file name", path.display()))?
        .to_string_lossy()
        .into_owned();
    let root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let size_bytes = std::fs::metadata(path)?.len();

    Ok((root, vec![FileDescriptor::new(name, size_bytes)]))
}

/// Relative location of one chunk under the output directory
pub fn chunk_path(output: &Path, chunk: &Chunk) -> PathBuf {
    output
        .join(&chunk.file_name)
        .join(format!("{:06}.chunk", chunk.index))
}

/// Drain the chunk stream, writing chunks when an output directory is set
///
/// Returns the number of chunks written.
async fn consume_chunks(
    mut rx: mpsc::Receiver<Chunk>,
    output: Option<&Path>,
) -> std::io::Result<usize> {
    let mut written = 0;

    while let Some(chunk) = rx.recv().await {
        let Some(output) = output else {
            continue;
        };

        let target = chunk_path(output, &chunk);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &chunk.bytes).await?;
        tracing::debug!("Wrote chunk {} to {}", chunk.index, target.display());
        written += 1;
    }

    Ok(written)
}
