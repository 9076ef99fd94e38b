//! Chunk pipeline orchestration.
//!
//! Coordinates the end-to-end split workflow:
//! 1. Compute each file's initial chunk range
//! 2. Split every range into unit ranges (before any claim)
//! 3. Distribute unit ranges to a pool of workers over a channel
//! 4. Each worker claims its index and reads the chunk
//! 5. Emit chunks downstream; record failed units for retry
//!
//! Workers share nothing but the work channel and the output
//! sender. Reads are blocking and run on tokio's blocking pool.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

use crate::core::error::{Result, VidsplitError};
use crate::core::reader::{ByteSource, ChunkReader};
use crate::core::split::{chunk_range, split_into_units, ChunkRange, Claim, RangeClaimTracker};
use crate::core::types::{Chunk, FailedUnit, FileDescriptor, SplitReport};

/// One unit range of one file, ready to be claimed
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub file: Arc<FileDescriptor>,
    pub range: ChunkRange,
}

/// Compute and split the ranges for `files`.
///
/// Work items come out grouped by file, in ascending index order.
pub fn plan_work(files: &[FileDescriptor], chunk_size: u64) -> Result<Vec<WorkItem>> {
    let mut items = Vec::new();

    for file in files {
        let range = chunk_range(file.size_bytes, chunk_size)?;
        tracing::debug!(
            file = %file.name,
            size_bytes = file.size_bytes,
            chunk_size,
            %range,
            "Initial restriction"
        );

        let file = Arc::new(file.clone());
        items.extend(split_into_units(range).into_iter().map(|range| WorkItem {
            file: Arc::clone(&file),
            range,
        }));
    }

    Ok(items)
}

/// Claim and read every index of a work item's range.
///
/// Unit ranges produce exactly one chunk. The first failed read
/// aborts the item.
pub fn process_item<S: ByteSource>(reader: &ChunkReader<S>, item: &WorkItem) -> Result<Vec<Chunk>> {
    let mut tracker = RangeClaimTracker::new(item.range);
    let mut chunks = Vec::with_capacity(item.range.width().max(0) as usize);

    while let Claim::Index(index) = tracker.claim_next() {
        let chunk = reader.read_chunk(&item.file, index)?;
        tracing::debug!(
            "Current restriction {}, content size {}",
            item.range,
            chunk.len()
        );
        chunks.push(chunk);
    }

    Ok(chunks)
}

/// Per-worker counters, merged into the report at the end
#[derive(Debug, Default)]
struct WorkerTally {
    chunks: usize,
    bytes: u64,
    failed: Vec<FailedUnit>,
}

/// Splits files into chunks with a pool of workers
pub struct ChunkPipeline<S> {
    reader: Arc<ChunkReader<S>>,
    workers: usize,
    channel_capacity: usize,
}

impl<S: ByteSource + 'static> ChunkPipeline<S> {
    /// Create a new chunk pipeline
    ///
    /// # Arguments
    ///
    /// * `source` - Byte source the files are opened through
    /// * `chunk_size` - Bytes per chunk (must be > 0)
    /// * `workers` - Number of concurrent workers (must be > 0)
    /// * `channel_capacity` - Bound of the work and output queues
    pub fn new(source: S, chunk_size: u64, workers: usize, channel_capacity: usize) -> Result<Self> {
        if workers == 0 {
            return Err(VidsplitError::ConfigError(
                "Worker count must be non-zero".to_string(),
            ));
        }
        if channel_capacity == 0 {
            return Err(VidsplitError::ConfigError(
                "Channel capacity must be non-zero".to_string(),
            ));
        }

        Ok(Self {
            reader: Arc::new(ChunkReader::new(source, chunk_size)?),
            workers,
            channel_capacity,
        })
    }

    pub fn chunk_size(&self) -> u64 {
        self.reader.chunk_size()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Split `files` and send every chunk to `out`.
    ///
    /// Chunks of one file may arrive in any order. A failed read
    /// is logged, recorded in `SplitReport::failed` and does not
    /// affect other units. If `out` is closed, workers stop
    /// taking new work.
    pub async fn run(
        &self,
        files: Vec<FileDescriptor>,
        out: mpsc::Sender<Chunk>,
    ) -> Result<SplitReport> {
        let start = Instant::now();

        let items = plan_work(&files, self.chunk_size())?;
        let units_scheduled = items.len();
        tracing::info!(
            "Splitting {} files into {} chunks with {} workers",
            files.len(),
            units_scheduled,
            self.workers
        );

        let (work_tx, work_rx) = mpsc::channel::<WorkItem>(self.channel_capacity);
        let work_rx = Arc::new(Mutex::new(work_rx));

        let mut tasks = JoinSet::new();
        for worker_id in 0..self.workers {
            let reader = Arc::clone(&self.reader);
            let work_rx = Arc::clone(&work_rx);
            let out = out.clone();
            tasks.spawn(run_worker(worker_id, reader, work_rx, out));
        }
        // Workers hold the only receivers, so the queue closes when they all exit.
        drop(work_rx);
        drop(out);

        for item in items {
            if work_tx.send(item).await.is_err() {
                // Every worker has exited; the remaining units stay unclaimed.
                break;
            }
        }
        drop(work_tx);

        let mut tally = WorkerTally::default();
        while let Some(joined) = tasks.join_next().await {
            let worker = joined.map_err(|e| VidsplitError::WorkerFailed(e.to_string()))?;
            tally.chunks += worker.chunks;
            tally.bytes += worker.bytes;
            tally.failed.extend(worker.failed);
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Split complete: {} of {} chunks emitted, {} failed, \
             {} bytes read in {}ms",
            tally.chunks,
            units_scheduled,
            tally.failed.len(),
            tally.bytes,
            duration_ms
        );

        Ok(SplitReport {
            files: files.len(),
            units_scheduled,
            chunks_emitted: tally.chunks,
            bytes_read: tally.bytes,
            failed: tally.failed,
            duration_ms,
        })
    }

    /// Split `files` and collect every chunk, sorted by file and index.
    pub async fn collect(&self, files: Vec<FileDescriptor>) -> Result<(Vec<Chunk>, SplitReport)> {
        let (tx, mut rx) = mpsc::channel(self.channel_capacity);

        let gather = async move {
            let mut chunks = Vec::new();
            while let Some(chunk) = rx.recv().await {
                chunks.push(chunk);
            }
            chunks
        };

        let (report, mut chunks) = tokio::join!(self.run(files, tx), gather);
        chunks.sort_by(|a, b| {
            a.file_name
                .cmp(&b.file_name)
                .then_with(|| a.index.cmp(&b.index))
        });

        Ok((chunks, report?))
    }
}

async fn run_worker<S: ByteSource + 'static>(
    worker_id: usize,
    reader: Arc<ChunkReader<S>>,
    work_rx: Arc<Mutex<mpsc::Receiver<WorkItem>>>,
    out: mpsc::Sender<Chunk>,
) -> WorkerTally {
    let mut tally = WorkerTally::default();

    loop {
        let item = { work_rx.lock().await.recv().await };
        let Some(item) = item else {
            break;
        };

        let unit_reader = Arc::clone(&reader);
        let unit = item.clone();
        let outcome = tokio::task::spawn_blocking(move || process_item(&unit_reader, &unit))
            .await
            .map_err(|e| VidsplitError::WorkerFailed(e.to_string()))
            .and_then(|result| result);

        match outcome {
            Ok(chunks) => {
                for chunk in chunks {
                    let len = chunk.len() as u64;
                    if out.send(chunk).await.is_err() {
                        tracing::warn!(worker_id, "Chunk receiver closed, stopping worker");
                        return tally;
                    }
                    tally.bytes += len;
                    tally.chunks += 1;
                }
            }
            Err(e) => {
                tracing::warn!(
                    worker_id,
                    file = %item.file.name,
                    range = %item.range,
                    retryable = e.is_retryable(),
                    "Failed to process unit: {}",
                    e
                );
                tally.failed.push(FailedUnit {
                    file_name: item.file.name.clone(),
                    index: item.range.from(),
                    error: e.to_string(),
                    retryable: e.is_retryable(),
                });
            }
        }
    }

    tally
}
