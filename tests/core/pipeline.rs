// Integration tests for the chunk pipeline

use crate::common::{assert_valid_report, create_test_services, patterned_bytes, TestFiles};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use vidsplit::core::pipeline::ChunkPipeline;
use vidsplit::core::reader::MemorySource;
use vidsplit::core::types::{Chunk, FileDescriptor};

#[tokio::test]
async fn test_directory_split_end_to_end() {
    let services = create_test_services();
    let files = TestFiles::small();

    let walker = services.create_walker(vec![], vec![]).unwrap();
    let listed = walker.list_files(files.path()).unwrap();
    assert_eq!(listed.len(), 3);

    let pipeline = services.create_pipeline(files.path(), None, None).unwrap();
    let (chunks, report) = pipeline.collect(listed).await.unwrap();

    assert_valid_report(&report);
    // 2500 -> 3 chunks, 2000 -> 2 chunks, 999 -> 1 chunk
    assert_eq!(report.units_scheduled, 6);
    assert_eq!(report.bytes_read, 2500 + 2000 + 999);

    let summary: Vec<(&str, i64, usize)> = chunks
        .iter()
        .map(|c| (c.file_name.as_str(), c.index, c.len()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("clip_a.mp4", 1, 1000),
            ("clip_a.mp4", 2, 1000),
            ("clip_a.mp4", 3, 500),
            ("clip_b.mp4", 1, 1000),
            ("clip_b.mp4", 2, 1000),
            ("nested/clip_c.mov", 1, 999),
        ]
    );
}

#[tokio::test]
async fn test_reassembled_chunks_match_source() {
    let data = patterned_bytes(10_007);
    let source = MemorySource::new().with_file("long.mp4", data.clone());
    let pipeline = ChunkPipeline::new(source, 64, 8, 4).unwrap();

    let (chunks, report) = pipeline
        .collect(vec![FileDescriptor::new("long.mp4", data.len() as u64)])
        .await
        .unwrap();

    assert_valid_report(&report);
    let reassembled: Vec<u8> = chunks.into_iter().flat_map(|c| c.bytes).collect();
    assert_eq!(reassembled, data);
}

#[tokio::test]
async fn test_no_index_emitted_twice() {
    let source = Arc::new(
        MemorySource::new()
            .with_file("a.mp4", patterned_bytes(5000))
            .with_file("b.mp4", patterned_bytes(3333)),
    );
    let pipeline = ChunkPipeline::new(source, 100, 16, 2).unwrap();

    let (tx, mut rx) = mpsc::channel::<Chunk>(2);
    let files = vec![
        FileDescriptor::new("a.mp4", 5000),
        FileDescriptor::new("b.mp4", 3333),
    ];

    let gather = async move {
        let mut seen = HashSet::new();
        while let Some(chunk) = rx.recv().await {
            assert!(
                seen.insert((chunk.file_name.clone(), chunk.index)),
                "Duplicate chunk {} of {}",
                chunk.index,
                chunk.file_name
            );
        }
        seen
    };

    let (report, seen) = tokio::join!(pipeline.run(files, tx), gather);
    let report = report.unwrap();

    assert_valid_report(&report);
    assert_eq!(seen.len(), 50 + 34);
}

#[tokio::test]
async fn test_failed_unit_does_not_stop_others() {
    let source = MemorySource::new().with_file("present.mp4", patterned_bytes(2500));
    let pipeline = ChunkPipeline::new(source, 1000, 2, 4).unwrap();

    let (chunks, report) = pipeline
        .collect(vec![
            FileDescriptor::new("present.mp4", 2500),
            FileDescriptor::new("missing.mp4", 1500),
        ])
        .await
        .unwrap();

    assert_eq!(chunks.len(), 3);
    assert_eq!(report.failed.len(), 2);
    assert!(!report.is_complete());
    assert!(report.failed.iter().all(|f| f.retryable));

    let mut failed: Vec<(String, i64)> = report
        .failed
        .iter()
        .map(|f| (f.file_name.clone(), f.index))
        .collect();
    failed.sort();
    assert_eq!(
        failed,
        vec![("missing.mp4".to_string(), 1), ("missing.mp4".to_string(), 2)]
    );
}

#[tokio::test]
async fn test_dropped_receiver_stops_workers() {
    let source = MemorySource::new().with_file("a.mp4", patterned_bytes(10_000));
    let pipeline = ChunkPipeline::new(source, 10, 2, 1).unwrap();

    let (tx, rx) = mpsc::channel::<Chunk>(1);
    drop(rx);

    let report = tokio::time::timeout(
        Duration::from_secs(10),
        pipeline.run(vec![FileDescriptor::new("a.mp4", 10_000)], tx),
    )
    .await
    .expect("run should return after the receiver closes")
    .unwrap();

    assert_eq!(report.units_scheduled, 1000);
    assert_eq!(report.chunks_emitted, 0);
    assert!(!report.is_complete());
}

#[tokio::test]
async fn test_receiver_closed_midway_reports_delivered_only() {
    let source = MemorySource::new().with_file("a.mp4", patterned_bytes(1000));
    let pipeline = ChunkPipeline::new(source, 10, 4, 2).unwrap();

    let (tx, mut rx) = mpsc::channel::<Chunk>(1);
    let take_five = async move {
        let mut received = 0;
        while received < 5 {
            if rx.recv().await.is_none() {
                break;
            }
            received += 1;
        }
        received
    };

    let (report, received) = tokio::time::timeout(
        Duration::from_secs(10),
        async { tokio::join!(pipeline.run(vec![FileDescriptor::new("a.mp4", 1000)], tx), take_five) },
    )
    .await
    .expect("run should return after the receiver closes");
    let report = report.unwrap();

    assert_eq!(received, 5);
    // A chunk may sit in the channel buffer when the receiver drops
    assert!(report.chunks_emitted >= 5 && report.chunks_emitted <= 6);
    assert!(report.chunks_emitted < report.units_scheduled);
}
