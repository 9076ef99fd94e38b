//! Tests for the split-files command

use super::test_helpers::{create_cli_test_services, split_args};
use crate::common::{patterned_bytes, TestFiles};
use tempfile::TempDir;
use vidsplit::cli::commands::split;
use vidsplit::cli::OutputFormat;

/// Directory split writes one file per chunk
#[tokio::test]
async fn test_split_directory_writes_chunks() {
    let (services, _temp) = create_cli_test_services();
    let files = TestFiles::with_sizes(&[("clip.mp4", 2500), ("cams/front.mov", 1000)]);
    let output = TempDir::new().unwrap();

    let mut args = split_args(files.path().to_path_buf());
    args.output = Some(output.path().to_path_buf());

    split::execute(args, &services, OutputFormat::Human)
        .await
        .expect("Split should succeed");

    let data = patterned_bytes(2500);
    let chunk_3 = std::fs::read(output.path().join("clip.mp4/000003.chunk")).unwrap();
    assert_eq!(chunk_3, data[2000..]);
    assert!(output.path().join("clip.mp4/000001.chunk").exists());
    assert!(output.path().join("clip.mp4/000002.chunk").exists());
    assert!(!output.path().join("clip.mp4/000004.chunk").exists());

    let front = std::fs::read(output.path().join("cams/front.mov/000001.chunk")).unwrap();
    assert_eq!(front.len(), 1000);
}

/// A single file argument is split on its own
#[tokio::test]
async fn test_split_single_file() {
    let (services, _temp) = create_cli_test_services();
    let files = TestFiles::with_sizes(&[("clip.mp4", 2000)]);
    let output = TempDir::new().unwrap();

    let mut args = split_args(files.path().join("clip.mp4"));
    args.output = Some(output.path().to_path_buf());
    args.chunk_size = Some(500);

    split::execute(args, &services, OutputFormat::Json)
        .await
        .expect("Split should succeed");

    for index in 1..=4 {
        let chunk = std::fs::read(output.path().join(format!("clip.mp4/{index:06}.chunk"))).unwrap();
        assert_eq!(chunk.len(), 500);
    }
    assert!(!output.path().join("clip.mp4/000005.chunk").exists());
}

/// An empty file still produces one (empty) chunk
#[tokio::test]
async fn test_split_empty_file() {
    let (services, _temp) = create_cli_test_services();
    let files = TestFiles::with_sizes(&[("empty.mp4", 0)]);
    let output = TempDir::new().unwrap();

    let mut args = split_args(files.path().join("empty.mp4"));
    args.output = Some(output.path().to_path_buf());

    split::execute(args, &services, OutputFormat::Human)
        .await
        .unwrap();

    let chunk = std::fs::read(output.path().join("empty.mp4/000001.chunk")).unwrap();
    assert!(chunk.is_empty());
}

/// Nonexistent paths are reported
#[tokio::test]
async fn test_split_missing_path() {
    let (services, _temp) = create_cli_test_services();
    let args = split_args("/nonexistent/videos".into());

    let err = split::execute(args, &services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid path"));
}

/// Directories without matching files are reported
#[tokio::test]
async fn test_split_no_matching_files() {
    let (services, _temp) = create_cli_test_services();
    let files = TestFiles::with_sizes(&[("notes.txt", 10)]);

    let err = split::execute(split_args(files.path().to_path_buf()), &services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No files to split"));
}

/// Zero chunk size is rejected before any read
#[tokio::test]
async fn test_split_zero_chunk_size() {
    let (services, _temp) = create_cli_test_services();
    let files = TestFiles::with_sizes(&[("clip.mp4", 10)]);

    let mut args = split_args(files.path().to_path_buf());
    args.chunk_size = Some(0);

    assert!(split::execute(args, &services, OutputFormat::Human)
        .await
        .is_err());
}
