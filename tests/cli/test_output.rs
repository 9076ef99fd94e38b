//! Tests for CLI output formatting helpers
//!
//! Tests the output formatting utilities:
//! - Byte formatting (KB, MB, GB)
//! - Duration formatting (ms, s, m)
//! - Argument parsing of the top-level CLI

use clap::Parser;
use vidsplit::cli::output::{format_bytes, format_duration};
use vidsplit::cli::{Cli, Commands, LogFormat, OutputFormat};

// =============================================================================
// format_bytes tests
// =============================================================================

/// Test byte formatting with various sizes
#[test]
fn test_format_bytes_various_sizes() {
    assert_eq!(format_bytes(0), "0 B");
    assert_eq!(format_bytes(1023), "1023 B");
    assert_eq!(format_bytes(1024), "1.0 KB");
    assert_eq!(format_bytes(1572864), "1.5 MB");
    assert_eq!(format_bytes(10737418240), "10.0 GB");
}

// =============================================================================
// format_duration tests
// =============================================================================

#[test]
fn test_format_duration_various_times() {
    assert_eq!(format_duration(0.0), "0ms");
    assert_eq!(format_duration(0.25), "250ms");
    assert_eq!(format_duration(2.0), "2.00s");
    assert_eq!(format_duration(125.0), "2m 5.0s");
}

// =============================================================================
// argument parsing tests
// =============================================================================

#[test]
fn test_parse_split_files() {
    let cli = Cli::try_parse_from([
        "vidsplit",
        "split-files",
        "/videos",
        "--chunk-size",
        "4096",
        "-w",
        "8",
        "-i",
        "*.mp4",
        "--format",
        "json",
    ])
    .unwrap();

    assert_eq!(cli.format, OutputFormat::Json);
    assert_eq!(cli.log_format, LogFormat::Text);
    match cli.command {
        Commands::SplitFiles(args) => {
            assert_eq!(args.chunk_size, Some(4096));
            assert_eq!(args.workers, Some(8));
            assert_eq!(args.include, vec!["*.mp4".to_string()]);
        }
        other => panic!("Expected split-files, got {other:?}"),
    }
}

#[test]
fn test_parse_filter_annotations() {
    let cli = Cli::try_parse_from([
        "vidsplit",
        "--log-format",
        "json",
        "filter-annotations",
        "-",
        "--topic",
        "alerts",
        "--entity",
        "person",
        "--entity",
        "car",
        "--min-confidence",
        "0.8",
        "--fail-fast",
    ])
    .unwrap();

    assert_eq!(cli.log_format, LogFormat::Json);
    match cli.command {
        Commands::FilterAnnotations(args) => {
            assert_eq!(args.topic.as_deref(), Some("alerts"));
            assert_eq!(args.entities, vec!["person".to_string(), "car".to_string()]);
            assert_eq!(args.min_confidence, Some(0.8));
            assert!(args.fail_fast);
            assert!(!args.stdout);
        }
        other => panic!("Expected filter-annotations, got {other:?}"),
    }
}

#[test]
fn test_parse_rejects_unknown_command() {
    assert!(Cli::try_parse_from(["vidsplit", "index"]).is_err());
}
