// Integration tests for chunk reads

use crate::common::{patterned_bytes, TestFiles};
use vidsplit::core::reader::{ChunkReader, FileWalker, LocalFs, MemorySource};
use vidsplit::core::split::{chunk_range, split_into_units};
use vidsplit::core::types::FileDescriptor;
use vidsplit::VidsplitError;

#[test]
fn test_local_file_chunk_contents() {
    let files = TestFiles::with_sizes(&[("clip.mp4", 2500)]);
    let reader = ChunkReader::new(LocalFs::new(files.path()), 1000).unwrap();
    let file = FileDescriptor::new("clip.mp4", 2500);
    let expected = patterned_bytes(2500);

    let lengths: Vec<usize> = (1..=3)
        .map(|index| reader.read_chunk(&file, index).unwrap())
        .map(|chunk| {
            let start = (chunk.index as usize - 1) * 1000;
            assert_eq!(chunk.bytes, expected[start..start + chunk.len()]);
            chunk.len()
        })
        .collect();

    assert_eq!(lengths, vec![1000, 1000, 500]);
}

#[test]
fn test_chunk_lengths_sum_to_file_size() {
    let sizes = [0usize, 1, 999, 1000, 1001, 4096, 7777];
    let specs: Vec<(String, usize)> = sizes
        .iter()
        .map(|size| (format!("file_{size}.mp4"), *size))
        .collect();
    let refs: Vec<(&str, usize)> = specs.iter().map(|(n, s)| (n.as_str(), *s)).collect();
    let files = TestFiles::with_sizes(&refs);

    let reader = ChunkReader::new(LocalFs::new(files.path()), 1000).unwrap();
    for (name, size) in &specs {
        let file = FileDescriptor::new(name.clone(), *size as u64);
        let range = chunk_range(file.size_bytes, 1000).unwrap();

        let total: usize = split_into_units(range)
            .iter()
            .map(|unit| reader.read_chunk(&file, unit.from()).unwrap().len())
            .sum();
        assert_eq!(total, *size, "Chunk lengths of {name} do not add up");
    }
}

#[test]
fn test_empty_file_reads_one_empty_chunk() {
    let source = MemorySource::new().with_file("empty.mp4", Vec::new());
    let reader = ChunkReader::new(source, 1000).unwrap();
    let file = FileDescriptor::new("empty.mp4", 0);

    let chunk = reader.read_chunk(&file, 1).unwrap();
    assert_eq!(chunk.index, 1);
    assert!(chunk.is_empty());
}

#[test]
fn test_reads_are_idempotent() {
    let source = MemorySource::new().with_file("clip.mp4", patterned_bytes(2500));
    let reader = ChunkReader::new(source, 1000).unwrap();
    let file = FileDescriptor::new("clip.mp4", 2500);

    let first = reader.read_chunk(&file, 2).unwrap();
    let second = reader.read_chunk(&file, 2).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_local_file_fails_read() {
    let files = TestFiles::with_sizes(&[]);
    let reader = ChunkReader::new(LocalFs::new(files.path()), 1000).unwrap();
    let file = FileDescriptor::new("gone.mp4", 1500);

    assert!(matches!(
        reader.read_chunk(&file, 1),
        Err(VidsplitError::ReadFailed { index: 1, .. })
    ));
}

#[test]
fn test_escaping_path_rejected() {
    let files = TestFiles::with_sizes(&[("clip.mp4", 10)]);
    let reader = ChunkReader::new(LocalFs::new(files.path()), 1000).unwrap();
    let file = FileDescriptor::new("../clip.mp4", 10);

    assert!(matches!(
        reader.read_chunk(&file, 1),
        Err(VidsplitError::ReadFailed { .. })
    ));
}

#[test]
fn test_walker_lists_relative_names() {
    let files = TestFiles::small();
    let walker = FileWalker::new(vec!["*.mp4".to_string(), "*.mov".to_string()], vec![]).unwrap();

    let listed = walker.list_files(files.path()).unwrap();
    let names: Vec<&str> = listed.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["clip_a.mp4", "clip_b.mp4", "nested/clip_c.mov"]);
    assert_eq!(listed[0].size_bytes, 2500);
}
