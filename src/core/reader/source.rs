//! Random-access byte sources.
//!
//! The chunk reader never touches storage directly. It asks a
//! `ByteSource` to open a seekable handle for a file name, uses
//! it for one read, and drops it.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Capability to open a random-access read handle by file name.
pub trait ByteSource: Send + Sync {
    /// Seekable handle; released when dropped
    type Handle: Read + Seek;

    fn open(&self, name: &str) -> io::Result<Self::Handle>;
}

impl<S: ByteSource + ?Sized> ByteSource for Arc<S> {
    type Handle = S::Handle;

    fn open(&self, name: &str) -> io::Result<Self::Handle> {
        (**self).open(name)
    }
}

/// Files under a local root directory
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("file name escapes source root: {name}"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl ByteSource for LocalFs {
    type Handle = File;

    fn open(&self, name: &str) -> io::Result<File> {
        File::open(self.resolve(name)?)
    }
}

/// In-memory files, keyed by name
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Arc<[u8]>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), Arc::from(bytes.into()));
    }

    pub fn with_file(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }
}

/// Shared read-only view of an in-memory file
#[derive(Debug, Clone)]
pub struct SharedBytes(Arc<[u8]>);

impl AsRef<[u8]> for SharedBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl ByteSource for MemorySource {
    type Handle = Cursor<SharedBytes>;

    fn open(&self, name: &str) -> io::Result<Self::Handle> {
        self.files
            .get(name)
            .map(|bytes| Cursor::new(SharedBytes(Arc::clone(bytes))))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no such file: {name}")))
    }
}
