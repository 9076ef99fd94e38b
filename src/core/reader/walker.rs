//! Local storage listing with pattern-based filtering.
//!
//! Produces the `FileDescriptor`s the chunk pipeline splits. Names
//! are relative to the listing root so they can be opened through
//! a `LocalFs` rooted at the same directory. Errors on individual
//! entries (permission denied, etc.) are logged and skipped.

use glob::Pattern;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{Result, VidsplitError};
use crate::core::types::FileDescriptor;

/// File system walker with pattern-based filtering
pub struct FileWalker {
    /// Patterns to include (e.g., "*.mp4", "*.mov")
    include_patterns: Vec<Pattern>,

    /// Patterns to exclude (e.g., "**/.git/**", "**/*.part")
    exclude_patterns: Vec<Pattern>,
}

impl FileWalker {
    /// Create a new file walker
    ///
    /// # Arguments
    ///
    /// * `include_patterns` - Glob patterns for files to include
    ///   (empty means every file)
    /// * `exclude_patterns` - Glob patterns for files to exclude
    ///
    /// # Returns
    ///
    /// A new `FileWalker` instance or an error if patterns are
    /// invalid
    pub fn new(include_patterns: Vec<String>, exclude_patterns: Vec<String>) -> Result<Self> {
        let include = compile_patterns(include_patterns, "include")?;
        let exclude = compile_patterns(exclude_patterns, "exclude")?;

        Ok(Self {
            include_patterns: include,
            exclude_patterns: exclude,
        })
    }

    /// List all matching files below `root`
    ///
    /// Descriptors are sorted by name. Each name is the path
    /// relative to `root`, using `/` as separator.
    ///
    /// # Errors
    ///
    /// `InvalidPath` if `root` is not a directory.
    pub fn list_files(&self, root: &Path) -> Result<Vec<FileDescriptor>> {
        if !root.is_dir() {
            return Err(VidsplitError::InvalidPath(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e, root))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.matches_patterns(path) {
                continue;
            }

            let size_bytes = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    tracing::warn!("Skipping {:?}: {}", path, e);
                    continue;
                }
            };

            match relative_name(root, path) {
                Some(name) => files.push(FileDescriptor::new(name, size_bytes)),
                None => tracing::warn!("Skipping non-UTF-8 path: {:?}", path),
            }
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Determine if a directory entry should be processed
    ///
    /// Filters out hidden directories and excluded patterns.
    /// Never filters the root directory itself.
    fn should_process_entry(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();

        if path == root {
            return true;
        }

        if entry.file_type().is_dir() {
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.starts_with('.'));
            if hidden {
                return false;
            }

            if self.exclude_patterns.iter().any(|p| p.matches_path(path)) {
                tracing::debug!("Skipping excluded directory: {:?}", path);
                return false;
            }
        }

        true
    }

    /// Check if a file path matches the include/exclude patterns
    fn matches_patterns(&self, path: &Path) -> bool {
        let Some(path_str) = path.to_str() else {
            return false;
        };

        // Match against both full path and file name
        let matches_include = self.include_patterns.is_empty()
            || self.include_patterns.iter().any(|p| {
                p.matches(path_str)
                    || path
                        .file_name()
                        .and_then(|f| f.to_str())
                        .is_some_and(|f| p.matches(f))
            });

        matches_include
            && !self
                .exclude_patterns
                .iter()
                .any(|p| p.matches(path_str) || p.matches_path(path))
    }
}

fn compile_patterns(patterns: Vec<String>, kind: &str) -> Result<Vec<Pattern>> {
    patterns
        .into_iter()
        .map(|p| {
            Pattern::new(&p)
                .map_err(|e| VidsplitError::ConfigError(format!("Invalid {kind} pattern '{p}': {e}")))
        })
        .collect()
}

fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}
