//! Filesystem abstraction used by the resolver.
//!
//! The resolver only ever asks two questions of the outside world: does a
//! candidate path exist, and what text does it hold. [`FileSystem`] captures
//! exactly that so resolution can run against disk or an in-memory tree.

// NativeFileSystem wraps std::fs
#![allow(clippy::disallowed_methods)]

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::error::{DocInfoError, Result};

/// Read-only file access.
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    /// Check if a regular file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read a file as UTF-8 text.
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// Native filesystem backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFileSystem;

impl NativeFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for NativeFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|error| DocInfoError::io(path, error))
    }
}

/// In-memory file tree keyed by exact path.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            DocInfoError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            )
        })
    }
}
