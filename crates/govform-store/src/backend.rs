//! Document backends
//!
//! A [`DocumentBackend`] loads and stores one whole JSON document. Stores are
//! written against the trait so the file on disk can be swapped for an
//! in-memory document in tests.

use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Capability to load and store a single document
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Load the document text
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> StoreResult<Option<String>>;

    /// Replace the document text
    async fn store(&self, contents: String) -> StoreResult<()>;
}

/// One JSON file on disk
///
/// The parent directory is created on demand before every operation.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create backend for `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent(&self) -> StoreResult<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| StoreError::io_error(dir, e)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentBackend for FileBackend {
    async fn load(&self) -> StoreResult<Option<String>> {
        self.ensure_parent().await?;
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io_error(&self.path, e)),
        }
    }

    async fn store(&self, contents: String) -> StoreResult<()> {
        self.ensure_parent().await?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| StoreError::io_error(&self.path, e))
    }
}

/// In-memory document, for tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemoryBackend {
    contents: Mutex<Option<String>>,
    writes: AtomicUsize,
}

impl MemoryBackend {
    /// Create empty backend
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create backend pre-loaded with `contents`
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
            writes: AtomicUsize::new(0),
        }
    }

    /// Current document text
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }

    /// Number of completed stores
    #[inline]
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn load(&self) -> StoreResult<Option<String>> {
        Ok(self.contents.lock().clone())
    }

    async fn store(&self, contents: String) -> StoreResult<()> {
        *self.contents.lock() = Some(contents);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
