//! Test utilities for sfc-inherit
//!
//! Helpers shared by unit and integration tests:
//! - [`init_test_logging`] installs a once-only tracing subscriber
//! - [`MemoryLoader`] serves ancestor components from memory
//! - [`ComponentTree`] writes component files into a temporary directory
//!
//! # Example
//!
//! ```rust,no_run
//! use sfc_inherit::test_utils::ComponentTree;
//!
//! let tree = ComponentTree::new().unwrap();
//! let base = tree.write("layouts/Base.vue", "<template><p/></template>").unwrap();
//! assert!(base.exists());
//! ```

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::core::{FileOperation, FileOperationError};
use crate::resolver::{AncestorLoader, LoadFuture};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `level` set that level is used;
/// otherwise logging is enabled only when `RUST_LOG` is set.
///
/// ```bash
/// RUST_LOG=sfc_inherit=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// In-memory [`AncestorLoader`] keyed by exact path.
///
/// Unknown paths fail with a `NotFound` error, like a missing file would.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<PathBuf, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl AncestorLoader for MemoryLoader {
    fn load<'a>(&'a self, path: &'a Path) -> LoadFuture<'a> {
        let result = self.files.get(path).cloned().ok_or_else(|| {
            FileOperationError::new(
                FileOperation::Read,
                path,
                "loading base component",
                std::io::Error::new(std::io::ErrorKind::NotFound, "not in memory loader"),
            )
        });
        Box::pin(async move { result })
    }
}

/// Temporary directory of component files.
pub struct ComponentTree {
    temp_dir: TempDir,
}

impl ComponentTree {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new().context("Failed to create temp directory")?,
        })
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `relative`, creating parent directories, and return
    /// the absolute path.
    pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Absolute, symlink-free path of `relative`, matching what the resolver
    /// reports for files reached from a canonicalized entry point.
    pub fn canonical(&self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(relative);
        std::fs::canonicalize(&path)
            .with_context(|| format!("Failed to canonicalize {}", path.display()))
    }
}
