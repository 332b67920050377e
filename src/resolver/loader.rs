//! Ancestor source loading.
//!
//! The resolver never touches storage directly; every base component is read
//! through an [`AncestorLoader`]. Reading is the only point where a resolution
//! suspends.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use crate::core::{FileOperationError, FileOps};

/// Boxed future returned by [`AncestorLoader::load`].
pub type LoadFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, FileOperationError>> + Send + 'a>>;

/// Source of base component contents.
///
/// Implementations must report a missing or unreadable file as an error
/// carrying the path; the resolver never treats a failed read as a base case.
pub trait AncestorLoader: Send + Sync {
    /// Read the full UTF-8 contents of the component at `path`.
    fn load<'a>(&'a self, path: &'a Path) -> LoadFuture<'a>;
}

/// Loads ancestors from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl AncestorLoader for FsLoader {
    fn load<'a>(&'a self, path: &'a Path) -> LoadFuture<'a> {
        Box::pin(FileOps::read_with_context(path, "loading base component"))
    }
}

impl<L: AncestorLoader + ?Sized> AncestorLoader for &L {
    fn load<'a>(&'a self, path: &'a Path) -> LoadFuture<'a> {
        (**self).load(path)
    }
}

impl<L: AncestorLoader + ?Sized> AncestorLoader for Arc<L> {
    fn load<'a>(&'a self, path: &'a Path) -> LoadFuture<'a> {
        (**self).load(path)
    }
}
