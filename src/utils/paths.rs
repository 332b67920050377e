//! Path utilities for normalization and display.

use std::path::{Component, Path, PathBuf};

/// Normalizes a path by resolving `.` and `..` components.
///
/// Purely lexical: the filesystem is never consulted, so symlinks are not
/// followed and the path need not exist. A `..` directly under the root of an
/// absolute path is dropped.
///
/// # Examples
///
/// ```rust
/// use sfc_inherit::utils::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// let path = Path::new("/app/src/./components/../layouts/Base.vue");
/// assert_eq!(normalize_path(path), PathBuf::from("/app/src/layouts/Base.vue"));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Render a chain of paths as `a -> b -> c`.
#[must_use]
pub fn display_chain<P: AsRef<Path>>(paths: &[P]) -> String {
    paths.iter().map(|p| p.as_ref().display().to_string()).collect::<Vec<_>>().join(" -> ")
}
