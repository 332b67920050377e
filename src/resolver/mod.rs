//! Component inheritance resolution.
//!
//! The resolver walks a component's `extends` chain up to a root component
//! that extends nothing, then merges the chain back down one level at a time:
//!
//! ```text
//! Leaf.vue --extends--> Mid.vue --extends--> Root.vue
//!
//! resolve(Leaf)
//!   resolve(Mid)
//!     resolve(Root)            -> Root source unchanged, chain []
//!   merge(Root, Mid blocks)    -> chain [Root]
//! merge(Root+Mid, Leaf blocks) -> chain [Root, Mid]
//! ```
//!
//! Each level resolves the next `extends` reference against its *own*
//! directory and the shared alias table, so a relative reference in an
//! ancestor is always relative to that ancestor's file.
//!
//! # Modules
//!
//! - [`path_resolver`] - `extends` reference to absolute path
//! - [`loader`] - the [`AncestorLoader`] seam and the filesystem loader
//! - [`merge`] - extension block collection and tree splicing
//!
//! # Concurrency
//!
//! A resolver holds only immutable state ([`ResolveOptions`] behind an `Arc`
//! and a loader), so one instance can serve any number of concurrent
//! resolutions. The per-request resolution stack lives on the call, not on the
//! resolver.

pub mod loader;
pub mod merge;
pub mod path_resolver;

pub use loader::{AncestorLoader, FsLoader, LoadFuture};
pub use merge::{collect_extension_blocks, fill_extension_points, merge_component};
pub use path_resolver::resolve_path;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use crate::config::ResolveOptions;
use crate::core::{InheritError, Result};
use crate::finalizer::finalize;
use crate::sfc::split_into_sections;
use crate::utils::display_chain;

const INLINE_ORIGIN: &str = "<input>";

/// Merged, not yet finalized, output of one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Component source with every ancestor merged in
    pub merged_source: String,
    /// Ancestor files consulted, farthest ancestor first
    pub ancestor_paths: Vec<PathBuf>,
}

/// Fully resolved and finalized component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedComponent {
    /// Final component source, free of inheritance markup
    pub source: String,
    /// Ancestor files to register as rebuild dependencies, farthest first
    pub ancestor_paths: Vec<PathBuf>,
}

/// Resolves component inheritance chains.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use std::sync::Arc;
/// use sfc_inherit::config::ResolveOptions;
/// use sfc_inherit::resolver::{FsLoader, InheritanceResolver};
///
/// # async fn example() -> sfc_inherit::core::Result<()> {
/// let resolver = InheritanceResolver::new(Arc::new(ResolveOptions::default()), FsLoader);
/// let resolved = resolver.resolve_component_file(Path::new("src/views/Home.vue")).await?;
/// for ancestor in &resolved.ancestor_paths {
///     println!("depends on {}", ancestor.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InheritanceResolver<L> {
    options: Arc<ResolveOptions>,
    loader: L,
}

impl<L: AncestorLoader> InheritanceResolver<L> {
    pub fn new(options: Arc<ResolveOptions>, loader: L) -> Self {
        Self {
            options,
            loader,
        }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Merge `source` with its ancestors.
    ///
    /// `context_dir` is the directory relative `extends` references in
    /// `source` are resolved against. A component without an `extends`
    /// attribute on its template is returned unchanged with no ancestors.
    ///
    /// # Errors
    ///
    /// The first failure anywhere in the chain: [`InheritError::Parse`],
    /// [`InheritError::Io`], [`InheritError::InvalidReference`],
    /// [`InheritError::DuplicateExtension`] or
    /// [`InheritError::CircularInheritance`].
    pub async fn resolve(&self, source: &str, context_dir: &Path) -> Result<Resolution> {
        let mut stack = Vec::new();
        self.resolve_level(source, context_dir, None, &mut stack).await
    }

    /// Load the component at `path` through the loader and merge it with its
    /// ancestors. A chain that leads back to `path` is reported as circular.
    pub async fn resolve_file(&self, path: &Path) -> Result<Resolution> {
        let source = self.loader.load(path).await?;
        let context_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let mut stack = vec![path.to_path_buf()];
        self.resolve_level(&source, context_dir, Some(path), &mut stack).await
    }

    /// [`resolve`](Self::resolve) followed by finalization.
    pub async fn resolve_component(
        &self,
        source: &str,
        context_dir: &Path,
    ) -> Result<ResolvedComponent> {
        let resolution = self.resolve(source, context_dir).await?;
        self.finish(resolution)
    }

    /// [`resolve_file`](Self::resolve_file) followed by finalization.
    pub async fn resolve_component_file(&self, path: &Path) -> Result<ResolvedComponent> {
        let resolution = self.resolve_file(path).await?;
        self.finish(resolution)
    }

    fn finish(&self, resolution: Resolution) -> Result<ResolvedComponent> {
        let source = finalize(&resolution.merged_source, &self.options.vocabulary)?;
        Ok(ResolvedComponent {
            source,
            ancestor_paths: resolution.ancestor_paths,
        })
    }

    /// One level of the chain. Boxed so the recursion has a nameable,
    /// `Send` future type.
    fn resolve_level<'a>(
        &'a self,
        source: &'a str,
        context_dir: &'a Path,
        origin: Option<&'a Path>,
        stack: &'a mut Vec<PathBuf>,
    ) -> Pin<Box<dyn Future<Output = Result<Resolution>> + Send + 'a>> {
        Box::pin(async move {
            let vocab = &self.options.vocabulary;
            let origin_name =
                origin.map_or_else(|| INLINE_ORIGIN.to_string(), |p| p.display().to_string());

            let descriptor = split_into_sections(source, &origin_name)?;
            let Some(reference) =
                descriptor.template.as_ref().and_then(|t| t.attrs.get(&vocab.extends_attr))
            else {
                tracing::trace!("{origin_name} extends nothing");
                return Ok(Resolution {
                    merged_source: source.to_string(),
                    ancestor_paths: Vec::new(),
                });
            };

            let base_path = resolve_path(reference, context_dir, &self.options.aliases)?;
            tracing::debug!("{origin_name} extends '{reference}' -> {}", base_path.display());

            if stack.contains(&base_path) {
                let mut chain = stack.clone();
                chain.push(base_path);
                return Err(InheritError::CircularInheritance {
                    chain: display_chain(&chain),
                });
            }

            let base_source = self.loader.load(&base_path).await?;
            tracing::debug!("Loaded base component {}", base_path.display());

            let base_dir = base_path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
            stack.push(base_path.clone());
            let base = self.resolve_level(&base_source, &base_dir, Some(&base_path), stack).await;
            stack.pop();
            let base = base?;

            let base_origin = base_path.display().to_string();
            let merged_source = merge_component(
                &base.merged_source,
                &base_origin,
                &descriptor,
                &origin_name,
                vocab,
            )?;

            let mut ancestor_paths = base.ancestor_paths;
            ancestor_paths.push(base_path);

            Ok(Resolution {
                merged_source,
                ancestor_paths,
            })
        })
    }
}
