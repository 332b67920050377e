//! sfc-inherit - template inheritance for single-file components
//!
//! A component may declare that it extends a base component and fill named
//! extension points the base defines. Points nobody fills keep the base's
//! default content. Inheritance chains can be any depth: an intermediate
//! component may leave a point open for a further descendant to fill.
//!
//! ```text
//! <!-- layouts/Page.vue -->
//! <template>
//!   <main>
//!     <extension-point name="content">Nothing here yet</extension-point>
//!   </main>
//! </template>
//!
//! <!-- views/Home.vue -->
//! <template extends="../layouts/Page.vue">
//!   <extensions>
//!     <extension point="content"><h1>Home</h1></extension>
//!   </extensions>
//! </template>
//! <script>export default { name: 'Home' }</script>
//! ```
//!
//! Resolving `Home.vue` yields a component whose template is `Page.vue`'s with
//! `<h1>Home</h1>` in place of the extension point, and whose script, styles
//! and custom blocks are `Home.vue`'s own. Ancestor scripts and styles are
//! never merged.
//!
//! # Pipeline
//!
//! 1. [`sfc`] splits the source into template, script, style and custom sections
//! 2. [`resolver`] follows `extends` through [`resolver::path_resolver`] and an
//!    [`resolver::AncestorLoader`], resolving each ancestor recursively
//! 3. [`resolver::merge`] splices extension blocks into the base's
//!    [`markup`] tree
//! 4. [`finalizer`] turns every still-open extension point into plain
//!    fallback content
//!
//! # Modules
//!
//! - [`cli`] - the `sfc-inherit` command line
//! - [`config`] - tag vocabulary, path aliases and `sfc-inherit.toml`
//! - [`core`] - error types and file operation context
//! - [`markup`] - template markup parser and serializer
//! - [`utils`] - path normalization
//!
//! # Library use
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use sfc_inherit::{ResolveOptions, FsLoader, resolve_component};
//!
//! # async fn example() -> sfc_inherit::core::Result<()> {
//! let source = std::fs::read_to_string("src/views/Home.vue").unwrap();
//! let options = Arc::new(ResolveOptions::default());
//! let resolved =
//!     resolve_component(&source, Path::new("src/views"), options, FsLoader).await?;
//! println!("{}", resolved.source);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod finalizer;
pub mod markup;
pub mod resolver;
pub mod sfc;
pub mod utils;

// Test utilities (only available in test builds or with test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use std::path::Path;
use std::sync::Arc;

pub use crate::config::{AliasMode, AliasTable, ResolveOptions, Vocabulary};
pub use crate::core::{InheritError, Result};
pub use crate::resolver::{
    AncestorLoader, FsLoader, InheritanceResolver, Resolution, ResolvedComponent,
};

/// Resolve `source` against its ancestors and finalize the result.
///
/// `context_dir` is the directory of the file `source` came from. The returned
/// [`ResolvedComponent::ancestor_paths`] lists every ancestor file consulted,
/// farthest first, for the caller to register as rebuild dependencies.
///
/// # Errors
///
/// The first [`InheritError`] raised anywhere in the chain; there is no
/// partial result.
pub async fn resolve_component<L: AncestorLoader>(
    source: &str,
    context_dir: &Path,
    options: Arc<ResolveOptions>,
    loader: L,
) -> Result<ResolvedComponent> {
    InheritanceResolver::new(options, loader).resolve_component(source, context_dir).await
}
