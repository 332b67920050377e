//! `deps` command: list the ancestor files a component depends on.
//!
//! Build integrations use this to register every ancestor as a rebuild
//! dependency of the component.
//!
//! ```text
//! $ sfc-inherit deps src/views/Home.vue
//! /app/src/layouts/Root.vue
//! /app/src/layouts/Page.vue
//!
//! $ sfc-inherit deps src/views/Home.vue --format json
//! {
//!   "component": "/app/src/views/Home.vue",
//!   "ancestors": ["/app/src/layouts/Root.vue", "/app/src/layouts/Page.vue"]
//! }
//! ```

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::Path;

use super::common::ComponentArgs;

/// Output format for `deps`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DepsFormat {
    /// One path per line, farthest ancestor first
    #[default]
    Text,
    /// JSON object with the component and its ancestors
    Json,
}

/// Resolve a component and report its ancestor chain.
#[derive(Args, Debug)]
pub struct DepsCommand {
    #[command(flatten)]
    pub component: ComponentArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = DepsFormat::Text)]
    pub format: DepsFormat,
}

impl DepsCommand {
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let (file, resolver) = self.component.prepare(config_path).await?;
        let resolution = resolver
            .resolve_file(&file)
            .await
            .with_context(|| format!("Failed to resolve {}", file.display()))?;

        match self.format {
            DepsFormat::Text => {
                for ancestor in &resolution.ancestor_paths {
                    println!("{}", ancestor.display());
                }
            }
            DepsFormat::Json => {
                let json = serde_json::json!({
                    "component": file.display().to_string(),
                    "ancestors": resolution
                        .ancestor_paths
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        Ok(())
    }
}
