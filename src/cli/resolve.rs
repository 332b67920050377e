//! `resolve` command: print a component with its inheritance chain merged.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::common::ComponentArgs;
use crate::core::FileOps;

/// Merge a component with its ancestors and output the final source.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    #[command(flatten)]
    pub component: ComponentArgs,

    /// Write the resolved component here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl ResolveCommand {
    pub async fn execute(self, config_path: Option<&Path>, quiet: bool) -> Result<()> {
        let (file, resolver) = self.component.prepare(config_path).await?;
        let resolved = resolver
            .resolve_component_file(&file)
            .await
            .with_context(|| format!("Failed to resolve {}", file.display()))?;

        let Some(output) = self.output else {
            print!("{}", resolved.source);
            return Ok(());
        };

        FileOps::write_with_context(&output, &resolved.source, "writing resolved component")
            .await?;
        if !quiet {
            println!(
                "{} Resolved {} ({} ancestor(s)) -> {}",
                "✓".green(),
                file.display(),
                resolved.ancestor_paths.len(),
                output.display()
            );
        }
        Ok(())
    }
}
