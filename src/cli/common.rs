//! Arguments and setup shared by the component commands.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{AliasMode, ConfigFile, anchor_alias_target};
use crate::core::FileOps;
use crate::resolver::{FsLoader, InheritanceResolver};

/// Component file plus alias overrides.
#[derive(Args, Debug, Clone)]
pub struct ComponentArgs {
    /// Component file to resolve
    pub file: PathBuf,

    /// Extra path alias as KEY=DIR (repeatable)
    ///
    /// Appended after the aliases from sfc-inherit.toml. A relative DIR is
    /// taken relative to the current directory.
    ///
    /// ```bash
    /// sfc-inherit resolve Home.vue --alias @=src --alias ~ui=../shared/ui
    /// ```
    #[arg(short, long = "alias", value_name = "KEY=DIR", value_parser = parse_alias)]
    pub aliases: Vec<(String, PathBuf)>,

    /// How alias keys are matched, overriding the configuration file
    #[arg(long, value_enum)]
    pub alias_mode: Option<AliasMode>,
}

impl ComponentArgs {
    /// Canonical component path and a resolver configured for it.
    pub(crate) async fn prepare(
        &self,
        config_path: Option<&Path>,
    ) -> Result<(PathBuf, InheritanceResolver<FsLoader>)> {
        let file = FileOps::canonicalize_with_context(&self.file, "locating component")
            .await
            .with_context(|| format!("Cannot resolve component {}", self.file.display()))?;
        let start_dir = file.parent().unwrap_or_else(|| Path::new(""));

        let config = ConfigFile::load_with_optional(config_path, start_dir).await?;

        let cwd = std::env::current_dir().context("Failed to read the current directory")?;
        let extra = self
            .aliases
            .iter()
            .map(|(key, dir)| (key.clone(), anchor_alias_target(&cwd, dir)))
            .collect();

        let options = config.into_options(extra, self.alias_mode)?;
        tracing::debug!(
            "Resolving {} with {} alias(es) in {:?} mode",
            file.display(),
            options.aliases.len(),
            options.aliases.mode()
        );
        Ok((file, InheritanceResolver::new(Arc::new(options), FsLoader)))
    }
}

/// Parse `KEY=DIR`.
fn parse_alias(value: &str) -> std::result::Result<(String, PathBuf), String> {
    let (key, dir) =
        value.split_once('=').ok_or_else(|| format!("expected KEY=DIR, got '{value}'"))?;
    if key.is_empty() {
        return Err("alias key is empty".to_string());
    }
    if dir.is_empty() {
        return Err(format!("alias '{key}' has no directory"));
    }
    Ok((key.to_string(), PathBuf::from(dir)))
}
