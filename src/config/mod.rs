//! Resolution configuration.
//!
//! Everything a resolution needs besides the component itself lives in an
//! immutable [`ResolveOptions`]: the tag/attribute [`Vocabulary`] and the
//! [`AliasTable`]. Options are built once per invocation and shared by `Arc`,
//! so concurrent resolutions never observe each other's settings.
//!
//! # File format (`sfc-inherit.toml`)
//!
//! ```toml
//! alias_mode = "prefix"        # or "pattern"
//!
//! [aliases]                    # tried in the order written, first match wins
//! "@" = "src"                  # relative targets resolve against this file's directory
//! "~shared" = "/opt/shared/components"
//!
//! [vocabulary]
//! extension_point_tag = "slot-point"
//! extends_attr = "inherits"
//! ```

mod aliases;

pub use aliases::{AliasMode, AliasTable};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::{FileOps, InheritError, Result};
use crate::utils::normalize_path;

/// File name looked up next to (and above) the component being resolved.
pub const CONFIG_FILE_NAME: &str = "sfc-inherit.toml";

/// Tag and attribute names that drive inheritance.
///
/// Every name is independently overridable; unset fields keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Vocabulary {
    /// Element marking a named slot in a base template (`<extension-point name="header">`)
    pub extension_point_tag: String,
    /// Container holding a derived component's extension blocks
    pub extensions_tag: String,
    /// One extension block inside the container (`<extension point="header">`)
    pub extension_tag: String,
    /// Attribute naming an extension point
    pub point_name_attr: String,
    /// Attribute on an extension block naming the point it fills
    pub point_ref_attr: String,
    /// Template flag marking a merged template that may still hold open points
    pub extendable_attr: String,
    /// Template attribute referencing the base component
    pub extends_attr: String,
    /// Tag extension points are rewritten to once filled or finalized
    pub container_tag: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            extension_point_tag: "extension-point".to_string(),
            extensions_tag: "extensions".to_string(),
            extension_tag: "extension".to_string(),
            point_name_attr: "name".to_string(),
            point_ref_attr: "point".to_string(),
            extendable_attr: "extendable".to_string(),
            extends_attr: "extends".to_string(),
            container_tag: "template".to_string(),
        }
    }
}

/// Immutable per-invocation resolution settings.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub vocabulary: Vocabulary,
    pub aliases: AliasTable,
}

impl ResolveOptions {
    #[must_use]
    pub fn new(vocabulary: Vocabulary, aliases: AliasTable) -> Self {
        Self {
            vocabulary,
            aliases,
        }
    }
}

/// On-disk configuration as written in `sfc-inherit.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub alias_mode: AliasMode,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub aliases: IndexMap<String, String>,
    pub vocabulary: Vocabulary,
    /// Directory relative alias targets are anchored to; set on load.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl ConfigFile {
    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// [`InheritError::Io`] if the file cannot be read and
    /// [`InheritError::Config`] if it is not valid TOML for this schema.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = FileOps::read_with_context(path, "loading sfc-inherit configuration").await?;
        let mut config: Self = toml::from_str(&content).map_err(|e| InheritError::Config {
            message: format!("{}: {e}", path.display()),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load an explicit file if given, else the nearest `sfc-inherit.toml`
    /// at or above `start_dir`, else the user-level config, else defaults.
    ///
    /// # Errors
    ///
    /// Fails only when a config file is found but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<&Path>, start_dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path).await;
        }
        if let Some(found) = find_config_file(start_dir) {
            return Self::load_from(&found).await;
        }
        if let Some(global) = Self::global_path().filter(|p| p.is_file()) {
            return Self::load_from(&global).await;
        }
        tracing::debug!("No configuration file found; using defaults");
        Ok(Self::default())
    }

    /// User-level configuration path (`~/.config/sfc-inherit/config.toml` on Linux).
    #[must_use]
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sfc-inherit").join("config.toml"))
    }

    /// Build resolution options, appending `extra_aliases` after the file's own
    /// aliases and letting `mode_override` replace the file's alias mode.
    ///
    /// # Errors
    ///
    /// [`InheritError::InvalidAlias`] when a pattern-mode key is not a valid regex.
    pub fn into_options(
        self,
        extra_aliases: Vec<(String, PathBuf)>,
        mode_override: Option<AliasMode>,
    ) -> Result<ResolveOptions> {
        let base_dir = self.base_dir.unwrap_or_default();
        let mut entries: Vec<(String, PathBuf)> = self
            .aliases
            .into_iter()
            .map(|(key, target)| {
                let target = anchor_alias_target(&base_dir, Path::new(&target));
                (key, target)
            })
            .collect();
        entries.extend(extra_aliases);

        let aliases = AliasTable::new(mode_override.unwrap_or(self.alias_mode), entries)?;
        Ok(ResolveOptions::new(self.vocabulary, aliases))
    }
}

/// Anchor a relative alias target to `base_dir`. Absolute targets are kept
/// verbatim, and a trailing separator survives normalization.
#[must_use]
pub fn anchor_alias_target(base_dir: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        return target.to_path_buf();
    }
    let mut anchored = normalize_path(&base_dir.join(target)).into_os_string();
    let raw = target.as_os_str().to_string_lossy();
    if raw.ends_with('/') || raw.ends_with(std::path::MAIN_SEPARATOR) {
        anchored.push(std::path::MAIN_SEPARATOR_STR);
    }
    PathBuf::from(anchored)
}

/// Nearest `sfc-inherit.toml` at or above `start`.
#[must_use]
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|candidate| candidate.is_file())
}
