//! Path alias table.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::{InheritError, Result};

/// How alias keys are matched against an `extends` reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AliasMode {
    /// Key must equal the reference's first path segment (`@/a/B.vue` with key `@`).
    #[default]
    Prefix,
    /// Key is a regular expression matched against the whole reference; the
    /// first match is replaced by the target.
    Pattern,
}

#[derive(Debug, Clone)]
pub(crate) struct AliasEntry {
    pub key: String,
    pub target: PathBuf,
    /// Compiled key, present in [`AliasMode::Pattern`] only.
    pub pattern: Option<Regex>,
}

/// Ordered alias key → target directory mapping.
///
/// Entries are consulted in insertion order; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    mode: AliasMode,
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    /// Build a table, compiling keys as regular expressions in pattern mode.
    ///
    /// # Errors
    ///
    /// [`InheritError::InvalidAlias`] if a pattern-mode key does not compile.
    pub fn new<I, K, T>(mode: AliasMode, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<PathBuf>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, target)| {
                let key = key.into();
                let pattern = match mode {
                    AliasMode::Prefix => None,
                    AliasMode::Pattern => {
                        Some(Regex::new(&key).map_err(|e| InheritError::InvalidAlias {
                            pattern: key.clone(),
                            reason: e.to_string(),
                        })?)
                    }
                };
                Ok::<_, InheritError>(AliasEntry {
                    key,
                    target: target.into(),
                    pattern,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            mode,
            entries,
        })
    }

    #[must_use]
    pub fn mode(&self) -> AliasMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(key, target)` pairs in lookup order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|e| (e.key.as_str(), e.target.as_path()))
    }

    pub(crate) fn raw_entries(&self) -> &[AliasEntry] {
        &self.entries
    }
}
