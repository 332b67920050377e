//! Base-component reference resolution.
//!
//! Turns the value of an `extends` attribute into an absolute path. References
//! are either relative to the extending file's directory (`./Base.vue`,
//! `../layouts/Page.vue`) or start with an alias (`@/layouts/Page.vue`).

use std::path::{Path, PathBuf};

use crate::config::{AliasMode, AliasTable};
use crate::core::{InheritError, Result};
use crate::utils::normalize_path;

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Resolve `reference` to a normalized path.
///
/// In [`AliasMode::Prefix`] the first path segment is compared against each
/// alias key; a match replaces that segment with the alias target. In
/// [`AliasMode::Pattern`] each key is a regular expression matched against the
/// whole reference and its first match is replaced by the target, with `$1` or
/// `${name}` in the target expanding to capture groups. A reference no alias
/// applies to is joined onto `context_dir`.
///
/// # Errors
///
/// [`InheritError::InvalidReference`] for empty or blank references, references
/// containing NUL, references naming a directory (trailing separator) and
/// references consisting of nothing but an alias key.
pub fn resolve_path(reference: &str, context_dir: &Path, aliases: &AliasTable) -> Result<PathBuf> {
    let invalid = |reason: &str| InheritError::InvalidReference {
        reference: reference.to_string(),
        reason: reason.to_string(),
    };

    if reference.trim().is_empty() {
        return Err(invalid("reference is empty"));
    }
    if reference.contains('\0') {
        return Err(invalid("reference contains a NUL byte"));
    }
    if reference.ends_with(is_separator) {
        return Err(invalid("reference names a directory, not a component file"));
    }

    let aliased = match aliases.mode() {
        AliasMode::Prefix => resolve_prefix(reference, aliases)?,
        AliasMode::Pattern => resolve_pattern(reference, aliases),
    };

    let resolved = match aliased {
        Some(path) if path.is_absolute() => path,
        Some(path) => context_dir.join(path),
        None => context_dir.join(reference),
    };
    Ok(normalize_path(&resolved))
}

fn resolve_prefix(reference: &str, aliases: &AliasTable) -> Result<Option<PathBuf>> {
    let mut segments = reference.split(is_separator);
    let Some(first) = segments.next() else {
        return Ok(None);
    };
    let Some((key, target)) = aliases.entries().find(|(key, _)| *key == first) else {
        return Ok(None);
    };

    let rest: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();
    if rest.is_empty() {
        return Err(InheritError::InvalidReference {
            reference: reference.to_string(),
            reason: format!("reference is only the alias '{key}'"),
        });
    }

    tracing::trace!("alias '{key}' matched reference '{reference}'");
    Ok(Some(rest.iter().fold(target.to_path_buf(), |path, segment| path.join(segment))))
}

fn resolve_pattern(reference: &str, aliases: &AliasTable) -> Option<PathBuf> {
    aliases.raw_entries().iter().find_map(|entry| {
        let pattern = entry.pattern.as_ref()?;
        if !pattern.is_match(reference) {
            return None;
        }
        tracing::trace!("alias pattern '{}' matched reference '{reference}'", entry.key);
        let target = entry.target.to_string_lossy();
        let replaced = pattern.replacen(reference, 1, target.as_ref());
        Some(PathBuf::from(replaced.into_owned()))
    })
}
