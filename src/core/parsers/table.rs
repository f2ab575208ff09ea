//! Table Reader: flat key → string JSON tables.
//!
//! Unlike source files, a table that cannot be read or is not a flat object
//! of strings aborts the run: every tool depends on the full key universe.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;

use crate::{
    core::data::{LocaleTable, TableSet},
    utils::LineIndex,
};

pub fn read_table(path: &Path, locale: &str) -> Result<LocaleTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read table file: {}", path.display()))?;
    parse_table(&content, locale, &path.to_string_lossy())
}

pub fn parse_table(content: &str, locale: &str, file_path: &str) -> Result<LocaleTable> {
    let entries: IndexMap<String, String> = serde_json::from_str(content).with_context(|| {
        format!(
            "Failed to parse table file: {} (expected a flat object of string values)",
            file_path
        )
    })?;

    let line_index = LineIndex::new(content);
    let lines = entries
        .keys()
        .map(|key| (key.clone(), find_key_line(content, key, &line_index)))
        .collect::<HashMap<_, _>>();

    Ok(LocaleTable::with_entries(locale, file_path, entries, lines, content))
}

/// Find the line where `key` appears as an object key.
///
/// Skips occurrences of the quoted key inside values by requiring the match
/// to be followed by a colon.
fn find_key_line(content: &str, key: &str, line_index: &LineIndex) -> usize {
    let pattern = match serde_json::to_string(key) {
        Ok(quoted) => quoted,
        Err(_) => return 1,
    };

    let mut pos = 0;
    while let Some(rel_pos) = content[pos..].find(&pattern) {
        let abs_pos = pos + rel_pos;
        let after_pattern = abs_pos + pattern.len();
        if content[after_pattern..].trim_start().starts_with(':') {
            return line_index.line(abs_pos);
        }
        pos = abs_pos + 1;
    }
    1
}

/// Extracts locale from filename.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "/path/to/locales/pt-BR.json" -> Some("pt-BR")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Load the canonical table and every locale table from `locales_dir`.
///
/// `artifact_name` (the untranslated report) is never treated as a table.
pub fn load_tables(
    locales_dir: &Path,
    canonical_locale: &str,
    artifact_name: &str,
) -> Result<TableSet> {
    if !locales_dir.exists() {
        bail!(
            "Locales directory '{}' does not exist.\n\
             Hint: Check the 'localesRoot' setting in .keywardrc.json.",
            locales_dir.display()
        );
    }

    if !locales_dir.is_dir() {
        bail!("'{}' is not a directory.", locales_dir.display());
    }

    let mut canonical = None;
    let mut locales = Vec::new();

    let mut paths = Vec::new();
    for entry in fs::read_dir(locales_dir)
        .with_context(|| format!("Failed to read directory: {}", locales_dir.display()))?
    {
        paths.push(entry?.path());
    }
    paths.sort();

    for path in paths {
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let is_artifact = path.file_name().and_then(|n| n.to_str()) == Some(artifact_name);
        if !is_json || is_artifact || !path.is_file() {
            continue;
        }
        let Some(locale) = extract_locale(&path) else {
            continue;
        };

        let table = read_table(&path, &locale)?;
        if locale == canonical_locale {
            canonical = Some(table);
        } else {
            locales.push(table);
        }
    }

    let canonical = canonical.ok_or_else(|| {
        anyhow::anyhow!(
            "Canonical table '{}.json' not found in '{}'",
            canonical_locale,
            locales_dir.display()
        )
    })?;

    Ok(TableSet::new(canonical, locales))
}
