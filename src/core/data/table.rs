use std::collections::HashMap;

use anyhow::{Context, Result};
use indexmap::IndexMap;

/// A flat key → string table for one locale.
///
/// Entry order is the order of the file on disk; for the canonical table
/// it is the authoritative key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTable {
    pub locale: String,
    pub file_path: String,
    pub entries: IndexMap<String, String>,
    /// 1-based line of each key in the file it was read from.
    lines: HashMap<String, usize>,
    /// File content at scan time; `None` for tables built in memory.
    pub snapshot: Option<String>,
}

impl LocaleTable {
    pub fn new(locale: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            file_path: file_path.into(),
            entries: IndexMap::new(),
            lines: HashMap::new(),
            snapshot: None,
        }
    }

    /// A table as read from `file_path`, whose content was `snapshot`.
    pub fn with_entries(
        locale: impl Into<String>,
        file_path: impl Into<String>,
        entries: IndexMap<String, String>,
        lines: HashMap<String, usize>,
        snapshot: impl Into<String>,
    ) -> Self {
        Self {
            locale: locale.into(),
            file_path: file_path.into(),
            entries,
            lines,
            snapshot: Some(snapshot.into()),
        }
    }

    pub fn file(&self) -> TableFile {
        TableFile {
            file_path: self.file_path.clone(),
            snapshot: self.snapshot.clone(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Line of `key` in the file the table was read from (1 when unknown).
    pub fn line_of(&self, key: &str) -> usize {
        self.lines.get(key).copied().unwrap_or(1)
    }

    /// Serialize as pretty-printed JSON with 2-space indentation and a
    /// trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(&self.entries)
            .with_context(|| format!("Failed to serialize table: {}", self.file_path))?;
        content.push('\n');
        Ok(content)
    }
}

/// A table file path with the content it had at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFile {
    pub file_path: String,
    pub snapshot: Option<String>,
}

/// The canonical table plus every translated table, sorted by locale.
#[derive(Debug, Clone)]
pub struct TableSet {
    pub canonical: LocaleTable,
    pub locales: Vec<LocaleTable>,
}

impl TableSet {
    pub fn new(canonical: LocaleTable, mut locales: Vec<LocaleTable>) -> Self {
        locales.sort_by(|a, b| a.locale.cmp(&b.locale));
        Self { canonical, locales }
    }

    /// Canonical table first, then each locale.
    pub fn all(&self) -> impl Iterator<Item = &LocaleTable> {
        std::iter::once(&self.canonical).chain(self.locales.iter())
    }

    pub fn file_count(&self) -> usize {
        self.locales.len() + 1
    }
}
