//! Table synchronization against the canonical key set and order.

use crate::core::{LocaleTable, TableSet};

/// Result of reconciling one locale table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// The synchronized table: exactly the canonical keys, in canonical order.
    pub table: LocaleTable,
    /// Keys added with the canonical value, in canonical order.
    pub filled: Vec<String>,
    /// Keys removed because the canonical table lacks them, in file order.
    pub dropped: Vec<String>,
    /// True when the surviving keys were out of canonical order.
    pub reordered: bool,
}

impl SyncOutcome {
    pub fn locale(&self) -> &str {
        &self.table.locale
    }

    pub fn file_path(&self) -> &str {
        &self.table.file_path
    }

    pub fn has_changes(&self) -> bool {
        !self.filled.is_empty() || !self.dropped.is_empty() || self.reordered
    }
}

/// Rebuild `table` over the canonical key set, keeping existing translations.
pub fn synchronize_table(canonical: &LocaleTable, table: &LocaleTable) -> SyncOutcome {
    let mut synced = LocaleTable::new(&table.locale, &table.file_path);
    synced.snapshot = table.snapshot.clone();
    let mut filled = Vec::new();

    for (key, canonical_value) in &canonical.entries {
        match table.get(key) {
            Some(value) => synced.insert(key, value),
            None => {
                synced.insert(key, canonical_value);
                filled.push(key.clone());
            }
        }
    }

    let dropped: Vec<String> = table
        .keys()
        .filter(|key| !canonical.contains_key(key))
        .map(String::from)
        .collect();

    let kept_in_file_order = table.keys().filter(|key| canonical.contains_key(key));
    let kept_in_canonical_order = canonical.keys().filter(|key| table.contains_key(key));
    let reordered = !kept_in_file_order.eq(kept_in_canonical_order);

    SyncOutcome {
        table: synced,
        filled,
        dropped,
        reordered,
    }
}

/// Synchronize every locale table, in locale order.
pub fn synchronize_all(tables: &TableSet) -> Vec<SyncOutcome> {
    tables
        .locales
        .iter()
        .map(|table| synchronize_table(&tables.canonical, table))
        .collect()
}
