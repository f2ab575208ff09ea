//! Table drift detection rule.
//!
//! Compares the declared key set with the canonical table in both
//! directions.

use crate::{
    core::{KeyRegistry, LocaleTable, SourceLocation},
    issues::{DriftKind, TableDriftIssue},
};

pub fn check_table_drift(registry: &KeyRegistry, canonical: &LocaleTable) -> Vec<TableDriftIssue> {
    let not_in_table = registry
        .iter()
        .filter(|decl| !canonical.contains_key(&decl.key))
        .map(|decl| TableDriftIssue {
            location: decl.location(),
            key: decl.key.clone(),
            kind: DriftKind::NotInTable,
            table_path: canonical.file_path.clone(),
        });

    let not_declared = canonical
        .keys()
        .filter(|key| !registry.contains(key))
        .map(|key| TableDriftIssue {
            location: SourceLocation::new(&canonical.file_path, canonical.line_of(key), 1),
            key: key.to_string(),
            kind: DriftKind::NotDeclared,
            table_path: canonical.file_path.clone(),
        });

    not_in_table.chain(not_declared).collect()
}
