//! Untranslated value detection rule.
//!
//! Detects keys whose value is identical in every table, canonical included.
//! This usually means the value was copied but never translated.

use indexmap::IndexMap;

use crate::{
    core::{SourceLocation, TableSet},
    issues::UntranslatedIssue,
};

/// Check for untranslated keys, in canonical order.
///
/// Only keys present in every table with a non-empty value everywhere are
/// considered. With no locale besides the canonical one there is nothing to
/// compare, and nothing is reported.
pub fn check_untranslated(tables: &TableSet) -> Vec<UntranslatedIssue> {
    if tables.locales.is_empty() {
        return Vec::new();
    }

    let canonical = &tables.canonical;
    let mut issues = Vec::new();

    for (key, value) in &canonical.entries {
        if value.is_empty() {
            continue;
        }
        let identical = tables
            .locales
            .iter()
            .all(|table| table.get(key) == Some(value.as_str()));
        if !identical {
            continue;
        }

        issues.push(UntranslatedIssue {
            location: SourceLocation::new(&canonical.file_path, canonical.line_of(key), 1),
            key: key.clone(),
            value: value.clone(),
            canonical_locale: canonical.locale.clone(),
            identical_in: tables.locales.iter().map(|t| t.locale.clone()).collect(),
        });
    }

    issues
}

/// The artifact content: key → canonical value, in canonical order.
pub fn untranslated_entries(issues: &[UntranslatedIssue]) -> IndexMap<String, String> {
    issues
        .iter()
        .map(|issue| (issue.key.clone(), issue.value.clone()))
        .collect()
}
