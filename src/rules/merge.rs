//! Merge plans for same-namespace duplicate groups.

use anyhow::Result;

use crate::{
    core::{ReferenceGrammar, TableFile, UsageScanner, UsageSite},
    rules::duplicates::SameNamespaceGroup,
};

/// Everything needed to apply one same-namespace merge.
#[derive(Debug, Clone)]
pub struct MergePlan {
    pub group: SameNamespaceGroup,
    /// Usage sites per removed key, in the order of `group.removed`.
    pub usages: Vec<(String, Vec<UsageSite>)>,
    /// Table files the removed keys are dropped from (canonical first).
    pub tables: Vec<TableFile>,
    pub grammar: ReferenceGrammar,
}

impl MergePlan {
    pub fn canonical_key(&self) -> &str {
        &self.group.canonical.key
    }

    pub fn usage_count(&self) -> usize {
        self.usages.iter().map(|(_, sites)| sites.len()).sum()
    }

    /// (removed key, canonical key) pairs.
    pub fn renames(&self) -> impl Iterator<Item = (&str, &str)> {
        self.group
            .removed
            .iter()
            .map(|d| (d.key.as_str(), self.canonical_key()))
    }
}

pub fn build_merge_plans(
    groups: &[SameNamespaceGroup],
    scanner: &UsageScanner<'_>,
    tables: &[TableFile],
) -> Result<Vec<MergePlan>> {
    groups
        .iter()
        .map(|group| {
            let usages = group
                .removed
                .iter()
                .map(|decl| Ok((decl.key.clone(), scanner.find(&decl.key)?)))
                .collect::<Result<Vec<_>>>()?;
            Ok(MergePlan {
                group: group.clone(),
                usages,
                tables: tables.to_vec(),
                grammar: scanner.grammar().clone(),
            })
        })
        .collect()
}
