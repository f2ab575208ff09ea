//! Duplicate-value detection, cross-locale consistency and prefix partitioning.
//!
//! Declarations sharing one canonical value form a [`DuplicateGroup`]. A group
//! is only mergeable if every table (canonical included) defines every member
//! with one identical string; anything else rejects the whole group. Mergeable
//! groups confined to one namespace become [`SameNamespaceGroup`]s and can be
//! applied; groups spanning namespaces are only ever suggested.

use std::fmt;

use indexmap::IndexMap;

use crate::{
    config::CanonicalKeyPolicy,
    core::{Declaration, KeyRegistry, TableSet},
    utils::suggest_key_name,
};

/// Namespace for keys suggested for cross-namespace groups.
pub const SHARED_NAMESPACE: &str = "common";

/// Two or more declarations with the same value, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub value: String,
    pub members: Vec<Declaration>,
}

impl DuplicateGroup {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|d| d.key.as_str())
    }
}

/// Why a duplicate group cannot be merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MissingKey { locale: String, key: String },
    /// Members disagree in `locale`; `values` holds (key, value) per member.
    DivergentValues {
        locale: String,
        values: Vec<(String, String)>,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingKey { locale, key } => {
                write!(f, "'{}' is missing in locale '{}'", key, locale)
            }
            Rejection::DivergentValues { locale, values } => {
                let values: Vec<String> = values
                    .iter()
                    .map(|(key, value)| format!("{} = \"{}\"", key, value))
                    .collect();
                write!(f, "values differ in locale '{}': {}", locale, values.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SameNamespaceGroup {
    pub namespace: String,
    pub value: String,
    /// The surviving declaration.
    pub canonical: Declaration,
    /// Declarations merged into `canonical`, in scan order.
    pub removed: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossNamespaceGroup {
    pub value: String,
    pub members: Vec<Declaration>,
    /// Distinct namespaces, sorted.
    pub namespaces: Vec<String>,
    pub suggested_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedGroup {
    pub group: DuplicateGroup,
    pub reason: Rejection,
}

#[derive(Debug, Clone, Default)]
pub struct DuplicateAnalysis {
    pub same_namespace: Vec<SameNamespaceGroup>,
    pub cross_namespace: Vec<CrossNamespaceGroup>,
    pub rejected: Vec<RejectedGroup>,
}

impl DuplicateAnalysis {
    pub fn group_count(&self) -> usize {
        self.same_namespace.len() + self.cross_namespace.len() + self.rejected.len()
    }
}

/// Group declarations by exact value, keeping groups with two or more members.
///
/// Groups are ordered by the scan position of their first member.
pub fn find_duplicate_groups(registry: &KeyRegistry) -> Vec<DuplicateGroup> {
    let mut by_value: IndexMap<&str, Vec<&Declaration>> = IndexMap::new();
    for decl in registry.iter() {
        by_value.entry(decl.value.as_str()).or_default().push(decl);
    }

    by_value
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(value, members)| DuplicateGroup {
            value: value.to_string(),
            members: members.into_iter().cloned().collect(),
        })
        .collect()
}

/// Every table must define every member key with one identical string.
pub fn check_consistency(group: &DuplicateGroup, tables: &TableSet) -> Result<(), Rejection> {
    for table in tables.all() {
        let mut values: Vec<(String, String)> = Vec::with_capacity(group.members.len());
        for key in group.keys() {
            match table.get(key) {
                Some(value) => values.push((key.to_string(), value.to_string())),
                None => {
                    return Err(Rejection::MissingKey {
                        locale: table.locale.clone(),
                        key: key.to_string(),
                    });
                }
            }
        }

        let first = &values[0].1;
        if values.iter().any(|(_, value)| value != first) {
            return Err(Rejection::DivergentValues {
                locale: table.locale.clone(),
                values,
            });
        }
    }
    Ok(())
}

/// Pick the declaration that survives a merge.
pub fn choose_canonical(members: &[Declaration], policy: CanonicalKeyPolicy) -> &Declaration {
    match policy {
        CanonicalKeyPolicy::Smallest => members
            .iter()
            .min_by(|a, b| a.key.cmp(&b.key))
            .unwrap_or(&members[0]),
        CanonicalKeyPolicy::FirstDeclared => &members[0],
    }
}

/// Split a mergeable group by namespace.
pub fn partition(
    group: DuplicateGroup,
    policy: CanonicalKeyPolicy,
) -> Result<SameNamespaceGroup, CrossNamespaceGroup> {
    let mut namespaces: Vec<String> = group
        .members
        .iter()
        .map(|d| d.namespace().to_string())
        .collect();
    namespaces.sort();
    namespaces.dedup();

    if namespaces.len() > 1 {
        return Err(CrossNamespaceGroup {
            suggested_key: suggest_key_name(SHARED_NAMESPACE, &group.value),
            value: group.value,
            members: group.members,
            namespaces,
        });
    }

    let canonical = choose_canonical(&group.members, policy).clone();
    let removed = group
        .members
        .into_iter()
        .filter(|d| d.key != canonical.key)
        .collect();

    Ok(SameNamespaceGroup {
        namespace: canonical.namespace().to_string(),
        value: group.value,
        canonical,
        removed,
    })
}

pub fn analyze_duplicates(
    registry: &KeyRegistry,
    tables: &TableSet,
    policy: CanonicalKeyPolicy,
) -> DuplicateAnalysis {
    let mut analysis = DuplicateAnalysis::default();

    for group in find_duplicate_groups(registry) {
        if let Err(reason) = check_consistency(&group, tables) {
            analysis.rejected.push(RejectedGroup { group, reason });
            continue;
        }
        match partition(group, policy) {
            Ok(same) => analysis.same_namespace.push(same),
            Err(cross) => analysis.cross_namespace.push(cross),
        }
    }

    analysis
}
