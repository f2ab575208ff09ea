//! Missing key detection rule.
//!
//! Detects literal keys referenced in source code that no module declares.

use crate::{
    core::{KeyRegistry, Reference, ReferenceKey},
    issues::MissingKeyIssue,
};

pub fn check_missing_keys(references: &[Reference], registry: &KeyRegistry) -> Vec<MissingKeyIssue> {
    references
        .iter()
        .filter_map(|reference| match &reference.key {
            ReferenceKey::Literal(key) if !registry.contains(key) => Some(MissingKeyIssue {
                context: reference.site.context.clone(),
                key: key.clone(),
                shape: reference.site.shape.clone(),
            }),
            _ => None,
        })
        .collect()
}
