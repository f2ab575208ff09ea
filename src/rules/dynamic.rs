//! Dynamic key detection rule.
//!
//! Reports reference sites whose argument is not a plain string literal.
//! These keys are invisible to usage lookups and rewrites.

use crate::{
    core::{Reference, ReferenceKey},
    issues::DynamicKeyIssue,
};

pub fn check_dynamic_keys(references: &[Reference]) -> Vec<DynamicKeyIssue> {
    references
        .iter()
        .filter(|reference| reference.key == ReferenceKey::Dynamic)
        .map(|reference| DynamicKeyIssue {
            context: reference.site.context.clone(),
            shape: reference.site.shape.clone(),
        })
        .collect()
}
