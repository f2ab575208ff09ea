//! DeleteDeclaration action - removes unused declarations from module files.

use std::collections::BTreeMap;

use super::{operation::Operation, traits::Action};
use crate::{core::Declaration, issues::UnusedKeyIssue};

/// Deletes the full line range of each unused declaration.
pub struct DeleteDeclaration;

impl Action<UnusedKeyIssue> for DeleteDeclaration {
    fn to_operations(issues: &[UnusedKeyIssue]) -> Vec<Operation> {
        let mut by_file: BTreeMap<&str, Vec<Declaration>> = BTreeMap::new();
        for issue in issues {
            by_file
                .entry(issue.declaration.file_path.as_str())
                .or_default()
                .push(issue.declaration.clone());
        }

        by_file
            .into_iter()
            .map(|(file_path, declarations)| Operation::DeleteDeclarations {
                file_path: file_path.to_string(),
                declarations,
            })
            .collect()
    }
}
