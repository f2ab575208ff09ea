//! Unused key detection rule.
//!
//! A declared key with no literal usage site in the source tree is unused.
//! Keys referenced only through dynamic arguments (`t(name)`) look unused to
//! this rule; callers surface that caveat.

use anyhow::Result;
use rayon::prelude::*;

use crate::{
    core::{Declaration, KeyRegistry, ModuleFile, SourceContext, UsageScanner},
    issues::UnusedKeyIssue,
};

pub fn check_unused_keys(
    registry: &KeyRegistry,
    modules: &[ModuleFile],
    scanner: &UsageScanner<'_>,
) -> Result<Vec<UnusedKeyIssue>> {
    let declarations: Vec<&Declaration> = registry.iter().collect();

    let unused = declarations
        .par_iter()
        .map(|decl| Ok((!scanner.is_referenced(&decl.key)?).then_some(*decl)))
        .collect::<Result<Vec<_>>>()?;

    let mut issues: Vec<UnusedKeyIssue> = unused
        .into_iter()
        .flatten()
        .map(|decl| {
            let source_line = modules
                .iter()
                .find(|m| m.file_path == decl.file_path)
                .map(|m| m.line_text(decl.lines.start()).to_string())
                .unwrap_or_default();
            UnusedKeyIssue {
                context: SourceContext::new(decl.location(), source_line),
                declaration: decl.clone(),
            }
        })
        .collect();

    // Sort by file path, then line for deterministic output
    issues.sort_by(|a, b| {
        a.context
            .location
            .cmp(&b.context.location)
            .then_with(|| a.declaration.key.cmp(&b.declaration.key))
    });

    Ok(issues)
}
