use std::collections::HashSet;

use anyhow::Result;

use super::super::{
    actions::{Action, DeleteDeclaration},
    args::{RunMode, ToolCommand},
};
use super::helper::{dynamic_reference_count, finish};
use super::{CommandResult, CommandSummary, FileCounts, PruneSummary};
use crate::{core::ToolContext, issues::Issue, rules::unused::check_unused_keys};

/// Remove declarations no source file references.
pub fn prune(cmd: ToolCommand) -> Result<CommandResult> {
    let ctx = ToolContext::new(&cmd.common)?;
    let mode = cmd.mode.mode();

    let scanner = ctx.usage_scanner()?;
    let unused_issues = check_unused_keys(&ctx.registry, &ctx.modules, &scanner)?;

    let file_count = unused_issues
        .iter()
        .map(|issue| issue.declaration.file_path.as_str())
        .collect::<HashSet<_>>()
        .len();

    let stats = if mode.is_apply() && !unused_issues.is_empty() {
        Some(DeleteDeclaration::run(&unused_issues)?)
    } else {
        None
    };

    // Report mode lists the keys cargo-style; the other modes print the plan.
    let issues: Vec<Issue> = match mode {
        RunMode::Report => unused_issues.iter().cloned().map(Issue::UnusedKey).collect(),
        RunMode::DryRun | RunMode::Apply => Vec::new(),
    };

    Ok(finish(
        CommandSummary::Prune(PruneSummary {
            mode,
            unused_issues,
            file_count,
            stats,
            dynamic_reference_count: dynamic_reference_count(&scanner),
        }),
        issues,
        FileCounts::of(&ctx),
        false,
    ))
}
