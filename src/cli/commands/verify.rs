use anyhow::Result;

use super::super::args::VerifyCommand;
use super::helper::finish;
use super::{CommandResult, CommandSummary, FileCounts};
use crate::{
    core::ToolContext,
    issues::Issue,
    rules::{
        drift::check_table_drift, dynamic::check_dynamic_keys, missing::check_missing_keys,
        unrecognized::check_unrecognized_lines,
    },
};

/// Report undeclared keys, dynamic references, unrecognized module lines
/// and drift between declarations and the canonical table.
pub fn verify(cmd: VerifyCommand) -> Result<CommandResult> {
    let ctx = ToolContext::new(&cmd.common)?;
    let scanner = ctx.usage_scanner()?;
    let references = scanner.references();

    let mut issues: Vec<Issue> = Vec::new();
    issues.extend(
        check_missing_keys(&references, &ctx.registry)
            .into_iter()
            .map(Issue::MissingKey),
    );
    issues.extend(
        check_dynamic_keys(&references)
            .into_iter()
            .map(Issue::DynamicKey),
    );
    issues.extend(
        check_unrecognized_lines(&ctx.modules)
            .into_iter()
            .map(Issue::UnrecognizedLine),
    );
    issues.extend(
        check_table_drift(&ctx.registry, &ctx.tables.canonical)
            .into_iter()
            .map(Issue::TableDrift),
    );

    Ok(finish(
        CommandSummary::Verify,
        issues,
        FileCounts::of(&ctx),
        true,
    ))
}
