use anyhow::Result;

use super::super::{
    actions::{Action, MergeDuplicates},
    args::ToolCommand,
};
use super::helper::{dynamic_reference_count, finish};
use super::{CommandResult, CommandSummary, DedupeSummary, FileCounts};
use crate::{
    core::ToolContext,
    rules::{duplicates::analyze_duplicates, merge::build_merge_plans},
};

/// Find declarations sharing a value and merge the same-namespace ones.
///
/// Cross-namespace groups are only suggested, rejected groups only listed.
pub fn dedupe(cmd: ToolCommand) -> Result<CommandResult> {
    let ctx = ToolContext::new(&cmd.common)?;
    let mode = cmd.mode.mode();

    let analysis = analyze_duplicates(
        &ctx.registry,
        &ctx.tables,
        ctx.config.canonical_key_policy,
    );

    let scanner = ctx.usage_scanner()?;
    let tables: Vec<_> = ctx.tables.all().map(|t| t.file()).collect();
    let plans = build_merge_plans(&analysis.same_namespace, &scanner, &tables)?;

    let stats = if mode.is_apply() && !plans.is_empty() {
        Some(MergeDuplicates::run(&plans)?)
    } else {
        None
    };

    Ok(finish(
        CommandSummary::Dedupe(DedupeSummary {
            mode,
            analysis,
            plans,
            stats,
            dynamic_reference_count: dynamic_reference_count(&scanner),
        }),
        Vec::new(),
        FileCounts::of(&ctx),
        false,
    ))
}
