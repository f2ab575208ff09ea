use anyhow::Result;

use super::super::{
    actions::{Action, SyncTables},
    args::ToolCommand,
};
use super::helper::finish;
use super::{CommandResult, CommandSummary, FileCounts, SyncSummary};
use crate::{core::ToolContext, rules::sync::synchronize_all};

/// Reconcile every locale table with the canonical key set and order.
pub fn sync(cmd: ToolCommand) -> Result<CommandResult> {
    let ctx = ToolContext::new(&cmd.common)?;
    let mode = cmd.mode.mode();

    let outcomes = synchronize_all(&ctx.tables);

    let stats = if mode.is_apply() {
        Some(SyncTables::run(&outcomes)?)
    } else {
        None
    };

    Ok(finish(
        CommandSummary::Sync(SyncSummary {
            mode,
            outcomes,
            stats,
        }),
        Vec::new(),
        FileCounts::of(&ctx),
        false,
    ))
}
