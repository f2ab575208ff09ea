use anyhow::Result;

use super::super::{
    actions::{Operation, execute_operations},
    args::{RunMode, ToolCommand},
};
use super::helper::finish;
use super::{CommandResult, CommandSummary, FileCounts, UntranslatedSummary};
use crate::{
    core::{LocaleTable, ToolContext},
    issues::Issue,
    rules::untranslated::{check_untranslated, untranslated_entries},
};

/// Report keys whose value is identical in every table.
///
/// In apply mode the findings are written to the untranslated artifact,
/// which the table loader never reads back as a locale.
pub fn untranslated(cmd: ToolCommand) -> Result<CommandResult> {
    let ctx = ToolContext::new(&cmd.common)?;
    let mode = cmd.mode.mode();

    let compared_locales = ctx.tables.locales.len();
    let found = check_untranslated(&ctx.tables);
    let entries = untranslated_entries(&found);
    let artifact_path = ctx
        .locales_dir
        .join(&ctx.config.untranslated_report)
        .to_string_lossy()
        .to_string();

    let written = if mode.is_apply() && compared_locales > 0 {
        let mut artifact = LocaleTable::new("untranslated", &artifact_path);
        artifact.entries = entries.clone();
        let stats = execute_operations(&[Operation::WriteTable { table: artifact }])?;
        stats.files_modified > 0
    } else {
        false
    };

    let issues: Vec<Issue> = match mode {
        RunMode::Report => found.into_iter().map(Issue::Untranslated).collect(),
        RunMode::DryRun | RunMode::Apply => Vec::new(),
    };

    Ok(finish(
        CommandSummary::Untranslated(UntranslatedSummary {
            mode,
            entries,
            artifact_path,
            written,
            compared_locales,
        }),
        issues,
        FileCounts::of(&ctx),
        false,
    ))
}
