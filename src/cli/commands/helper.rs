use super::{CommandResult, CommandSummary, FileCounts};
use crate::{
    core::{ReferenceKey, UsageScanner},
    issues::{Issue, Severity},
};

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    counts: FileCounts,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();

    CommandResult {
        summary,
        error_count,
        exit_on_errors,
        issues,
        counts,
    }
}

/// Number of reference sites whose key is computed at runtime.
pub fn dynamic_reference_count(scanner: &UsageScanner<'_>) -> usize {
    scanner
        .references()
        .iter()
        .filter(|r| r.key == ReferenceKey::Dynamic)
        .count()
}
