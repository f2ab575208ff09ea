//! Report formatting and printing utilities.
//!
//! Issues are displayed cargo-style; tool commands print a plan summary in
//! the "Would delete … / Run with --apply" manner. Kept apart from the
//! analysis so keyward can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::{
    actions::{Action, DeleteDeclaration, MergeDuplicates, SyncTables},
    args::RunMode,
    commands::{
        CommandResult, CommandSummary, DedupeSummary, FileCounts, InitSummary, PruneSummary,
        SyncSummary, UntranslatedSummary,
    },
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(counts: &FileCounts) {
    print_success_to(counts, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(counts: &FileCounts, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {}, {}, {} - no issues found",
            plural(counts.source_files, "source file"),
            plural(counts.module_files, "module file"),
            plural(counts.table_files, "table file"),
        )
        .green()
    );
}

/// Warn that some module lines were not understood (tools only; `verify`
/// reports each line).
pub fn print_unrecognized_warning_to<W: Write>(count: usize, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} module line(s) not recognized; their keys were not analyzed (run {} for details)",
            "warning:".bold().yellow(),
            count,
            "keyward verify".cyan()
        );
    }
}

/// Remind that keys built at runtime are not tracked.
pub fn print_dynamic_note_to<W: Write>(count: usize, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} dynamic reference(s) found; keys used only through them are not tracked",
            "note:".bold(),
            count
        );
    }
}

pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Verify => {
            report(&result.issues);
            if result.issues.is_empty() {
                print_success(&result.counts);
            }
            return;
        }
        CommandSummary::Dedupe(summary) => print_dedupe(summary),
        CommandSummary::Sync(summary) => print_sync(summary),
        CommandSummary::Prune(summary) => print_prune(summary, &result.issues),
        CommandSummary::Untranslated(summary) => print_untranslated(summary, &result.issues),
        CommandSummary::Init(summary) => {
            print_init(summary);
            return;
        }
    }

    print_unrecognized_warning_to(result.counts.unrecognized_lines, &mut io::stderr().lock());
}

// ============================================================
// Internal Functions
// ============================================================

fn plural(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let report_location = issue.location();
    let loc = report_location.location();
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        loc.file_path,
        loc.line,
        loc.col
    );

    if let ReportLocation::Source(ctx) = &report_location {
        let source_line = &ctx.source_line;
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            loc.line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // col is 1-based
        let prefix: String = source_line.chars().take(loc.col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .map(|i| i.location().location().line)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn print_dedupe(summary: &DedupeSummary) {
    let mut out = io::stdout().lock();
    print_dedupe_groups_to(summary, &mut out);

    if summary.plans.is_empty() {
        if summary.analysis.group_count() == 0 {
            let _ = writeln!(
                out,
                "{} {}",
                SUCCESS_MARK.green(),
                "No duplicate values found".green()
            );
        }
        return;
    }

    if summary.mode == RunMode::DryRun {
        drop(out);
        MergeDuplicates::preview(&summary.plans);
        out = io::stdout().lock();
    }
    print_dedupe_totals_to(summary, &mut out);
    print_dynamic_note_to(summary.dynamic_reference_count, &mut out);
}

/// Rejected groups and cross-namespace suggestions, in every mode.
fn print_dedupe_groups_to<W: Write>(summary: &DedupeSummary, writer: &mut W) {
    for rejected in &summary.analysis.rejected {
        let _ = writeln!(
            writer,
            "{} \"{}\" ({}) not mergeable: {}",
            "warning:".bold().yellow(),
            rejected.group.value,
            rejected.group.keys().collect::<Vec<_>>().join(", "),
            rejected.reason
        );
    }
    for cross in &summary.analysis.cross_namespace {
        let _ = writeln!(
            writer,
            "{} \"{}\" is declared in namespaces {} ({}); consider a shared key {}",
            "note:".bold(),
            cross.value,
            cross.namespaces.join(", "),
            cross
                .members
                .iter()
                .map(|d| d.key.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            cross.suggested_key.cyan()
        );
    }
    if summary.mode == RunMode::Report {
        for plan in &summary.plans {
            for (from, to) in plan.renames() {
                let _ = writeln!(writer, "  {}: {} -> {}", plan.group.namespace, from, to);
            }
        }
    }
}

fn print_dedupe_totals_to<W: Write>(summary: &DedupeSummary, writer: &mut W) {
    let groups = summary.plans.len();
    let declarations: usize = summary.plans.iter().map(|p| p.group.removed.len()).sum();
    let references: usize = summary.plans.iter().map(|p| p.usage_count()).sum();

    match &summary.stats {
        Some(stats) => {
            let _ = writeln!(
                writer,
                "{} {} group(s): removed {} declaration(s), rewrote {} reference(s) in {} file(s).",
                "Merged".green().bold(),
                stats.processed,
                declarations,
                references,
                stats.files_modified
            );
        }
        None => {
            let files = MergeDuplicates::to_operations(&summary.plans).len();
            let _ = writeln!(
                writer,
                "{} {} group(s): remove {} declaration(s), rewrite {} reference(s) in {} file(s).",
                "Would merge".yellow().bold(),
                groups,
                declarations,
                references,
                files
            );
            print_next_step_to(summary.mode, "merge these keys", writer);
        }
    }
}

fn print_next_step_to<W: Write>(mode: RunMode, action: &str, writer: &mut W) {
    match mode {
        RunMode::Report => {
            let _ = writeln!(
                writer,
                "Run with {} to see the full plan, or {} to {}.",
                "--dry-run".cyan(),
                "--apply".cyan(),
                action
            );
        }
        RunMode::DryRun => {
            let _ = writeln!(writer, "Run with {} to {}.", "--apply".cyan(), action);
        }
        RunMode::Apply => {}
    }
}

fn print_sync(summary: &SyncSummary) {
    if summary.mode == RunMode::DryRun {
        SyncTables::preview(&summary.outcomes);
    }
    print_sync_to(summary, &mut io::stdout().lock());
}

fn print_sync_to<W: Write>(summary: &SyncSummary, writer: &mut W) {
    let changed: Vec<_> = summary.outcomes.iter().filter(|o| o.has_changes()).collect();
    if changed.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "{} in sync with the canonical table",
                plural(summary.outcomes.len(), "locale table")
            )
            .green()
        );
        return;
    }

    for outcome in &changed {
        let _ = writeln!(
            writer,
            "  - {}: {} filled, {} dropped{}",
            outcome.locale(),
            outcome.filled.len(),
            outcome.dropped.len(),
            if outcome.reordered { ", reordered" } else { "" }
        );
    }

    let filled: usize = changed.iter().map(|o| o.filled.len()).sum();
    let dropped: usize = changed.iter().map(|o| o.dropped.len()).sum();
    match &summary.stats {
        Some(stats) => {
            let _ = writeln!(
                writer,
                "{} {} table(s): {} key(s) filled, {} key(s) dropped.",
                "Updated".green().bold(),
                stats.files_modified,
                filled,
                dropped
            );
        }
        None => {
            let _ = writeln!(
                writer,
                "{} {} table(s): {} key(s) filled, {} key(s) dropped.",
                "Would update".yellow().bold(),
                changed.len(),
                filled,
                dropped
            );
            print_next_step_to(summary.mode, "write these tables", writer);
        }
    }
}

fn print_prune(summary: &PruneSummary, issues: &[Issue]) {
    match summary.mode {
        RunMode::Report => report(issues),
        RunMode::DryRun => DeleteDeclaration::preview(&summary.unused_issues),
        RunMode::Apply => {}
    }
    print_prune_to(summary, &mut io::stdout().lock());
}

fn print_prune_to<W: Write>(summary: &PruneSummary, writer: &mut W) {
    let total = summary.unused_issues.len();
    if total == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No unused keys found".green()
        );
        return;
    }

    match &summary.stats {
        Some(stats) => {
            let _ = writeln!(
                writer,
                "{} {} declaration(s) in {} file(s).",
                "Deleted".green().bold(),
                stats.changes_applied,
                stats.files_modified
            );
        }
        None => {
            let _ = writeln!(
                writer,
                "{} {} declaration(s) in {} file(s).",
                "Would delete".yellow().bold(),
                total,
                summary.file_count
            );
            print_next_step_to(summary.mode, "delete these declarations", writer);
        }
    }
    print_dynamic_note_to(summary.dynamic_reference_count, writer);
}

fn print_untranslated(summary: &UntranslatedSummary, issues: &[Issue]) {
    if summary.compared_locales == 0 {
        print_no_locales_warning_to(&mut io::stderr().lock());
        return;
    }
    if summary.mode == RunMode::Report {
        report(issues);
    }
    print_untranslated_to(summary, &mut io::stdout().lock());
}

fn print_untranslated_to<W: Write>(summary: &UntranslatedSummary, writer: &mut W) {
    let total = summary.entries.len();

    match summary.mode {
        RunMode::Apply => {
            if summary.written {
                let _ = writeln!(
                    writer,
                    "{} {} untranslated key(s) to {}.",
                    "Wrote".green().bold(),
                    total,
                    summary.artifact_path
                );
            } else {
                let _ = writeln!(
                    writer,
                    "{} {} is up to date ({} key(s)).",
                    SUCCESS_MARK.green(),
                    summary.artifact_path,
                    total
                );
            }
        }
        RunMode::Report | RunMode::DryRun => {
            if total == 0 {
                let _ = writeln!(
                    writer,
                    "{} {}",
                    SUCCESS_MARK.green(),
                    "No untranslated keys found".green()
                );
                return;
            }
            if summary.mode == RunMode::DryRun {
                let _ = writeln!(writer, "{}", summary.artifact_path.bold());
                for (key, value) in &summary.entries {
                    let _ = writeln!(writer, "  {} {}: \"{}\"", "+".green(), key, value);
                }
            }
            let _ = writeln!(
                writer,
                "{} {} key(s) to {}.",
                "Would write".yellow().bold(),
                total,
                summary.artifact_path
            );
            print_next_step_to(summary.mode, "write the report", writer);
        }
    }
}

fn print_no_locales_warning_to<W: Write>(writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} only the canonical table was found; nothing to compare against",
        "warning:".bold().yellow()
    );
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
