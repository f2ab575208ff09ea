use indexmap::IndexMap;

use super::super::{actions::ActionStats, args::RunMode};
use crate::{
    core::ToolContext,
    issues::{Issue, UnusedKeyIssue},
    rules::{duplicates::DuplicateAnalysis, merge::MergePlan, sync::SyncOutcome},
};

#[derive(Debug)]
pub enum CommandSummary {
    Verify,
    Dedupe(DedupeSummary),
    Sync(SyncSummary),
    Prune(PruneSummary),
    Untranslated(UntranslatedSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct DedupeSummary {
    pub mode: RunMode,
    pub analysis: DuplicateAnalysis,
    /// One plan per same-namespace group.
    pub plans: Vec<MergePlan>,
    /// Set in apply mode.
    pub stats: Option<ActionStats>,
    pub dynamic_reference_count: usize,
}

#[derive(Debug)]
pub struct SyncSummary {
    pub mode: RunMode,
    pub outcomes: Vec<SyncOutcome>,
    pub stats: Option<ActionStats>,
}

#[derive(Debug)]
pub struct PruneSummary {
    pub mode: RunMode,
    pub unused_issues: Vec<UnusedKeyIssue>,
    /// Module files holding at least one unused declaration.
    pub file_count: usize,
    pub stats: Option<ActionStats>,
    pub dynamic_reference_count: usize,
}

#[derive(Debug)]
pub struct UntranslatedSummary {
    pub mode: RunMode,
    /// Artifact content: key → canonical value, in canonical order.
    pub entries: IndexMap<String, String>,
    pub artifact_path: String,
    pub written: bool,
    /// Locale tables compared against the canonical one.
    pub compared_locales: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// How much input a command looked at.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCounts {
    pub source_files: usize,
    pub module_files: usize,
    pub table_files: usize,
    pub unrecognized_lines: usize,
}

impl FileCounts {
    pub fn of(ctx: &ToolContext) -> Self {
        Self {
            source_files: ctx.source_paths.len(),
            module_files: ctx.modules.len(),
            table_files: ctx.tables.file_count(),
            unrecognized_lines: ctx.unrecognized_line_count(),
        }
    }
}

/// Result of running keyward commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// Only `verify` fails on errors; the tools always exit 0 on success.
    pub exit_on_errors: bool,
    /// Issues printed cargo-style (sorted).
    pub issues: Vec<Issue>,
    pub counts: FileCounts,
}
