//! Action trait definition.
//!
//! Actions convert plans or issues into Operations. Each Action can be
//! implemented for multiple input types.

use std::collections::HashSet;

use anyhow::Result;

use super::operation::Operation;

/// Statistics from running an action.
#[derive(Debug, Clone, Default)]
pub struct ActionStats {
    /// Number of inputs processed.
    pub processed: usize,
    /// Number of changes actually applied to files.
    pub changes_applied: usize,
    /// Number of files modified.
    pub files_modified: usize,
}

/// Action trait - converts inputs into Operations and executes them.
///
/// ```ignore
/// match mode {
///     RunMode::Apply => { DeleteDeclaration::run(&issues)?; }
///     RunMode::DryRun => DeleteDeclaration::preview(&issues),
///     RunMode::Report => {}
/// }
/// ```
pub trait Action<I> {
    /// Convert inputs to low-level operations, at most one per file and kind.
    fn to_operations(items: &[I]) -> Vec<Operation>;

    /// Execute the action (modify files).
    fn run(items: &[I]) -> Result<ActionStats> {
        let ops = Self::to_operations(items);
        let mut stats = execute_operations(&ops)?;
        stats.processed = items.len();
        Ok(stats)
    }

    /// Preview the action (dry-run mode).
    fn preview(items: &[I]) {
        for op in &Self::to_operations(items) {
            op.preview();
        }
    }
}

/// Check every operation's snapshot, then execute them in order.
///
/// Nothing is written if any file changed since it was scanned.
pub(crate) fn execute_operations(ops: &[Operation]) -> Result<ActionStats> {
    for op in ops {
        op.check_snapshot()?;
    }

    let mut files_modified: HashSet<&str> = HashSet::new();
    let mut changes_applied = 0;

    for op in ops {
        if let super::OperationResult::Applied(count) = op.execute()? {
            changes_applied += count;
            files_modified.insert(op.file_path());
        }
    }

    Ok(ActionStats {
        processed: ops.len(),
        changes_applied,
        files_modified: files_modified.len(),
    })
}
