//! SyncTables action - writes reconciled locale tables.

use colored::Colorize;

use super::{operation::Operation, traits::Action};
use crate::rules::sync::SyncOutcome;

pub struct SyncTables;

impl Action<SyncOutcome> for SyncTables {
    /// Only tables that actually change are written.
    fn to_operations(outcomes: &[SyncOutcome]) -> Vec<Operation> {
        outcomes
            .iter()
            .filter(|outcome| outcome.has_changes())
            .map(|outcome| Operation::WriteTable {
                table: outcome.table.clone(),
            })
            .collect()
    }

    fn preview(outcomes: &[SyncOutcome]) {
        for outcome in outcomes.iter().filter(|o| o.has_changes()) {
            println!("{}", outcome.file_path().bold());
            for key in &outcome.filled {
                println!("  {} {}", "+".green(), key);
            }
            for key in &outcome.dropped {
                println!("  {} {}", "-".red(), key);
            }
            if outcome.reordered {
                println!("  {} reordered to canonical order", "~".yellow());
            }
        }
    }
}
