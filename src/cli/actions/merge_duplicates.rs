//! MergeDuplicates action - collapses same-namespace duplicate groups.
//!
//! One merge plan becomes three kinds of file edits: removed declarations
//! are cut from their module files, removed keys are dropped from every
//! table, and literal references to removed keys are rewritten to the
//! canonical key.

use std::collections::BTreeMap;

use colored::Colorize;

use super::{operation::Operation, traits::Action};
use crate::{
    core::{Declaration, ReferenceGrammar, UsageSite},
    rules::merge::MergePlan,
};

pub struct MergeDuplicates;

#[derive(Default)]
struct SourceEdit {
    renames: Vec<(String, String)>,
    sites: Vec<UsageSite>,
}

impl Action<MergePlan> for MergeDuplicates {
    fn to_operations(plans: &[MergePlan]) -> Vec<Operation> {
        let Some(grammar) = plans.first().map(|plan| &plan.grammar) else {
            return Vec::new();
        };

        let mut modules: BTreeMap<&str, Vec<Declaration>> = BTreeMap::new();
        let mut tables: BTreeMap<&str, (&Option<String>, Vec<String>)> = BTreeMap::new();
        let mut sources: BTreeMap<&str, SourceEdit> = BTreeMap::new();

        for plan in plans {
            for decl in &plan.group.removed {
                modules
                    .entry(decl.file_path.as_str())
                    .or_default()
                    .push(decl.clone());
                for table in &plan.tables {
                    tables
                        .entry(table.file_path.as_str())
                        .or_insert_with(|| (&table.snapshot, Vec::new()))
                        .1
                        .push(decl.key.clone());
                }
            }
            for (key, sites) in &plan.usages {
                for site in sites {
                    let edit = sources.entry(site.context.file_path()).or_default();
                    if !edit.renames.iter().any(|(from, _)| from == key) {
                        edit.renames
                            .push((key.clone(), plan.canonical_key().to_string()));
                    }
                    edit.sites.push(site.clone());
                }
            }
        }

        let mut ops: Vec<Operation> = modules
            .into_iter()
            .map(|(file_path, mut declarations)| {
                declarations.sort_by_key(|d| d.lines);
                Operation::DeleteDeclarations {
                    file_path: file_path.to_string(),
                    declarations,
                }
            })
            .collect();
        ops.extend(
            tables
                .into_iter()
                .map(|(file_path, (snapshot, keys))| Operation::RemoveTableKeys {
                    file_path: file_path.to_string(),
                    keys,
                    snapshot: snapshot.clone(),
                }),
        );
        ops.extend(sources.into_iter().map(|(file_path, mut edit)| {
            edit.sites.sort_by(|a, b| a.context.location.cmp(&b.context.location));
            rewrite_op(file_path, grammar, edit)
        }));
        ops
    }

    /// Print each merge, then the files it touches.
    fn preview(plans: &[MergePlan]) {
        for plan in plans {
            println!(
                "{} {} {}",
                "merge".cyan().bold(),
                format!("\"{}\"", plan.group.value).bold(),
                format!("(namespace {})", plan.group.namespace).dimmed()
            );
            println!("  {} {}", "keep".green(), plan.canonical_key());
            for decl in &plan.group.removed {
                println!(
                    "  {} {} {}",
                    "drop".red(),
                    decl.key,
                    format!("({}:{})", decl.file_path, decl.lines).dimmed()
                );
            }
        }
        println!();
        for op in &Self::to_operations(plans) {
            op.preview();
        }
    }
}

fn rewrite_op(file_path: &str, grammar: &ReferenceGrammar, edit: SourceEdit) -> Operation {
    Operation::RewriteReferences {
        file_path: file_path.to_string(),
        grammar: grammar.clone(),
        renames: edit.renames,
        sites: edit.sites,
    }
}
