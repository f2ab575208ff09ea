//! Low-level file operations.
//!
//! Each operation touches exactly one file and carries the snapshot it was
//! planned from; it refuses to run if the file changed since it was scanned.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use colored::Colorize;

use super::table_editor::TableEditor;
use crate::{
    core::{
        Declaration, LineRange, LocaleTable, ReferenceGrammar, UsageSite,
        parsers::module::extract_declarations,
    },
    utils::LineIndex,
};

#[derive(Debug, Clone)]
pub enum Operation {
    /// Delete the line ranges of `declarations` from one module file.
    DeleteDeclarations {
        file_path: String,
        declarations: Vec<Declaration>,
    },
    /// Remove keys from one table file.
    RemoveTableKeys {
        file_path: String,
        keys: Vec<String>,
        /// Table content at scan time.
        snapshot: Option<String>,
    },
    /// Rewrite the key token of literal references in one source file.
    RewriteReferences {
        file_path: String,
        grammar: ReferenceGrammar,
        /// (from, to) key pairs.
        renames: Vec<(String, String)>,
        /// Sites found at scan time.
        sites: Vec<UsageSite>,
    },
    /// Write a whole table file (skipped when the content is identical).
    /// Checked against `table.snapshot` when the table was read from disk.
    WriteTable { table: LocaleTable },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationResult {
    /// Number of changes written.
    Applied(usize),
    Unchanged,
}

impl Operation {
    pub fn file_path(&self) -> &str {
        match self {
            Operation::DeleteDeclarations { file_path, .. }
            | Operation::RemoveTableKeys { file_path, .. }
            | Operation::RewriteReferences { file_path, .. } => file_path,
            Operation::WriteTable { table } => &table.file_path,
        }
    }

    /// Fail if the file no longer matches what the operation was planned from.
    pub fn check_snapshot(&self) -> Result<()> {
        match self {
            Operation::DeleteDeclarations {
                file_path,
                declarations,
            } => {
                let content = read(file_path)?;
                let current = extract_declarations(file_path, content)?;
                for decl in declarations {
                    if !current.declarations.contains(decl) {
                        bail!(
                            "{} changed since it was scanned ('{}' is no longer at line {}); re-run the command",
                            file_path,
                            decl.key,
                            decl.lines
                        );
                    }
                }
                Ok(())
            }
            Operation::RewriteReferences {
                file_path, sites, ..
            } => {
                let content = read(file_path)?;
                let index = LineIndex::new(&content);
                let line_count = content.lines().count();
                for site in sites {
                    let line = site.context.line();
                    if line > line_count
                        || index.line_text(&content, line) != site.context.source_line
                    {
                        bail!(
                            "{} changed since it was scanned (line {} differs); re-run the command",
                            file_path,
                            line
                        );
                    }
                }
                Ok(())
            }
            Operation::RemoveTableKeys {
                file_path,
                snapshot: Some(snapshot),
                ..
            } => check_unchanged(file_path, snapshot),
            Operation::WriteTable { table } => match &table.snapshot {
                Some(snapshot) => check_unchanged(&table.file_path, snapshot),
                None => Ok(()),
            },
            Operation::RemoveTableKeys { snapshot: None, .. } => Ok(()),
        }
    }

    pub fn execute(&self) -> Result<OperationResult> {
        match self {
            Operation::DeleteDeclarations {
                file_path,
                declarations,
            } => {
                let content = read(file_path)?;
                let ranges: Vec<LineRange> = declarations.iter().map(|d| d.lines).collect();
                let filtered = remove_line_ranges(&content, &ranges);
                if filtered == content {
                    return Ok(OperationResult::Unchanged);
                }
                write(file_path, &filtered)?;
                Ok(OperationResult::Applied(declarations.len()))
            }
            Operation::RemoveTableKeys {
                file_path, keys, ..
            } => {
                let mut editor = TableEditor::open(Path::new(file_path))?;
                let removed = editor.remove_keys(keys);
                if removed == 0 {
                    return Ok(OperationResult::Unchanged);
                }
                editor.save()?;
                Ok(OperationResult::Applied(removed))
            }
            Operation::RewriteReferences {
                file_path,
                grammar,
                renames,
                ..
            } => {
                let mut content = read(file_path)?;
                let mut rewritten = 0;
                for (from, to) in renames {
                    let (next, count) = grammar.key_matcher(from)?.rewrite(&content, to);
                    content = next;
                    rewritten += count;
                }
                if rewritten == 0 {
                    return Ok(OperationResult::Unchanged);
                }
                write(file_path, &content)?;
                Ok(OperationResult::Applied(rewritten))
            }
            Operation::WriteTable { table } => {
                let content = table.to_json_string()?;
                let existing = fs::read_to_string(&table.file_path).ok();
                if existing.as_deref() == Some(content.as_str()) {
                    return Ok(OperationResult::Unchanged);
                }
                write(&table.file_path, &content)?;
                Ok(OperationResult::Applied(1))
            }
        }
    }

    /// Print what `execute` would do (dry-run mode).
    pub fn preview(&self) {
        match self {
            Operation::DeleteDeclarations {
                file_path,
                declarations,
            } => {
                println!("{}", file_path.bold());
                for decl in declarations {
                    println!(
                        "  {} {} {}",
                        "-".red(),
                        decl.key,
                        format!("(line {})", decl.lines).dimmed()
                    );
                }
            }
            Operation::RemoveTableKeys {
                file_path, keys, ..
            } => {
                println!("{}", file_path.bold());
                for key in keys {
                    println!("  {} {}", "-".red(), key);
                }
            }
            Operation::RewriteReferences {
                file_path,
                renames,
                sites,
                ..
            } => {
                println!("{}", file_path.bold());
                for site in sites {
                    println!(
                        "  {} {}:{} {}",
                        "~".yellow(),
                        site.context.line(),
                        site.context.col(),
                        site.context.source_line.trim()
                    );
                }
                for (from, to) in renames {
                    println!("    {} -> {}", from, to);
                }
            }
            Operation::WriteTable { table } => {
                println!(
                    "{} ({} key(s))",
                    table.file_path.bold(),
                    table.len()
                );
            }
        }
    }
}

/// Drop every line inside `ranges` (1-based, inclusive), keeping all other
/// bytes, line endings included, untouched.
pub fn remove_line_ranges(content: &str, ranges: &[LineRange]) -> String {
    content
        .split_inclusive('\n')
        .enumerate()
        .filter(|(i, _)| !ranges.iter().any(|range| range.contains(i + 1)))
        .map(|(_, line)| line)
        .collect()
}

fn check_unchanged(file_path: &str, snapshot: &str) -> Result<()> {
    if read(file_path)? != snapshot {
        bail!(
            "{} changed since it was scanned; re-run the command",
            file_path
        );
    }
    Ok(())
}

fn read(file_path: &str) -> Result<String> {
    fs::read_to_string(file_path).with_context(|| format!("Failed to read file: {}", file_path))
}

fn write(file_path: &str, content: &str) -> Result<()> {
    fs::write(file_path, content).with_context(|| format!("Failed to write file: {}", file_path))
}
