//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `verify`: Check references, module lines and the canonical table
//! - `dedupe`: Merge duplicate same-namespace declarations
//! - `sync`: Reconcile locale tables with the canonical table
//! - `prune`: Remove declarations nothing references
//! - `untranslated`: Report values identical across all tables
//! - `init`: Initialize keyward configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (where .keywardrc.json is looked up)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Locale tables directory (overrides config file)
    #[arg(long)]
    pub locales_root: Option<PathBuf>,

    /// Module files directory (overrides config file)
    #[arg(long)]
    pub modules_root: Option<PathBuf>,

    /// Canonical locale (overrides config file)
    #[arg(long)]
    pub canonical_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// How far a destructive command goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Summary only.
    Report,
    /// Full plan, no writes.
    DryRun,
    /// Execute the plan.
    Apply,
}

impl RunMode {
    pub fn is_apply(self) -> bool {
        self == RunMode::Apply
    }
}

#[derive(Debug, Clone, Args)]
pub struct ModeArgs {
    /// Print the full plan without changing any file
    #[arg(long, conflicts_with = "apply")]
    pub dry_run: bool,

    /// Execute the plan (rewrites files)
    #[arg(long)]
    pub apply: bool,
}

impl ModeArgs {
    pub fn mode(&self) -> RunMode {
        if self.apply {
            RunMode::Apply
        } else if self.dry_run {
            RunMode::DryRun
        } else {
            RunMode::Report
        }
    }
}

#[derive(Debug, Args)]
pub struct VerifyCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ToolCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub mode: ModeArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report undeclared keys, dynamic references, unrecognized module lines and table drift
    Verify(VerifyCommand),
    /// Merge declarations sharing a value within one namespace
    Dedupe(ToolCommand),
    /// Reconcile every locale table with the canonical key set and order
    Sync(ToolCommand),
    /// Remove declarations that no source file references
    Prune(ToolCommand),
    /// Report keys whose value is identical in every table
    Untranslated(ToolCommand),
    /// Initialize a new .keywardrc.json configuration file
    Init,
}
