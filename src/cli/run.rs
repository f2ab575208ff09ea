//! Dispatches parsed arguments to the matching command handler.

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, dedupe::dedupe, init::init, prune::prune, sync::sync,
        untranslated::untranslated, verify::verify,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Verify(cmd)) => verify(cmd),
        Some(Command::Dedupe(cmd)) => dedupe(cmd),
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::Prune(cmd)) => prune(cmd),
        Some(Command::Untranslated(cmd)) => untranslated(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
