//! Dispatches a parsed command line to its command handler.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, get::get, init::init},
};

/// Run the command in `args`.
///
/// # Returns
/// - `Ok(CommandResult)` with error/warning counts and exit behavior
/// - `Err` if the command cannot run (config or schema unreadable, a
///   `get` file fails to load, misuse of message arguments)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Get(cmd)) => get(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
