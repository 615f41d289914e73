//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Load property files against the schema and report problems
//! - `get`: Resolve one key and print its value
//! - `init`: Initialize the proptable configuration file

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

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Get(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by `check` and `get`.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Schema file (overrides config file)
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Locale label used in diagnostics (overrides config file)
    #[arg(long)]
    pub locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Property files to check (default: files matching the config includes)
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct GetCommand {
    /// Logical key to resolve
    pub key: String,

    /// Message arguments substituted into {0}, {1}, ...
    pub args: Vec<String>,

    /// Property file to load; repeat to layer files, later ones win
    #[arg(short = 'f', long = "file", required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check property files for malformed values, unresolved keys and bad message patterns
    Check(CheckCommand),
    /// Resolve a key against property files and print its value
    Get(GetCommand),
    /// Initialize a new .proptablerc.json configuration file
    Init,
}
