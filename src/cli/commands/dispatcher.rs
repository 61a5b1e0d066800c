//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::AppPaths;
use crate::error::Result;
use crate::report::Reporter;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing its report to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Exit code to use (0 for success).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }

    /// Whether the command succeeded.
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Process exit status; codes outside `0..=255` become 1.
    pub fn exit_status(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    paths: AppPaths,
    reporter: Reporter,
}

impl CommandDispatcher {
    /// Create a new dispatcher for a configuration directory.
    pub fn new(paths: AppPaths, reporter: Reporter) -> Self {
        Self { paths, reporter }
    }

    /// Get the resolved paths.
    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run(args)) => {
                let cmd = super::run::RunCommand::new(&self.paths, &self.reporter, args.clone());
                cmd.execute(out)
            }
            Some(Commands::List(args)) => {
                let cmd =
                    super::list::ListCommand::new(&self.paths, &self.reporter, args.clone());
                cmd.execute(out)
            }
            Some(Commands::Cache(args)) => {
                let cmd = super::cache::CacheCommand::new(&self.paths, args.clone());
                cmd.execute(out)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(out)
            }
            None => {
                // Default to run command with default args
                let cmd =
                    super::run::RunCommand::new(&self.paths, &self.reporter, RunArgs::default());
                cmd.execute(out)
            }
        }
    }
}
