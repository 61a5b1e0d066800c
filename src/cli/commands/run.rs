//! Run command implementation.
//!
//! The `updatewatch run` command runs every check, remembers the results and
//! shows the update lists when something new turned up.

use std::io::Write;

use crate::cache::CacheStore;
use crate::cli::args::RunArgs;
use crate::config::{load_checks, AppPaths};
use crate::error::Result;
use crate::report::Reporter;
use crate::watch::{WatchOptions, Watcher};

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand<'a> {
    paths: &'a AppPaths,
    reporter: &'a Reporter,
    args: RunArgs,
}

impl<'a> RunCommand<'a> {
    /// Create a new run command.
    pub fn new(paths: &'a AppPaths, reporter: &'a Reporter, args: RunArgs) -> Self {
        Self {
            paths,
            reporter,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let checks = load_checks(&self.paths.updates)?;
        let watcher = Watcher::with_store(CacheStore::new(&self.paths.cache));

        let results = if self.args.from_cache {
            watcher.cached(&checks)?
        } else {
            let options = WatchOptions {
                sequential: self.args.single,
            };
            watcher.get_data(&checks, options)?
        };

        let new = self.reporter.show_new(out, &results)?;
        tracing::debug!("{} new updates", new);

        Ok(CommandResult::success())
    }
}
