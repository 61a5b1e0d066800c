//! List command implementation.
//!
//! The `updatewatch list` command shows every available update, whether or
//! not it is new. It never writes the cache.

use std::io::Write;

use crate::cache::CacheStore;
use crate::cli::args::ListArgs;
use crate::config::{load_checks, AppPaths};
use crate::error::Result;
use crate::report::Reporter;
use crate::watch::{WatchOptions, Watcher};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand<'a> {
    paths: &'a AppPaths,
    reporter: &'a Reporter,
    args: ListArgs,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(paths: &'a AppPaths, reporter: &'a Reporter, args: ListArgs) -> Self {
        Self {
            paths,
            reporter,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let checks = load_checks(&self.paths.updates)?;
        let watcher = Watcher::with_store(CacheStore::new(&self.paths.cache));

        let results = if self.args.from_cache {
            watcher.cached(&checks)?
        } else {
            let options = WatchOptions {
                sequential: self.args.single,
            };
            watcher.check(&checks, options)
        };

        let count = self.reporter.show_all(out, &results)?;
        tracing::debug!("{} updates available", count);

        Ok(CommandResult::success())
    }
}
