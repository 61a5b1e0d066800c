//! Cache command implementation.
//!
//! Provides `updatewatch cache path`, `updatewatch cache keys` and
//! `updatewatch cache clear`.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::io::Write;

use crate::cache::CacheStore;
use crate::config::AppPaths;

use super::dispatcher::{Command, CommandResult};

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Print the cache directory.
    Path,
    /// List cached check-list fingerprints.
    Keys,
    /// Remove all cached results.
    Clear,
}

/// The cache command implementation.
pub struct CacheCommand<'a> {
    paths: &'a AppPaths,
    args: CacheArgs,
}

impl<'a> CacheCommand<'a> {
    /// Create a new cache command.
    pub fn new(paths: &'a AppPaths, args: CacheArgs) -> Self {
        Self { paths, args }
    }
}

impl Command for CacheCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> crate::error::Result<CommandResult> {
        let store = CacheStore::new(&self.paths.cache);

        match &self.args.command {
            CacheSubcommand::Path => writeln!(out, "{}", store.root().display())?,
            CacheSubcommand::Keys => list_keys(&store, out)?,
            CacheSubcommand::Clear => clear_cache(&store, out)?,
        }

        Ok(CommandResult::success())
    }
}

fn list_keys(store: &CacheStore, out: &mut dyn Write) -> Result<()> {
    for key in store.keys()? {
        match store.load(&key) {
            Ok(Some(entry)) => writeln!(
                out,
                "{}  {}  {} checks, {} items",
                key,
                entry.updated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                entry.results.len(),
                entry.item_count()
            )?,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("{:#}", e);
                writeln!(out, "{}  (unreadable)", key)?;
            }
        }
    }

    Ok(())
}

fn clear_cache(store: &CacheStore, out: &mut dyn Write) -> Result<()> {
    let cleared = store.clear()?;
    writeln!(out, "Cleared {} entries", cleared)?;
    Ok(())
}
