//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::commands::cache::CacheArgs;

/// updatewatch - Watch for available software updates.
#[derive(Debug, Parser)]
#[command(name = "updatewatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration directory (overrides the platform default)
    #[arg(short, long, global = true, value_name = "DIR", value_parser = existing_dir)]
    pub dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Also write logs to FILE (default: updatewatch.log in the
    /// configuration directory)
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        num_args = 0..=1,
        require_equals = true
    )]
    pub log: Option<Option<PathBuf>>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run checks and show new updates (default if no command specified)
    Run(RunArgs),

    /// Show all available updates
    List(ListArgs),

    /// Inspect or clear cached results
    Cache(CacheArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Show the cached results of the last run instead of running checks
    #[arg(long)]
    pub from_cache: bool,

    /// Run checks one at a time
    #[arg(long)]
    pub single: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// List cached results instead of running checks
    #[arg(long)]
    pub from_cache: bool,

    /// Run checks one at a time
    #[arg(long)]
    pub single: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

fn existing_dir(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("{value:?} is not an existing directory"))
    }
}
