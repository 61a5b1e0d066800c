//! Configuration directory layout.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Name used for the configuration directory and log file.
pub const PROGRAM: &str = "updatewatch";

/// Paths derived from the configuration directory.
///
/// ```text
/// <dir>/updates.yaml      check definitions
/// <dir>/cache/            one JSON document per check-list fingerprint
/// <dir>/updatewatch.log   log file used by `--log` without a value
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// The configuration directory.
    pub directory: PathBuf,
    /// Check definitions file.
    pub updates: PathBuf,
    /// Cache store root.
    pub cache: PathBuf,
    /// Default log file.
    pub logfile: PathBuf,
}

impl AppPaths {
    /// Lay out paths under an existing directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        Self {
            updates: directory.join("updates.yaml"),
            cache: directory.join("cache"),
            logfile: directory.join(format!("{PROGRAM}.log")),
            directory,
        }
    }

    /// Resolve the configuration directory, creating the default one when
    /// no override is given.
    pub fn resolve(directory: Option<&Path>) -> Result<Self> {
        match directory {
            Some(dir) => Ok(Self::new(dir)),
            None => {
                let dir = default_config_dir();
                fs::create_dir_all(&dir)?;
                Ok(Self::new(dir))
            }
        }
    }
}

/// Platform configuration directory for updatewatch
/// (e.g. `~/.config/updatewatch` on Linux).
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PROGRAM)
}
