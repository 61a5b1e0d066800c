//! Check definition loading.
//!
//! Checks live in a multi-document YAML stream (`updates.yaml`), one check
//! per document:
//!
//! ```yaml
//! description: system packages
//! command: apt list --upgradable 2>/dev/null | tail -n +2
//! ---
//! description: Node.js modules
//! command: npm outdated --global --color
//! timeout: 5m
//! ```

use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::checks::CheckDefinition;
use crate::error::{Result, UpdateWatchError};

/// Load the ordered list of checks from a YAML file.
pub fn load_checks(path: &Path) -> Result<Vec<CheckDefinition>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => UpdateWatchError::ChecksNotFound {
            path: path.to_path_buf(),
        },
        _ => UpdateWatchError::Io(e),
    })?;

    parse_checks(&content, path)
}

/// Parse checks from YAML content. `path` is only used in error messages.
///
/// Empty documents are skipped.
pub fn parse_checks(content: &str, path: &Path) -> Result<Vec<CheckDefinition>> {
    let mut checks = Vec::new();

    for document in serde_yaml::Deserializer::from_str(content) {
        let value = serde_yaml::Value::deserialize(document).map_err(|e| {
            UpdateWatchError::ChecksParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        if value.is_null() {
            continue;
        }

        let index = checks.len() + 1;
        let check: CheckDefinition =
            serde_yaml::from_value(value).map_err(|e| UpdateWatchError::InvalidCheck {
                index,
                message: e.to_string(),
            })?;

        if check.command.trim().is_empty() {
            return Err(UpdateWatchError::InvalidCheck {
                index,
                message: "command is empty".to_string(),
            });
        }

        checks.push(check);
    }

    tracing::debug!("loaded {} checks from {}", checks.len(), path.display());

    Ok(checks)
}
