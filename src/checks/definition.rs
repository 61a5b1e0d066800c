//! Check definitions.

use serde::{Deserialize, Serialize};

use super::Timeout;

/// One user-configured update check.
///
/// Checks are kept in the order they were declared; that order aligns
/// results with the cached results of previous runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckDefinition {
    /// Human-readable name, e.g. "system packages".
    pub description: String,

    /// Shell command whose stdout lists available updates, one per line.
    pub command: String,

    /// Maximum run time before the command is killed.
    #[serde(default)]
    pub timeout: Timeout,

    /// Post-processor applied to the command's output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl CheckDefinition {
    /// Create a check with the default timeout and no post-processor.
    pub fn new(description: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: command.into(),
            timeout: Timeout::default(),
            kind: None,
        }
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the post-processor kind.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}
