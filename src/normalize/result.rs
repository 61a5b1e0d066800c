//! Structured check results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Synthetic stderr line recorded when a check hits its timeout.
pub const TIMEOUT_MESSAGE: &str = "ERROR: command timed out";

/// Normalized outcome of one check.
///
/// Each stdout line is an update "item". `new` holds the items that were not
/// reported by the same check position on the previous run; it is filled in
/// by [`reconcile`](crate::cache::reconcile) and is always a subset of
/// `stdout`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckResult {
    pub description: String,
    /// Column header hoisted out of tabular output.
    pub header: Option<String>,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    pub status: i32,
    pub new: BTreeSet<String>,
}

impl CheckResult {
    /// Create an empty, successful result.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    /// Whether the check wrote to stderr or exited non-zero.
    pub fn has_error(&self) -> bool {
        !self.stderr.is_empty() || self.status != 0
    }

    /// Whether there is anything to display.
    pub fn has_output(&self) -> bool {
        !self.stdout.is_empty() || !self.stderr.is_empty()
    }

    /// Whether `line` is a new item.
    pub fn is_new(&self, line: &str) -> bool {
        self.new.contains(line)
    }

    /// Whether the check hit its timeout.
    pub fn timed_out(&self) -> bool {
        self.status == crate::shell::TIMEOUT_STATUS
    }
}
