//! Outdated-package table post-processor.
//!
//! Tools like `npm outdated` print a colored table:
//!
//! ```text
//! Package  Current  Wanted  Latest  Location
//! npm        3.7.5   3.8.0   3.8.0
//! jshint     2.9.1   2.9.1   2.9.1
//! ```
//!
//! and list packages that are pinned below `latest` even when nothing newer
//! satisfies the declared range. Only rows with `current < wanted` are real
//! updates.

use regex::Regex;
use std::sync::LazyLock;

use super::registry::{PostProcessor, Processed};
use super::version::is_outdated;

static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<package>\S+)\s+(?P<current>\S+)\s+(?P<wanted>\S+)\s+(?P<latest>\S+)(?:\s+(?P<location>\S+))?$")
        .unwrap()
});

/// Keeps the header and the genuinely outdated rows of an outdated table.
pub struct OutdatedTable;

impl OutdatedTable {
    pub const KIND: &'static str = "npm-outdated";
}

impl PostProcessor for OutdatedTable {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn process(&self, stdout: Vec<String>) -> Processed {
        let mut lines = stdout.into_iter();
        let header = lines.next();

        let stdout = lines.filter(|row| row_is_outdated(row)).collect();

        Processed { header, stdout }
    }
}

/// Whether a table row reports `current < wanted`. Malformed rows are not.
fn row_is_outdated(row: &str) -> bool {
    let plain = console::strip_ansi_codes(row);
    let Some(caps) = ROW.captures(plain.trim()) else {
        tracing::debug!("dropping malformed row: {:?}", plain);
        return false;
    };

    is_outdated(&caps["current"], &caps["wanted"]).unwrap_or(false)
}
