//! Cache entry type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize::CheckResult;

/// Results of the last run of one check list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Fingerprint of the check list these results belong to.
    pub fingerprint: String,
    /// When the entry was written.
    pub updated_at: DateTime<Utc>,
    /// One result per check, in check order.
    pub results: Vec<CheckResult>,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    pub fn new(fingerprint: impl Into<String>, results: Vec<CheckResult>) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            updated_at: Utc::now(),
            results,
        }
    }

    /// Get the age of this entry.
    pub fn age(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.updated_at)
    }

    /// Total number of update items across all results.
    pub fn item_count(&self) -> usize {
        self.results.iter().map(|r| r.stdout.len()).sum()
    }

    /// Total number of items that were new when the entry was written.
    pub fn new_count(&self) -> usize {
        self.results.iter().map(|r| r.new.len()).sum()
    }
}
