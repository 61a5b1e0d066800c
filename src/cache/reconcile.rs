//! Merging a fresh run with the previous one.

use std::collections::BTreeSet;

use crate::normalize::CheckResult;

/// Merge `current` results with `previous` results position by position.
///
/// A position missing from `previous` compares against an empty result, so
/// everything it reports is new. A failed check with nothing new keeps the
/// previous result (under the current description) instead of wiping the
/// cached state. The output is aligned to `current`.
pub fn reconcile(current: Vec<CheckResult>, previous: Vec<CheckResult>) -> Vec<CheckResult> {
    let mut previous = previous.into_iter();

    current
        .into_iter()
        .map(|current| {
            let previous = previous.next().unwrap_or_default();
            reconcile_one(current, previous)
        })
        .collect()
}

fn reconcile_one(mut current: CheckResult, mut previous: CheckResult) -> CheckResult {
    let new = difference(&current.stdout, &previous.stdout);

    if !new.is_empty() || !current.has_error() {
        current.new = new;
        current
    } else {
        tracing::debug!(
            "'{}' failed, keeping {} previous items",
            current.description,
            previous.stdout.len()
        );
        previous.description = current.description;
        previous.new.clear();
        previous
    }
}

/// Lines of `current` that do not appear in `previous`.
pub fn difference(current: &[String], previous: &[String]) -> BTreeSet<String> {
    let seen: BTreeSet<&String> = previous.iter().collect();
    current
        .iter()
        .filter(|line| !seen.contains(line))
        .cloned()
        .collect()
}
