//! Check pipeline orchestration.
//!
//! A [`Watcher`] ties the pieces together:
//!
//! ```text
//! checks ─▶ fingerprint ─▶ cache.get ─┐
//!    │                                ├─▶ reconcile ─▶ cache.put ─▶ results
//!    └────▶ run ─▶ normalize ─────────┘
//! ```

use tracing::{debug, info_span, warn, Span};

use crate::cache::{reconcile, CacheStore};
use crate::checks::CheckDefinition;
use crate::error::Result;
use crate::fingerprint::fingerprint_of;
use crate::normalize::{CheckResult, Normalizer};
use crate::shell::CheckRunner;

/// Options for one pass over the checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct WatchOptions {
    /// Run checks one after another instead of all at once.
    pub sequential: bool,
}

/// Runs checks and tracks what changed since the previous run.
pub struct Watcher {
    runner: CheckRunner,
    normalizer: Normalizer,
    store: CacheStore,
    span: Span,
}

impl Watcher {
    /// Create a watcher.
    ///
    /// Each component records its events in its own child span of `span`.
    pub fn new(
        runner: CheckRunner,
        normalizer: Normalizer,
        store: CacheStore,
        span: Span,
    ) -> Self {
        let (runner, normalizer, store) = {
            let _enter = span.enter();
            (
                runner.with_span(info_span!("runner")),
                normalizer.with_span(info_span!("normalize")),
                store.with_span(info_span!("cache")),
            )
        };

        Self {
            runner,
            normalizer,
            store,
            span,
        }
    }

    /// Create a watcher with default components, caching under `store`.
    pub fn with_store(store: CacheStore) -> Self {
        Self::new(
            CheckRunner::default(),
            Normalizer::default(),
            store,
            info_span!("watch"),
        )
    }

    /// The cache store.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Run and normalize the checks without consulting the cache.
    pub fn check(&self, checks: &[CheckDefinition], options: WatchOptions) -> Vec<CheckResult> {
        let _enter = self.span.enter();

        debug!(
            "running {} checks ({})",
            checks.len(),
            if options.sequential {
                "sequential"
            } else {
                "concurrent"
            }
        );

        let outputs = if options.sequential {
            self.runner.run_sequential(checks)
        } else {
            self.runner.run(checks)
        };

        let results = self.normalizer.normalize_all(checks, outputs);

        for result in results.iter().filter(|r| r.has_error()) {
            warn!(
                "check '{}' failed with status {}",
                result.description, result.status
            );
        }

        results
    }

    /// Run the checks, mark what is new since the last run and update the
    /// cache.
    pub fn get_data(
        &self,
        checks: &[CheckDefinition],
        options: WatchOptions,
    ) -> Result<Vec<CheckResult>> {
        let key = fingerprint_of(checks)?;
        let previous = {
            let _enter = self.span.enter();
            debug!("check list fingerprint {}", key);
            self.store.get(&key)
        };

        let current = self.check(checks, options);

        let _enter = self.span.enter();
        let merged = reconcile(current, previous);
        self.store.put(&key, merged.clone())?;

        debug!(
            "{} new items across {} checks",
            merged.iter().map(|r| r.new.len()).sum::<usize>(),
            merged.len()
        );

        Ok(merged)
    }

    /// The cached results of the last run of these checks, without running
    /// anything.
    pub fn cached(&self, checks: &[CheckDefinition]) -> Result<Vec<CheckResult>> {
        let key = fingerprint_of(checks)?;
        let _enter = self.span.enter();
        debug!("reading cached results for {}", key);
        Ok(self.store.get(&key))
    }
}
